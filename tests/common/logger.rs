//! Logger process management.
//!
//! Runs the irclogd binary with a generated configuration in a temporary
//! directory.

use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::process::{Child, Command};
use tokio::time::timeout;

/// A running logger instance.
pub struct TestLogger {
    child: Child,
    dir: TempDir,
}

impl TestLogger {
    /// Spawn a logger connecting to `address`, joining `channels`, with
    /// nicknames `logbot` then `logbot_`.
    pub fn spawn(
        address: &str,
        channels: &[&str],
        control_password: Option<&str>,
    ) -> anyhow::Result<Self> {
        let channels = channels
            .iter()
            .map(|c| format!("'{c}'"))
            .collect::<Vec<_>>()
            .join(", ");
        let control = control_password
            .map(|p| format!("password = '{p}'"))
            .unwrap_or_default();
        Self::spawn_with(|dir| {
            format!(
                r#"
channels = [{channels}]

[server]
address = '{address}'
password = ''

[identity]
nicknames = ['logbot', 'logbot_']

[control]
{control}

[logging]
directory = '{dir}'
meta = '{dir}/session.log'
long_mode = 0
"#
            )
        })
    }

    /// Spawn a logger with a config produced from the temp directory path.
    pub fn spawn_with(config: impl FnOnce(&str) -> String) -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let dir_str = dir.path().display().to_string();
        let config_path = dir.path().join("irclogd.toml");
        std::fs::write(&config_path, config(&dir_str))?;

        let child = Command::new(env!("CARGO_BIN_EXE_irclogd"))
            .arg(&config_path)
            .env("RUST_LOG", "debug")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        Ok(Self { child, dir })
    }

    /// Wait for the process to exit.
    pub async fn wait(&mut self) -> anyhow::Result<ExitStatus> {
        Ok(timeout(Duration::from_secs(10), self.child.wait()).await??)
    }

    fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).unwrap_or_default()
    }

    /// Texts of the lines in `channel`'s log, timestamps removed.
    pub fn channel_log(&self, channel: &str) -> Vec<String> {
        let name = format!("{}.txt", channel.replace('#', "%23"));
        texts(&self.read(&name))
    }

    /// Texts of the lines in the session log, timestamps removed.
    pub fn session_log(&self) -> Vec<String> {
        texts(&self.read("session.log"))
    }
}

fn texts(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|l| l.split_once('\t').map_or(l, |(_, text)| text).to_string())
        .collect()
}
