//! Core configuration types and loading.

use irclog_proto::sanitize;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::defaults::{
    DEFAULT_PORT, default_address, default_channels, default_directory, default_encoding,
    default_long_mode, default_nicknames, default_realname, default_server_password,
    default_username,
};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid port in server address: {0}")]
    InvalidPort(String),
}

/// Logger configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server connection settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// How we present ourselves.
    #[serde(default)]
    pub identity: IdentityConfig,
    /// Remote control settings.
    #[serde(default)]
    pub control: ControlConfig,
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Channels joined after login. Entries may hold several names
    /// separated by whitespace or commas.
    #[serde(default = "default_channels")]
    pub channels: Vec<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text and scrub every user-supplied
    /// string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config.normalized())
    }

    fn normalized(mut self) -> Self {
        self.identity.nicknames = split_names(&self.identity.nicknames);
        self.channels = split_names(&self.channels);
        self.identity.username = sanitize(&self.identity.username, true).replace('@', "_");
        self.identity.realname = sanitize(&self.identity.realname, true);
        self.server.password = self
            .server
            .password
            .map(|p| sanitize(&p, true))
            .filter(|p| !p.is_empty());
        self.control.password = self
            .control
            .password
            .map(|p| sanitize(&p, false))
            .filter(|p| !p.is_empty());
        self
    }
}

/// Split entries on whitespace and commas, sanitize each name as a token,
/// and drop empties.
fn split_names(entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .flat_map(|entry| entry.split(|c: char| c.is_whitespace() || c == ','))
        .map(|name| sanitize(name, false))
        .filter(|name| !name.is_empty())
        .collect()
}

/// Server connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// `host` or `host:port`.
    #[serde(default = "default_address")]
    pub address: String,
    /// Connection password sent with PASS. Empty disables PASS.
    #[serde(default = "default_server_password")]
    pub password: Option<String>,
    /// Text encoding label for the wire (e.g. "utf-8", "iso-8859-1").
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            password: default_server_password(),
            encoding: default_encoding(),
        }
    }
}

impl ServerConfig {
    /// Split `address` into host and port. A trailing `:NNNN` is the port;
    /// without one the port defaults to 6667.
    pub fn endpoint(&self) -> Result<(String, u16), ConfigError> {
        match self.address.rsplit_once(':') {
            Some((host, port))
                if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) =>
            {
                let port = port
                    .parse()
                    .map_err(|_| ConfigError::InvalidPort(self.address.clone()))?;
                Ok((host.to_string(), port))
            }
            _ => Ok((self.address.clone(), DEFAULT_PORT)),
        }
    }
}

/// Identity presented during registration.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Candidate nicknames, tried in order.
    #[serde(default = "default_nicknames")]
    pub nicknames: Vec<String>,
    /// Username (ident).
    #[serde(default = "default_username")]
    pub username: String,
    /// Real name, also quoted in CTCP FINGER replies.
    #[serde(default = "default_realname")]
    pub realname: String,
    /// User modes applied right after login (e.g. "+i-w").
    #[serde(default)]
    pub modestring: Option<String>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            nicknames: default_nicknames(),
            username: default_username(),
            realname: default_realname(),
            modestring: None,
        }
    }
}

/// Remote control configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ControlConfig {
    /// Password that prefixes control commands. Absent disables control.
    #[serde(default)]
    pub password: Option<String>,
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Directory holding one log file per channel.
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    /// Session log file; standard error when absent.
    #[serde(default)]
    pub meta: Option<PathBuf>,
    /// Per-command bitmask choosing `nick (user@host)` over `nick`.
    #[serde(default = "default_long_mode")]
    pub long_mode: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            meta: None,
            long_mode: default_long_mode(),
        }
    }
}
