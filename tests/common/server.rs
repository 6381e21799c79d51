//! Fake IRC server.
//!
//! Listens on an ephemeral port, accepts the logger's connection and lets a
//! test script the conversation line by line.

use irclog_proto::{Command, Message};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;

/// A listening fake server.
pub struct FakeServer {
    listener: TcpListener,
}

impl FakeServer {
    /// Bind to an ephemeral localhost port.
    pub async fn bind() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        Ok(Self { listener })
    }

    /// The `host:port` the logger should connect to.
    pub fn address(&self) -> anyhow::Result<String> {
        Ok(self.listener.local_addr()?.to_string())
    }

    /// Wait for the logger to connect.
    pub async fn accept(&self) -> anyhow::Result<ServerConn> {
        let (stream, _) = timeout(Duration::from_secs(10), self.listener.accept()).await??;
        Ok(ServerConn::new(stream))
    }
}

/// The server side of one accepted connection.
pub struct ServerConn {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
}

impl ServerConn {
    fn new(stream: TcpStream) -> Self {
        let (read_half, write_half) = stream.into_split();
        Self {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
        }
    }

    /// Send a raw line; CRLF is appended.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\r\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive one line, without its line ending.
    pub async fn recv_line(&mut self) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = timeout(Duration::from_secs(5), self.reader.read_line(&mut line)).await??;
        if n == 0 {
            anyhow::bail!("connection closed");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Receive and parse one message.
    pub async fn recv(&mut self) -> anyhow::Result<Message> {
        let line = self.recv_line().await?;
        line.parse::<Message>()
            .map_err(|e| anyhow::anyhow!("Parse error: {}", e))
    }

    /// Receive one line and check it.
    pub async fn expect(&mut self, expected: &str) -> anyhow::Result<()> {
        let line = self.recv_line().await?;
        anyhow::ensure!(line == expected, "expected {expected:?}, got {line:?}");
        Ok(())
    }

    /// Round-trip a PING so that every line sent before it has been
    /// handled.
    pub async fn sync(&mut self, token: &str) -> anyhow::Result<()> {
        self.send_raw(&format!("PING :{token}")).await?;
        self.expect(&format!("PONG :{token}")).await
    }

    /// Play the server's part of a successful registration as `nick`,
    /// consuming the JOINs that follow it.
    pub async fn register(&mut self, nick: &str, channels: &[&str]) -> anyhow::Result<()> {
        let user = self.recv().await?;
        anyhow::ensure!(user.command == Command::USER, "expected USER, got {user:?}");
        self.expect(&format!("NICK {nick}")).await?;
        self.send_raw(&format!(":irc.test 001 {nick} :Welcome to the test network"))
            .await?;
        for channel in channels {
            self.expect(&format!("JOIN {channel}")).await?;
            self.send_raw(&format!(":{nick}!lurker@test JOIN {channel}"))
                .await?;
        }
        Ok(())
    }

    /// Wait for the peer to close the connection.
    pub async fn expect_closed(&mut self) -> anyhow::Result<()> {
        let mut line = String::new();
        let n = timeout(Duration::from_secs(5), self.reader.read_line(&mut line)).await??;
        anyhow::ensure!(n == 0, "expected close, got {line:?}");
        Ok(())
    }
}
