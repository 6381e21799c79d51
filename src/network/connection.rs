//! Connection - drives one session over one server connection.
//!
//! ```text
//! TcpStream ──▶ Framed<LineCodec> ──▶ Session::handle_line ──▶ replies ──▶ Framed
//! ```
//!
//! The loop is strictly sequential: a line is fully handled, and its
//! replies flushed, before the next one is read.

use futures_util::{SinkExt, StreamExt};
use irclog_proto::{LineCodec, Message};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_util::codec::Framed;
use tracing::{Instrument, debug, info, warn};

use crate::error::SessionResult;
use crate::session::Session;
use crate::telemetry::spans;

/// Where to connect and how the wire is encoded.
#[derive(Clone, Debug)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub encoding: String,
}

/// Connect to `endpoint` and run `session` until the server closes the
/// connection or the session hits a fatal error. Channel logs are closed
/// either way.
pub async fn run(endpoint: &Endpoint, mut session: Session) -> SessionResult<()> {
    let span = spans::session(&endpoint.host, endpoint.port);
    async move {
        let codec = LineCodec::new(&endpoint.encoding)?;
        let stream = TcpStream::connect((endpoint.host.as_str(), endpoint.port)).await?;
        info!("Connected");

        let result = drive(Framed::new(stream, codec), &mut session).await;
        session.on_disconnect();
        match &result {
            Ok(()) => info!("Connection closed by server"),
            Err(e) => warn!(code = e.error_code(), error = %e, "Connection ended"),
        }
        result
    }
    .instrument(span)
    .await
}

/// Run the read-dispatch-reply loop over an established transport.
pub async fn drive<T>(mut framed: Framed<T, LineCodec>, session: &mut Session) -> SessionResult<()>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    let greeting = session.on_connect()?;
    send_all(&mut framed, greeting).await?;

    while let Some(line) = framed.next().await {
        let line = line?;
        debug!(line = %line, "<<");
        let replies = session.handle_line(&line)?;
        send_all(&mut framed, replies).await?;
    }
    Ok(())
}

async fn send_all<T>(framed: &mut Framed<T, LineCodec>, messages: Vec<Message>) -> SessionResult<()>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    if messages.is_empty() {
        return Ok(());
    }
    for msg in messages {
        let line = msg.to_string();
        debug!(line = %line, ">>");
        framed.feed(line).await?;
    }
    framed.flush().await?;
    Ok(())
}
