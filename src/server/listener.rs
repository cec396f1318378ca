//! TCP listener for the correction server.
//!
//! Each connection carries exactly one transaction: the server reads one
//! request frame, writes one response frame, and closes. Malformed or
//! failing requests are answered with the empty frame rather than left
//! hanging.

use std::net::SocketAddr;
use std::sync::Arc;

use log::{info, warn};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpListener, ToSocketAddrs};

use crate::checker::SpellChecker;
use crate::error::Result;
use crate::server::protocol::{
    DEFAULT_PORT, Request, read_frame, render_check, render_correct, render_process, write_frame,
};

/// Configuration for the correction server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to.
    pub host: String,
    /// TCP port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// A spell correction server bound to a local address.
#[derive(Debug)]
pub struct SpellServer {
    checker: Arc<SpellChecker>,
    listener: TcpListener,
}

impl SpellServer {
    /// Bind to the given address.
    pub async fn bind<A: ToSocketAddrs>(checker: Arc<SpellChecker>, addr: A) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(SpellServer { checker, listener })
    }

    /// Bind to the address named by a [`ServerConfig`].
    pub async fn with_config(checker: Arc<SpellChecker>, config: &ServerConfig) -> Result<Self> {
        Self::bind(checker, (config.host.as_str(), config.port)).await
    }

    /// The address the server is listening on.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept and serve connections until the task is cancelled.
    pub async fn run(self) -> Result<()> {
        info!("listening on {}", self.local_addr()?);
        loop {
            let (mut stream, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!("failed to accept connection: {e}");
                    continue;
                }
            };
            let checker = self.checker.clone();
            tokio::spawn(async move {
                if let Err(e) = handle_connection(&checker, &mut stream).await {
                    warn!("connection from {peer} failed: {e}");
                }
            });
        }
    }
}

/// Serve one transaction on an established connection.
async fn handle_connection<S>(checker: &SpellChecker, stream: &mut S) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let message = read_frame(stream).await?;
    let reply = match respond(checker, &message) {
        Ok(reply) => reply,
        Err(e) => {
            warn!("request {message:?} failed: {e}");
            String::new()
        }
    };
    write_frame(stream, &reply).await?;
    stream.shutdown().await?;
    Ok(())
}

/// Dispatch a request to the checker and render the response.
fn respond(checker: &SpellChecker, message: &str) -> Result<String> {
    match Request::parse(message)? {
        Request::Check(word) => Ok(render_check(checker.check(&word)?).to_string()),
        Request::Correct(word) => {
            let correction = checker.correct(&word)?;
            Ok(render_correct(correction.as_ref().map(|c| c.word.as_str())))
        }
        Request::Process(word) => Ok(render_process(&checker.process(&word)?)),
    }
}
