use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, TcpStream};
use tracing::{Instrument, error, info, info_span};

use crate::app::App;
use crate::config::Config;
use crate::http::connection::Connection;

/// Pause after a failed accept so a persistent error (fd exhaustion) does not
/// spin the loop.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// A source of client connections.
pub trait Acceptor: Send {
    type Stream: AsyncRead + AsyncWrite + Unpin + Send + Sync + 'static;

    fn accept(&mut self) -> impl Future<Output = io::Result<(Self::Stream, SocketAddr)>> + Send;
}

impl Acceptor for TcpListener {
    type Stream = TcpStream;

    fn accept(&mut self) -> impl Future<Output = io::Result<(TcpStream, SocketAddr)>> + Send {
        TcpListener::accept(self)
    }
}

pub async fn run(cfg: &Config, app: App) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!("Listening on {}", cfg.server.listen_addr);

    serve(listener, app).await
}

/// Accepts connections forever, one task per connection.
///
/// Accept failures are logged and retried after a short pause; they never end
/// the loop.
pub async fn serve<A: Acceptor>(mut acceptor: A, app: App) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match acceptor.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!(error = %e, "Failed to accept connection");
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let app = app.clone();
        tokio::spawn(
            async move {
                let mut conn = Connection::new(socket, app);
                if let Err(e) = conn.run().await {
                    error!("Connection error from {}: {:#}", peer, e);
                }
            }
            .instrument(info_span!("conn", %peer)),
        );
    }
}
