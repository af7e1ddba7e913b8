use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::{JoinError, JoinSet};
use tracing::{info, Instrument};

use crate::config::Config;
use crate::http::connection::{Connection, Limits};
use crate::webroot::Webroot;

/// Pause after a failed accept so a persistent error (e.g. out of file
/// descriptors) does not spin the loop.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// The bound listening socket plus everything connections share.
pub struct Listener {
    listener: TcpListener,
    webroot: Arc<Webroot>,
    limits: Limits,
    concurrent: bool,
}

impl Listener {
    /// Opens the webroot and binds the listening socket.
    pub async fn bind(cfg: &Config) -> anyhow::Result<Self> {
        let webroot = Webroot::open(&cfg.root)?;
        let listener = TcpListener::bind(&cfg.listen_addr)
            .await
            .with_context(|| format!("Failed to bind {}", cfg.listen_addr))?;

        info!(
            addr = %listener.local_addr()?,
            root = %webroot.root().display(),
            "Listening"
        );

        Ok(Self {
            listener,
            webroot: Arc::new(webroot),
            limits: Limits::from_config(cfg),
            concurrent: cfg.concurrent,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections until the surrounding task is dropped.
    ///
    /// Failures on a single connection, including panics in its task, are
    /// logged and never end the loop.
    pub async fn serve(self) -> anyhow::Result<()> {
        let mut tasks = JoinSet::new();

        loop {
            tokio::select! {
                accepted = self.listener.accept() => match accepted {
                    Ok((socket, peer)) => {
                        info!("Accepted connection from {}", peer);

                        tasks.spawn(
                            handle(socket, self.webroot.clone(), self.limits)
                                .instrument(tracing::info_span!("connection", %peer)),
                        );

                        if !self.concurrent {
                            while let Some(joined) = tasks.join_next().await {
                                log_task_outcome(joined);
                            }
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to accept connection");
                        tokio::time::sleep(ACCEPT_BACKOFF).await;
                    }
                },

                Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                    log_task_outcome(joined);
                }
            }
        }
    }
}

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    Listener::bind(cfg).await?.serve().await
}

async fn handle(socket: TcpStream, webroot: Arc<Webroot>, limits: Limits) {
    let mut conn = Connection::new(socket, webroot, limits);

    if let Err(e) = conn.run().await {
        tracing::error!(error = %e, "Connection closed without a response");
    }
}

fn log_task_outcome(joined: Result<(), JoinError>) {
    if let Err(e) = joined {
        tracing::error!(error = %e, "Connection task failed");
    }
}
