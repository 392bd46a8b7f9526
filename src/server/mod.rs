//! In-memory reference implementation of the Sales REST contract.
//!
//! Used by `salesdesk serve` and by the end-to-end tests. It is not a
//! production server: rows live in memory and vanish on exit.

mod error;
mod repository;
mod routes;

pub use error::ServerError;
pub use repository::SalesRepository;
pub use routes::{build_router, COLLECTION_PATH};

use std::net::{AddrParseError, SocketAddr};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::cancel::CancelToken;

#[derive(Debug, Error)]
pub enum ServerStartError {
    #[error("Invalid bind address '{addr}': {source}")]
    InvalidAddr {
        addr: String,
        #[source]
        source: AddrParseError,
    },

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// A bound reference server. The listener is held from `bind` to `run`
/// so the port cannot be taken in between.
pub struct ResourceServer {
    listener: TcpListener,
    addr: SocketAddr,
    repo: Arc<SalesRepository>,
}

impl ResourceServer {
    /// Bind to `addr`. Port 0 picks a free port.
    pub async fn bind(addr: &str, repo: Arc<SalesRepository>) -> Result<Self, ServerStartError> {
        let requested: SocketAddr =
            addr.parse().map_err(|source| ServerStartError::InvalidAddr {
                addr: addr.to_string(),
                source,
            })?;
        let listener = TcpListener::bind(requested)
            .await
            .map_err(|source| ServerStartError::Bind {
                addr: requested,
                source,
            })?;
        let addr = listener.local_addr().map_err(ServerStartError::Serve)?;
        tracing::info!(addr = %addr, "Reference server bound");
        Ok(Self {
            listener,
            addr,
            repo,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// `http://{addr}`, suitable for `api.base_url`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Serve until `shutdown` is cancelled, then drain in-flight requests.
    pub async fn run(self, shutdown: CancelToken) -> Result<(), ServerStartError> {
        tracing::info!(addr = %self.addr, rows = self.repo.count(), "Serving /api/sales");
        axum::serve(self.listener, build_router(self.repo))
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await
            .map_err(ServerStartError::Serve)?;
        tracing::info!("Reference server stopped");
        Ok(())
    }
}
