//! HTTP server lifecycle

use std::{future::Future, io, net::SocketAddr};

use axum::Router;
use stringlab_config::ServerConfig;
use tokio::net::TcpListener;

use crate::{routes::api_routes, state::AppState};

/// A bound, not yet running API server
pub struct ApiServer {
    listener: TcpListener,
    router: Router,
}

impl ApiServer {
    /// Bind the configured address and build the router over `state`
    pub async fn bind(config: &ServerConfig, state: AppState) -> io::Result<Self> {
        let state = state.with_slow_request_threshold(config.slow_request_threshold());
        let listener = TcpListener::bind(config.bind_address()).await?;
        Ok(Self {
            listener,
            router: api_routes(state),
        })
    }

    /// Address actually bound; differs from the config when port 0 was requested
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve requests until `shutdown` resolves, then drain in-flight requests
    pub async fn serve<F>(self, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
    }
}
