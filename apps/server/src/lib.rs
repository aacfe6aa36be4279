//! vidquiz-server - HTTP server for quiz generation
//!
//! Owns the caption source and the quiz pipeline; handlers borrow them
//! through [`AppState`]. Binding and serving live here so integration tests
//! can drive the router without a real listener.

pub mod error;
pub mod http;
mod state;

use std::sync::Arc;

use tokio::net::TcpListener;

pub use error::ApiError;
pub use http::create_router;
pub use state::AppState;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7610,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Bind to the configured address and serve until shutdown.
pub async fn run(config: ServerConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("vidquiz server listening on {}", addr);

    let router = create_router(state);
    axum::serve(listener, router).await?;

    Ok(())
}
