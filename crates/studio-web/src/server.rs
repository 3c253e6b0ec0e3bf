//! Web server configuration and startup

use std::net::SocketAddr;

use axum::Router;
use tracing::info;

use studio_core::WebConfig;

use crate::api::{AppState, create_router};
use crate::error::{Result, WebError};

/// Web server for the studio UI
pub struct StudioServer {
    config: WebConfig,
    state: AppState,
}

impl StudioServer {
    /// Create a new server over pre-built application state
    pub fn new(config: WebConfig, state: AppState) -> Self {
        Self { config, state }
    }

    fn socket_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        addr.parse()
            .map_err(|e| WebError::Config(format!("Invalid address: {}", e)))
    }

    /// Get the router
    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    /// Start the server
    pub async fn run(self) -> Result<()> {
        let addr = self.socket_addr()?;
        let app = self.router();

        info!("Studio UI listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| WebError::Server(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| WebError::Server(format!("Server error: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use studio_core::Manager;

    fn empty_state() -> AppState {
        AppState::new(Arc::new(Manager::new(vec![])), false, "test-model")
    }

    #[test]
    fn test_socket_addr_parses() {
        let config = WebConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        let server = StudioServer::new(config, empty_state());
        let addr = server.socket_addr().unwrap();
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_invalid_host_is_a_config_error() {
        let config = WebConfig {
            host: "not a host".to_string(),
            port: 3000,
        };
        let server = StudioServer::new(config, empty_state());
        assert!(matches!(server.socket_addr(), Err(WebError::Config(_))));
    }
}
