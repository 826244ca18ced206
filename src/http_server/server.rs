//! # HTTP Server
//!
//! Combines the reasoning, license and observability routers behind CORS
//! and request tracking.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::ServiceConfig;
use crate::observability::{log_event, log_event_with_fields, ServiceEvent};
use crate::reasoning::LicenseConfig;

use super::config::HttpServerConfig;
use super::license_routes::license_routes;
use super::middleware::track_requests;
use super::observability_routes::observability_routes;
use super::reasoning_routes::reasoning_routes;
use super::state::ServiceState;

/// HTTP server for the reasoning API
pub struct HttpServer {
    config: HttpServerConfig,
    state: Arc<ServiceState>,
    router: Router,
}

impl HttpServer {
    /// Create a server from the effective service configuration
    pub fn from_service_config(config: &ServiceConfig) -> Self {
        Self::with_config(config.http(), config.default_license.to_license())
    }

    /// Create a server with an explicit listener config and startup license
    pub fn with_config(config: HttpServerConfig, license: LicenseConfig) -> Self {
        let state = Arc::new(ServiceState::new(license));
        let router = Self::build_router(&config, Arc::clone(&state));
        Self {
            config,
            state,
            router,
        }
    }

    fn build_router(config: &HttpServerConfig, state: Arc<ServiceState>) -> Router {
        let cors = if config.allows_any_origin() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        let api = Router::new()
            .merge(reasoning_routes(Arc::clone(&state)))
            .merge(license_routes(Arc::clone(&state)));

        Router::new()
            .merge(observability_routes(Arc::clone(&state)))
            .nest("/api/v1", api)
            .layer(middleware::from_fn_with_state(state, track_requests))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Shared state (for inspection in tests)
    pub fn state(&self) -> Arc<ServiceState> {
        Arc::clone(&self.state)
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        let bound = listener.local_addr()?.to_string();
        log_event_with_fields(ServiceEvent::Serving, &[("addr", bound.as_str())]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                log_event(ServiceEvent::ShutdownStart);
            })
            .await?;

        Ok(())
    }
}
