//! # HTTP Host
//!
//! Axum server exposing the reasoning engine.
//!
//! # Endpoints
//!
//! - `GET /` - Service info
//! - `GET /health` - Health derived from the request error rate
//! - `GET /metrics` - Counter snapshot
//! - `POST /api/v1/process` - Process one event (bearer license key)
//! - `POST /api/v1/batch-process` - Process up to 100 events
//! - `GET|POST /api/v1/license` - Read or replace the active license

pub mod auth;
pub mod config;
pub mod errors;
pub mod license_routes;
pub mod middleware;
pub mod observability_routes;
pub mod reasoning_routes;
pub mod server;
pub mod state;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
pub use state::ServiceState;
