//! Axum HTTP API for the Pitwall automation service.
//!
//! The handler layer is thin glue by design: it authenticates bearer-token
//! triggers from the external scheduler and dispatches to the ingestion
//! orchestrator or the content publisher.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
