//! service-core: Shared infrastructure for the ask workspace services.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod utils;

pub use axum;
pub use tower_http;
pub use tracing;
