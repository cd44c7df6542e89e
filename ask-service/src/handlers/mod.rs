//! HTTP handlers for the ask service.

pub mod ask;
pub mod health;

pub use ask::ask_question;
pub use health::{health_check, readiness_check};
