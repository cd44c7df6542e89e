//! ask-service: relays a question to Gemini and returns a concise answer.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

pub use startup::{AppState, Application};
