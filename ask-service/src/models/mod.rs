//! Domain models for the ask service.

pub mod answer;

pub use answer::{AskOutcome, AskRequest, FailureKind};
