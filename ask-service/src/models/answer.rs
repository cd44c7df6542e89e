//! Request and response bodies for `POST /ask`.

use crate::services::providers::ProviderError;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

/// Incoming question. The text is forwarded as is, empty or not.
#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

/// Why a question could not be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Configuration,
    Upstream { status: u16 },
    NoAnswer,
    Timeout,
    Connect,
    Decode,
    Transport,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Configuration => "configuration",
            FailureKind::Upstream { .. } => "upstream",
            FailureKind::NoAnswer => "no_answer",
            FailureKind::Timeout => "timeout",
            FailureKind::Connect => "connect",
            FailureKind::Decode => "decode",
            FailureKind::Transport => "transport",
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            FailureKind::Upstream { status } => *status == 429 || *status >= 500,
            FailureKind::Timeout | FailureKind::Connect | FailureKind::Transport => true,
            FailureKind::Configuration | FailureKind::NoAnswer | FailureKind::Decode => false,
        }
    }
}

impl From<&ProviderError> for FailureKind {
    fn from(err: &ProviderError) -> Self {
        match err {
            ProviderError::NotConfigured(_) => FailureKind::Configuration,
            ProviderError::Upstream { status, .. } => FailureKind::Upstream { status: *status },
            ProviderError::NoAnswer => FailureKind::NoAnswer,
            ProviderError::Timeout(_) => FailureKind::Timeout,
            ProviderError::Connect(_) => FailureKind::Connect,
            ProviderError::Decode(_) => FailureKind::Decode,
            ProviderError::Transport(_) => FailureKind::Transport,
        }
    }
}

/// Result of one `/ask` call.
///
/// Serializes to exactly one key: `{"answer": ...}` or `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskOutcome {
    Success { text: String },
    Failure { kind: FailureKind, message: String },
}

impl AskOutcome {
    pub fn success(text: impl Into<String>) -> Self {
        AskOutcome::Success { text: text.into() }
    }

    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        AskOutcome::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AskOutcome::Success { .. })
    }
}

impl From<ProviderError> for AskOutcome {
    fn from(err: ProviderError) -> Self {
        let kind = FailureKind::from(&err);
        let message = match &err {
            ProviderError::Upstream { .. } => format!("Error from Gemini: {}", err),
            ProviderError::NoAnswer | ProviderError::NotConfigured(_) => err.to_string(),
            _ => format!("Exception occurred: {}", err),
        };
        AskOutcome::failure(kind, message)
    }
}

impl Serialize for AskOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            AskOutcome::Success { text } => map.serialize_entry("answer", text)?,
            AskOutcome::Failure { message, .. } => map.serialize_entry("error", message)?,
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_serializes_answer_only() {
        let body = serde_json::to_value(AskOutcome::success("Paris")).unwrap();
        assert_eq!(body, json!({"answer": "Paris"}));
    }

    #[test]
    fn upstream_error_embeds_status_and_body() {
        let outcome = AskOutcome::from(ProviderError::Upstream {
            status: 429,
            body: "rate limited".to_string(),
        });

        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"error": "Error from Gemini: 429 rate limited"})
        );
        assert!(matches!(
            outcome,
            AskOutcome::Failure {
                kind: FailureKind::Upstream { status: 429 },
                ..
            }
        ));
    }

    #[test]
    fn no_answer_uses_fixed_message() {
        let body = serde_json::to_value(AskOutcome::from(ProviderError::NoAnswer)).unwrap();
        assert_eq!(body, json!({"error": "No answer returned from Gemini."}));
    }

    #[test]
    fn transport_faults_are_prefixed() {
        let outcome = AskOutcome::from(ProviderError::Connect(
            "error sending request: connection refused".to_string(),
        ));

        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"error": "Exception occurred: error sending request: connection refused"})
        );
        match outcome {
            AskOutcome::Failure { kind, .. } => {
                assert_eq!(kind, FailureKind::Connect);
                assert!(kind.is_retryable());
            }
            AskOutcome::Success { .. } => panic!("expected failure"),
        }
    }

    #[test]
    fn decode_failures_are_not_retryable() {
        let outcome = AskOutcome::from(ProviderError::Decode("expected value".to_string()));
        assert!(!outcome.is_success());
        assert!(matches!(
            outcome,
            AskOutcome::Failure { kind, .. } if !kind.is_retryable()
        ));
    }

    #[test]
    fn rate_limits_and_server_errors_are_retryable() {
        assert!(FailureKind::Upstream { status: 429 }.is_retryable());
        assert!(FailureKind::Upstream { status: 503 }.is_retryable());
        assert!(!FailureKind::Upstream { status: 400 }.is_retryable());
        assert!(FailureKind::Timeout.is_retryable());
        assert!(!FailureKind::NoAnswer.is_retryable());
    }

    #[test]
    fn question_is_required() {
        let parsed: Result<AskRequest, _> = serde_json::from_value(json!({}));
        assert!(parsed.is_err());

        let parsed: AskRequest = serde_json::from_value(json!({"question": ""})).unwrap();
        assert_eq!(parsed.question, "");
    }
}
