use axum::{extract::State, Json};
use service_core::error::AppError;
use service_core::utils::JsonBody;

use crate::models::{AskOutcome, AskRequest};
use crate::services::providers::ProviderError;
use crate::services::STYLE_INSTRUCTION;
use crate::startup::AppState;

/// `POST /ask`: forward the question upstream once and relay the outcome.
///
/// Upstream and transport failures come back as `200 {"error": ...}`; only a
/// missing API key escalates to a 500.
pub async fn ask_question(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<AskRequest>,
) -> Result<Json<AskOutcome>, AppError> {
    tracing::debug!(question_len = request.question.len(), "Received question");

    let outcome = match state
        .text_provider
        .generate(STYLE_INSTRUCTION, &request.question)
        .await
    {
        Ok(text) => AskOutcome::success(text),
        Err(ProviderError::NotConfigured(msg)) => {
            tracing::error!(error = %msg, "Text provider is not configured");
            return Err(AppError::ConfigError(anyhow::anyhow!(msg)));
        }
        Err(err) => AskOutcome::from(err),
    };

    match &outcome {
        AskOutcome::Success { text } => {
            tracing::info!(answer_len = text.len(), "Question answered");
        }
        AskOutcome::Failure { kind, message } => {
            tracing::warn!(
                kind = kind.as_str(),
                retryable = kind.is_retryable(),
                error = %message,
                "Question could not be answered"
            );
        }
    }

    Ok(Json(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FailureKind;
    use crate::services::providers::mock::MockTextProvider;
    use std::sync::Arc;

    fn state_with(provider: Arc<MockTextProvider>) -> AppState {
        AppState {
            text_provider: provider,
        }
    }

    fn question(text: &str) -> JsonBody<AskRequest> {
        JsonBody(AskRequest {
            question: text.to_string(),
        })
    }

    #[tokio::test]
    async fn sends_style_instruction_then_question() {
        let provider = Arc::new(MockTextProvider::answering("Paris"));

        let Json(outcome) = ask_question(
            State(state_with(provider.clone())),
            question("What is the capital of France?"),
        )
        .await
        .unwrap();

        assert_eq!(outcome, AskOutcome::success("Paris"));
        assert_eq!(
            provider.calls(),
            vec![(
                STYLE_INSTRUCTION.to_string(),
                "What is the capital of France?".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn empty_question_is_forwarded() {
        let provider = Arc::new(MockTextProvider::answering("?"));

        ask_question(State(state_with(provider.clone())), question(""))
            .await
            .unwrap();

        assert_eq!(provider.calls()[0].1, "");
    }

    #[tokio::test]
    async fn provider_failure_becomes_error_outcome() {
        let provider = Arc::new(MockTextProvider::failing(ProviderError::Timeout(
            "operation timed out".to_string(),
        )));

        let Json(outcome) = ask_question(State(state_with(provider)), question("hi"))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            AskOutcome::failure(
                FailureKind::Timeout,
                "Exception occurred: operation timed out"
            )
        );
    }

    #[tokio::test]
    async fn missing_key_is_a_config_error() {
        let provider = Arc::new(MockTextProvider::failing(ProviderError::NotConfigured(
            "GEMINI_API_KEY not set".to_string(),
        )));

        let err = ask_question(State(state_with(provider)), question("hi"))
            .await
            .err()
            .unwrap();

        assert!(matches!(err, AppError::ConfigError(_)));
        assert_eq!(err.to_string(), "Configuration error: GEMINI_API_KEY not set");
    }
}
