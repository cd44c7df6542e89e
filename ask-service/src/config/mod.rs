use crate::services::providers::gemini::{GeminiConfig, DEFAULT_MODEL, GEMINI_API_BASE};
use axum::http::HeaderValue;
use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

/// Default outbound timeout for Gemini calls, in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct AskConfig {
    pub common: core_config::Config,
    pub gemini: GeminiConfig,
    pub cors: CorsPolicy,
}

/// Which browser origins may call the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Mirror any origin, method and header, with credentials. Test setups only.
    AnyOrigin,
    AllowList(Vec<HeaderValue>),
}

impl CorsPolicy {
    /// `*` selects [`CorsPolicy::AnyOrigin`]; otherwise a comma-separated
    /// list of origins. An empty value is an error: the policy must be chosen.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let origins: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .collect();

        if origins.is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "CORS_ALLOWED_ORIGINS must be '*' or a comma-separated list of origins"
            )));
        }

        if origins.contains(&"*") {
            if origins.len() > 1 {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "CORS_ALLOWED_ORIGINS cannot mix '*' with explicit origins"
                )));
            }
            return Ok(CorsPolicy::AnyOrigin);
        }

        origins
            .into_iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|e| {
                    AppError::ConfigError(anyhow::anyhow!("invalid CORS origin '{}': {}", origin, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(CorsPolicy::AllowList)
    }
}

impl AskConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        let timeout_secs = get_env("GEMINI_TIMEOUT_SECS", Some(&DEFAULT_TIMEOUT_SECS.to_string()))?
            .parse::<u64>()
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("GEMINI_TIMEOUT_SECS is not a number: {}", e))
            })?;

        // Absent is allowed here; each /ask call reports it instead.
        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(Secret::new);
        if api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY is not set; /ask will answer with a configuration error");
        }

        Ok(AskConfig {
            common: common_config,
            gemini: GeminiConfig {
                api_key,
                model: get_env("GEMINI_MODEL", Some(DEFAULT_MODEL))?,
                api_base_url: get_env("GEMINI_API_BASE", Some(GEMINI_API_BASE))?,
                timeout: Duration::from_secs(timeout_secs),
            },
            cors: CorsPolicy::parse(&get_env("CORS_ALLOWED_ORIGINS", None)?)?,
        })
    }
}

fn get_env(key: &str, default: Option<&str>) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::ConfigError(anyhow::anyhow!(
                "{} is required but not set",
                key
            ))),
        },
    }
}
