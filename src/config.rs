// src/config.rs
use crate::errors::LogoError;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Gemini,
    OpenAi,
    Anthropic,
}

impl Provider {
    fn parse(s: &str) -> Result<Self, LogoError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Provider::Gemini),
            "openai" => Ok(Provider::OpenAi),
            "anthropic" => Ok(Provider::Anthropic),
            other => Err(LogoError::InvalidProvider(other.to_string())),
        }
    }

    fn key_var(&self) -> &'static str {
        match self {
            Provider::Gemini => "GEMINI_API_KEY",
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    fn default_model(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini-pro",
            Provider::OpenAi => "gpt-4o",
            Provider::Anthropic => "claude-3-5-sonnet-20241022",
        }
    }

    fn default_base_url(&self) -> &'static str {
        match self {
            Provider::Gemini => "https://generativelanguage.googleapis.com",
            Provider::OpenAi => "https://api.openai.com",
            Provider::Anthropic => "https://api.anthropic.com",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: Provider,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

/// Service configuration.
///
/// | Env Var                        | Default                 |
/// |--------------------------------|-------------------------|
/// | `LOGO_LLM_PROVIDER`            | `gemini`                |
/// | `GEMINI_API_KEY` etc.          | required for provider   |
/// | `LOGO_LLM_MODEL`               | provider default        |
/// | `LOGO_LLM_BASE_URL`            | provider default        |
/// | `LOGO_CONCEPT_COUNT`           | `4`                     |
/// | `LOGO_GENERATION_TIMEOUT_SECS` | `30`                    |
/// | `LOGO_SESSION_TTL_SECS`        | `86400`                 |
/// | `LOGO_BIND_ADDR`               | `0.0.0.0:8080`          |
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub concept_count: usize,
    pub generation_timeout: Duration,
    pub session_ttl: Duration,
    pub bind_addr: String,
}

impl AppConfig {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, LogoError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, LogoError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = match lookup("LOGO_LLM_PROVIDER") {
            Some(raw) => Provider::parse(&raw)?,
            None => Provider::Gemini,
        };

        let api_key = lookup(provider.key_var())
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                LogoError::Config(format!(
                    "{} must be set for the {:?} provider",
                    provider.key_var(),
                    provider
                ))
            })?;

        let model = lookup("LOGO_LLM_MODEL").unwrap_or_else(|| provider.default_model().into());
        let base_url =
            lookup("LOGO_LLM_BASE_URL").unwrap_or_else(|| provider.default_base_url().into());

        let concept_count: usize = parse_or(&lookup, "LOGO_CONCEPT_COUNT", 4)?;
        if concept_count == 0 {
            return Err(LogoError::Config(
                "LOGO_CONCEPT_COUNT must be at least 1".into(),
            ));
        }

        let timeout_secs: u64 = parse_or(&lookup, "LOGO_GENERATION_TIMEOUT_SECS", 30)?;
        if timeout_secs == 0 {
            return Err(LogoError::Config(
                "LOGO_GENERATION_TIMEOUT_SECS must be at least 1".into(),
            ));
        }

        let ttl_secs: u64 = parse_or(&lookup, "LOGO_SESSION_TTL_SECS", 86400)?;
        if ttl_secs == 0 {
            return Err(LogoError::Config(
                "LOGO_SESSION_TTL_SECS must be at least 1".into(),
            ));
        }

        let bind_addr = lookup("LOGO_BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".into());

        Ok(Self {
            llm: LlmConfig {
                provider,
                api_key,
                model,
                base_url,
            },
            concept_count,
            generation_timeout: Duration::from_secs(timeout_secs),
            session_ttl: Duration::from_secs(ttl_secs),
            bind_addr,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, LogoError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| LogoError::Config(format!("{} must be a number, got {:?}", key, raw))),
        None => Ok(default),
    }
}
