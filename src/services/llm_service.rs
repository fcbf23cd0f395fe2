// src/services/llm_service.rs
use crate::config::{LlmConfig, Provider};
use crate::errors::LogoError;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Instant;

/// A hosted text-generation model: one prompt in, one block of text out.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LogoError>;
    fn name(&self) -> &str;
}

/// Build the model client selected by configuration.
pub fn from_config(config: &LlmConfig) -> Arc<dyn TextModel> {
    let client = Client::new();
    match config.provider {
        Provider::Gemini => Arc::new(GeminiModel {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            client,
        }),
        Provider::OpenAi => Arc::new(OpenAiModel {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            client,
        }),
        Provider::Anthropic => Arc::new(AnthropicModel {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            client,
        }),
    }
}

pub struct GeminiModel {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

#[async_trait]
impl TextModel for GeminiModel {
    async fn generate(&self, prompt: &str) -> Result<String, LogoError> {
        let start = Instant::now();
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&json!({
                "contents": [{
                    "parts": [{ "text": prompt }]
                }]
            }))
            .send()
            .await
            .map_err(|e| LogoError::Generation(format!("Gemini request failed: {}", e)))?;

        let result = read_json(response, "Gemini").await?;
        let text = extract_text(&result["candidates"][0]["content"]["parts"][0]["text"], "Gemini")?;

        info!(
            "Gemini {} responded in {}ms",
            self.model,
            start.elapsed().as_millis()
        );
        Ok(text)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

pub struct OpenAiModel {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

#[async_trait]
impl TextModel for OpenAiModel {
    async fn generate(&self, prompt: &str) -> Result<String, LogoError> {
        let start = Instant::now();

        let response = self
            .client
            .post(format!(
                "{}/v1/chat/completions",
                self.base_url.trim_end_matches('/')
            ))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": self.model,
                "messages": [{
                    "role": "user",
                    "content": prompt
                }],
                "max_tokens": 4096
            }))
            .send()
            .await
            .map_err(|e| LogoError::Generation(format!("OpenAI request failed: {}", e)))?;

        let result = read_json(response, "OpenAI").await?;
        let text = extract_text(&result["choices"][0]["message"]["content"], "OpenAI")?;

        info!(
            "OpenAI {} responded in {}ms",
            self.model,
            start.elapsed().as_millis()
        );
        Ok(text)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

pub struct AnthropicModel {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

#[async_trait]
impl TextModel for AnthropicModel {
    async fn generate(&self, prompt: &str) -> Result<String, LogoError> {
        let start = Instant::now();

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url.trim_end_matches('/')))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(&json!({
                "model": self.model,
                "max_tokens": 4096,
                "messages": [{
                    "role": "user",
                    "content": prompt
                }]
            }))
            .send()
            .await
            .map_err(|e| LogoError::Generation(format!("Anthropic request failed: {}", e)))?;

        let result = read_json(response, "Anthropic").await?;
        let text = extract_text(&result["content"][0]["text"], "Anthropic")?;

        info!(
            "Anthropic {} responded in {}ms",
            self.model,
            start.elapsed().as_millis()
        );
        Ok(text)
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}

async fn read_json(response: reqwest::Response, provider: &str) -> Result<Value, LogoError> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(LogoError::Generation(format!(
            "{} error ({}): {}",
            provider, status, error_text
        )));
    }

    response
        .json()
        .await
        .map_err(|e| LogoError::Generation(format!("Failed to parse {} response: {}", provider, e)))
}

fn extract_text(value: &Value, provider: &str) -> Result<String, LogoError> {
    let text = value
        .as_str()
        .ok_or_else(|| LogoError::Generation(format!("No content in {} response", provider)))?;
    debug!("{} returned {} bytes of text", provider, text.len());
    Ok(text.to_string())
}
