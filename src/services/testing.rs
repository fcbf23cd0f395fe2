// src/services/testing.rs
//! Scripted model used by tests in place of a hosted provider.

use crate::errors::LogoError;
use crate::services::llm_service::TextModel;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, LogoError>>>,
    prompts: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Result<String, LogoError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextModel for ScriptedModel {
    async fn generate(&self, prompt: &str) -> Result<String, LogoError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LogoError::Generation("no scripted reply".into())))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// A typical model answer: chatter around a fenced JSON array of `n` concepts.
pub fn concepts_reply(n: usize) -> String {
    let concepts: Vec<serde_json::Value> = (1..=n)
        .map(|i| {
            serde_json::json!({
                "id": i.to_string(),
                "description": format!("Concept {} with a bold monogram", i),
                "designPhilosophy": "Clarity first",
                "colors": ["#4f46e5", "#10b981"],
                "typography": ["Inter", "Merriweather"]
            })
        })
        .collect();
    format!(
        "Here are your concepts:\n```json\n{}\n```\nLet me know if you want more.",
        serde_json::to_string_pretty(&concepts).unwrap()
    )
}
