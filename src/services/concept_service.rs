// src/services/concept_service.rs
use crate::errors::LogoError;
use crate::models::{Industry, LogoConcept, LogoOption, LogoStyle};
use crate::services::llm_service::TextModel;
use log::{debug, info};
use reqwest::Url;
use serde_json::Value;
use std::sync::Arc;

const PLACEHOLDER_IMAGE_BASE: &str = "https://via.placeholder.com/300x200";

/// Turns wizard inputs into logo concepts and image prompts via a text model.
pub struct ConceptService {
    model: Arc<dyn TextModel>,
    concept_count: usize,
}

impl ConceptService {
    pub fn new(model: Arc<dyn TextModel>, concept_count: usize) -> Self {
        Self {
            model,
            concept_count,
        }
    }

    pub fn concept_count(&self) -> usize {
        self.concept_count
    }

    pub async fn generate_concepts(
        &self,
        business_name: &str,
        industry: Industry,
        styles: &[LogoStyle],
        colors: Option<&[String]>,
    ) -> Result<Vec<LogoConcept>, LogoError> {
        if business_name.trim().is_empty() {
            return Err(LogoError::Validation("Business name is required".into()));
        }
        if styles.is_empty() {
            return Err(LogoError::Validation("Select at least one style".into()));
        }

        let prompt =
            build_concept_prompt(business_name, industry, styles, colors, self.concept_count);
        info!(
            "Requesting {} concepts for {:?} from {}",
            self.concept_count,
            business_name,
            self.model.name()
        );

        let text = self.model.generate(&prompt).await?;
        parse_concepts(&text, self.concept_count)
    }

    /// Ask the model for an image-generation prompt. The reply is returned as is.
    pub async fn generate_image_prompt(&self, concept: &LogoConcept) -> Result<String, LogoError> {
        if concept.description.trim().is_empty() {
            return Err(LogoError::Validation(
                "Concept description is required".into(),
            ));
        }
        self.model.generate(&build_image_prompt(concept)).await
    }
}

fn build_concept_prompt(
    business_name: &str,
    industry: Industry,
    styles: &[LogoStyle],
    colors: Option<&[String]>,
    count: usize,
) -> String {
    let styles = styles
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let palette = match colors {
        Some(colors) if !colors.is_empty() => format!("Color palette: {}.\n", colors.join(", ")),
        _ => String::new(),
    };

    format!(
        r#"Generate {count} professional logo design concepts for a {industry} business named "{business_name}".
Style preferences: {styles}.
{palette}
For each concept, provide:
1. A detailed description of the logo design
2. The design philosophy behind it
3. Suggested color schemes
4. Potential typography pairings

Respond with exactly {count} concepts as a JSON array inside a markdown code block labeled json (```json ... ```).
Each element must have these properties:
- id: string
- description: string
- designPhilosophy: string
- colors: string[]
- typography: string[]
"#,
        industry = industry.display_name(),
    )
}

fn build_image_prompt(concept: &LogoConcept) -> String {
    let philosophy = concept
        .design_philosophy
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .unwrap_or("not specified");

    format!(
        r#"Create a detailed prompt for an image generation API to create a logo based on:
- Concept: {description}
- Design Philosophy: {philosophy}
- Colors: {colors}
- Typography: {typography}

The prompt should be extremely detailed about:
- Logo style and composition
- Color usage and combinations
- Typography treatment
- Any symbolic elements
- Background requirements

Return just the prompt as a single paragraph.
"#,
        description = concept.description.trim(),
        colors = join_or_unspecified(&concept.colors),
        typography = join_or_unspecified(&concept.typography),
    )
}

fn join_or_unspecified(items: &[String]) -> String {
    if items.is_empty() {
        "not specified".to_string()
    } else {
        items.join(", ")
    }
}

/// Body of the first markdown code fence, up to the last closing fence.
fn fenced_payload(text: &str) -> Option<&str> {
    let body_start = match text.find("```json") {
        Some(open) => open + "```json".len(),
        None => {
            let open = text.find("```")? + 3;
            // Skip a language tag on the opening line, e.g. ```JSON
            let tag_end = text[open..].find('\n');
            let is_tag = |nl: usize| {
                let tag = text[open..open + nl].trim();
                tag.chars().all(|c| c.is_ascii_alphanumeric())
            };
            match tag_end {
                Some(nl) if is_tag(nl) => open + nl + 1,
                _ => open,
            }
        }
    };
    let close = text.rfind("```")?;
    if close < body_start {
        return None;
    }
    Some(text[body_start..close].trim())
}

/// Parse model output into exactly `count` concepts.
///
/// Looks for a fenced block first and falls back to the whole reply.
pub fn parse_concepts(text: &str, count: usize) -> Result<Vec<LogoConcept>, LogoError> {
    let payload = match fenced_payload(text) {
        Some(payload) => payload,
        None => {
            debug!("No code fence in model reply, parsing whole text");
            text.trim()
        }
    };
    if payload.is_empty() {
        return Err(LogoError::Generation(
            "Model returned no concept data".into(),
        ));
    }

    let value: Value = serde_json::from_str(payload)
        .map_err(|e| LogoError::Generation(format!("Model reply is not valid JSON: {}", e)))?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(LogoError::Generation(format!(
                "Expected a JSON array of concepts, got {}",
                json_kind(&other)
            )));
        }
    };

    let mut concepts = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let concept: LogoConcept = serde_json::from_value(item).map_err(|e| {
                LogoError::Generation(format!("Concept {} is malformed: {}", i + 1, e))
            })?;
            if concept.description.trim().is_empty() {
                return Err(LogoError::Generation(format!(
                    "Concept {} has no description",
                    i + 1
                )));
            }
            Ok(concept)
        })
        .collect::<Result<Vec<_>, LogoError>>()?;

    if concepts.len() < count {
        return Err(LogoError::Generation(format!(
            "Expected {} concepts, model returned {}",
            count,
            concepts.len()
        )));
    }
    concepts.truncate(count);
    Ok(concepts)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Placeholder asset for the n-th option, labelled with the business name.
pub fn placeholder_image_url(business_name: &str, n: usize) -> Result<String, LogoError> {
    Url::parse_with_params(
        PLACEHOLDER_IMAGE_BASE,
        &[("text", format!("{} Logo {}", business_name, n))],
    )
    .map(|url| url.to_string())
    .map_err(|e| LogoError::Generation(format!("Failed to build image URL: {}", e)))
}

/// Wrap concepts as selectable options with ids `logo-1`, `logo-2`, ...
pub fn to_options(
    business_name: &str,
    concepts: Vec<LogoConcept>,
) -> Result<Vec<LogoOption>, LogoError> {
    concepts
        .into_iter()
        .enumerate()
        .map(|(i, concept)| {
            Ok(LogoOption {
                id: format!("logo-{}", i + 1),
                image_url: placeholder_image_url(business_name, i + 1)?,
                selected: false,
                concept: Some(concept),
            })
        })
        .collect()
}
