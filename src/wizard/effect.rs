// src/wizard/effect.rs
use serde::Serialize;

use crate::models::{DownloadAction, Industry, LogoStyle};

/// Inputs for one concept generation call, captured when it was requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConceptRequest {
    pub business_name: String,
    pub industry: Industry,
    pub styles: Vec<LogoStyle>,
    pub colors: Option<Vec<String>>,
}

/// Work the state machine asks its owner to perform.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    /// Call the concept generator and report back with `token`.
    GenerateConcepts { token: u64, request: ConceptRequest },
    /// Hand a download to the renderer.
    Download(DownloadAction),
}
