// src/wizard/event.rs
use serde::Deserialize;

use crate::models::{DownloadFormat, LogoOption};

/// Customization field addressed by [`Event::SetCustomizationField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomizationKey {
    Color,
    Layout,
    Typography,
}

/// Everything that can move a wizard forward.
///
/// The renderer sends the UI variants as JSON tagged by `type`. The two
/// generation completions are produced internally by the session service
/// and cannot be deserialized.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SubmitName {
        name: String,
    },
    SelectIndustry {
        industry: String,
    },
    ToggleStyle {
        style: String,
    },
    RequestGeneration {
        #[serde(default)]
        colors: Option<Vec<String>>,
    },
    #[serde(skip_deserializing)]
    GenerationSucceeded {
        token: u64,
        options: Vec<LogoOption>,
    },
    #[serde(skip_deserializing)]
    GenerationFailed {
        token: u64,
        message: String,
    },
    SelectLogo {
        id: String,
    },
    ProceedToCustomize,
    SetCustomizationField {
        field: CustomizationKey,
        value: String,
    },
    SaveCustomization,
    GoBack,
    RequestDownload {
        format: DownloadFormat,
    },
    Reset,
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::SubmitName { .. } => "submit_name",
            Event::SelectIndustry { .. } => "select_industry",
            Event::ToggleStyle { .. } => "toggle_style",
            Event::RequestGeneration { .. } => "request_generation",
            Event::GenerationSucceeded { .. } => "generation_succeeded",
            Event::GenerationFailed { .. } => "generation_failed",
            Event::SelectLogo { .. } => "select_logo",
            Event::ProceedToCustomize => "proceed_to_customize",
            Event::SetCustomizationField { .. } => "set_customization_field",
            Event::SaveCustomization => "save_customization",
            Event::GoBack => "go_back",
            Event::RequestDownload { .. } => "request_download",
            Event::Reset => "reset",
        }
    }
}
