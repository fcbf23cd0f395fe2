// src/wizard/state.rs
use serde::Serialize;

use crate::models::{Customization, Industry, LogoOption, LogoStyle};

/// The five wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    NamingInput,
    IndustrySelect,
    StyleSelect,
    OptionReview,
    Customize,
}

impl Step {
    /// 1-based position in the flow.
    pub fn number(&self) -> u8 {
        match self {
            Step::NamingInput => 1,
            Step::IndustrySelect => 2,
            Step::StyleSelect => 3,
            Step::OptionReview => 4,
            Step::Customize => 5,
        }
    }

    pub fn previous(&self) -> Option<Self> {
        match self {
            Step::NamingInput => None,
            Step::IndustrySelect => Some(Step::NamingInput),
            Step::StyleSelect => Some(Step::IndustrySelect),
            Step::OptionReview => Some(Step::StyleSelect),
            Step::Customize => Some(Step::OptionReview),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::NamingInput => "naming_input",
            Step::IndustrySelect => "industry_select",
            Step::StyleSelect => "style_select",
            Step::OptionReview => "option_review",
            Step::Customize => "customize",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WizardState {
    pub step: Step,
    pub business_name: String,
    pub industry: Option<Industry>,
    /// Insertion-ordered, never holds duplicates.
    pub styles: Vec<LogoStyle>,
    pub options: Vec<LogoOption>,
    pub selected_logo: Option<String>,
    pub customization: Customization,
    pub error: Option<String>,
    pub is_generating: bool,
    /// Bumped on every generation request and on reset. Completions
    /// carrying any other value are stale.
    pub generation_token: u64,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            step: Step::NamingInput,
            business_name: String::new(),
            industry: None,
            styles: Vec::new(),
            options: Vec::new(),
            selected_logo: None,
            customization: Customization::default(),
            error: None,
            is_generating: false,
            generation_token: 0,
        }
    }
}

/// What the Customize step should show.
#[derive(Debug, PartialEq)]
pub enum CustomizeTarget<'a> {
    Logo(&'a LogoOption),
    /// The selection no longer resolves; the only way out is back to
    /// option review.
    NotFound,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_generate(&self) -> bool {
        !self.styles.is_empty() && !self.is_generating
    }

    pub fn can_proceed(&self) -> bool {
        self.selected_option().is_some()
    }

    pub fn selected_option(&self) -> Option<&LogoOption> {
        let id = self.selected_logo.as_deref()?;
        self.options.iter().find(|option| option.id == id)
    }

    pub fn customize_target(&self) -> CustomizeTarget<'_> {
        match self.selected_option() {
            Some(option) => CustomizeTarget::Logo(option),
            None => CustomizeTarget::NotFound,
        }
    }
}
