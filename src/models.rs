// src/models.rs
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::LogoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Industry {
    Tech,
    Food,
    Health,
    Fashion,
    Finance,
    Education,
    Other,
}

impl Industry {
    pub const ALL: [Industry; 7] = [
        Industry::Tech,
        Industry::Food,
        Industry::Health,
        Industry::Fashion,
        Industry::Finance,
        Industry::Education,
        Industry::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Tech => "tech",
            Industry::Food => "food",
            Industry::Health => "health",
            Industry::Fashion => "fashion",
            Industry::Finance => "finance",
            Industry::Education => "education",
            Industry::Other => "other",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Industry::Tech => "Technology",
            Industry::Food => "Food & Drink",
            Industry::Health => "Health & Wellness",
            Industry::Fashion => "Fashion",
            Industry::Finance => "Finance",
            Industry::Education => "Education",
            Industry::Other => "Other",
        }
    }
}

impl std::fmt::Display for Industry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for Industry {
    type Error = LogoError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Industry::ALL
            .into_iter()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| LogoError::Validation(format!("Unknown industry: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoStyle {
    Modern,
    Classic,
    Minimal,
    Fun,
    Handcrafted,
}

impl LogoStyle {
    pub const ALL: [LogoStyle; 5] = [
        LogoStyle::Modern,
        LogoStyle::Classic,
        LogoStyle::Minimal,
        LogoStyle::Fun,
        LogoStyle::Handcrafted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogoStyle::Modern => "modern",
            LogoStyle::Classic => "classic",
            LogoStyle::Minimal => "minimal",
            LogoStyle::Fun => "fun",
            LogoStyle::Handcrafted => "handcrafted",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LogoStyle::Modern => "Modern",
            LogoStyle::Classic => "Classic",
            LogoStyle::Minimal => "Minimal",
            LogoStyle::Fun => "Fun",
            LogoStyle::Handcrafted => "Handcrafted",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            LogoStyle::Modern => "Clean and contemporary",
            LogoStyle::Classic => "Timeless and professional",
            LogoStyle::Minimal => "Simple and streamlined",
            LogoStyle::Fun => "Playful and colorful",
            LogoStyle::Handcrafted => "Artistic and organic",
        }
    }
}

impl std::fmt::Display for LogoStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for LogoStyle {
    type Error = LogoError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        LogoStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| LogoError::Validation(format!("Unknown logo style: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    #[default]
    Stacked,
    Horizontal,
    IconOnly,
    TextOnly,
}

impl Layout {
    pub const ALL: [Layout; 4] = [
        Layout::Stacked,
        Layout::Horizontal,
        Layout::IconOnly,
        Layout::TextOnly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Stacked => "stacked",
            Layout::Horizontal => "horizontal",
            Layout::IconOnly => "icon-only",
            Layout::TextOnly => "text-only",
        }
    }

    /// Title-cased label, e.g. "Icon Only".
    pub fn label(&self) -> String {
        self.as_str()
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }
}

impl TryFrom<&str> for Layout {
    type Error = LogoError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Layout::ALL
            .into_iter()
            .find(|layout| layout.as_str() == s)
            .ok_or_else(|| LogoError::Validation(format!("Unknown layout: {}", s)))
    }
}

/// Typography choices offered by the customization form. The data model
/// accepts any string.
pub const TYPOGRAPHY_CHOICES: [(&str, &str); 4] = [
    ("sans-serif", "Sans Serif (Modern)"),
    ("serif", "Serif (Classic)"),
    ("monospace", "Monospace (Tech)"),
    ("cursive", "Cursive (Elegant)"),
];

pub const PALETTE: [&str; 5] = ["#4f46e5", "#10b981", "#EF4444", "#F59E0B", "#7C3AED"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customization {
    pub color: String,
    pub layout: Layout,
    pub typography: String,
}

impl Default for Customization {
    fn default() -> Self {
        Self {
            color: "#4f46e5".to_string(),
            layout: Layout::Stacked,
            typography: "sans-serif".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoConcept {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    pub description: String,
    #[serde(default)]
    pub design_philosophy: Option<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub typography: Vec<String>,
}

#[cfg(test)]
impl LogoConcept {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: None,
            description: description.into(),
            design_philosophy: None,
            colors: Vec::new(),
            typography: Vec::new(),
        }
    }
}

// Models are inconsistent about quoting ids.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "concept id must be a string or number, got {}",
            other
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoOption {
    pub id: String,
    pub image_url: String,
    pub selected: bool,
    pub concept: Option<LogoConcept>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadFormat {
    Png,
    Svg,
}

impl DownloadFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            DownloadFormat::Png => "png",
            DownloadFormat::Svg => "svg",
        }
    }
}

impl TryFrom<&str> for DownloadFormat {
    type Error = LogoError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "png" => Ok(DownloadFormat::Png),
            "svg" => Ok(DownloadFormat::Svg),
            _ => Err(LogoError::Validation(format!(
                "Unsupported download format: {}",
                s
            ))),
        }
    }
}

/// Client-side download the renderer should trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadAction {
    pub url: String,
    pub filename: String,
    pub format: DownloadFormat,
}
