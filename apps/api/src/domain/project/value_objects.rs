use super::errors::DomainError;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use ts_rs::TS;
use validator::{Validate, ValidationErrors};

lazy_static! {
    static ref HTTP_URL_REGEX: regex::Regex =
        regex::Regex::new(r"(?i)^https?://[^\s/?#]+[^\s]*$").unwrap();
}

/// Categories offered by the submission form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Category {
    #[serde(rename = "UI Library")]
    UiLibrary,
    #[serde(rename = "CSS Framework")]
    CssFramework,
    #[serde(rename = "Animation")]
    Animation,
    #[serde(rename = "UI Kit")]
    UiKit,
    #[serde(rename = "Design System")]
    DesignSystem,
    #[serde(rename = "UI Effects")]
    UiEffects,
    #[serde(rename = "Accessibility")]
    Accessibility,
    #[serde(rename = "Audio Visualization")]
    AudioVisualization,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::UiLibrary,
        Category::CssFramework,
        Category::Animation,
        Category::UiKit,
        Category::DesignSystem,
        Category::UiEffects,
        Category::Accessibility,
        Category::AudioVisualization,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::UiLibrary => "UI Library",
            Category::CssFramework => "CSS Framework",
            Category::Animation => "Animation",
            Category::UiKit => "UI Kit",
            Category::DesignSystem => "Design System",
            Category::UiEffects => "UI Effects",
            Category::Accessibility => "Accessibility",
            Category::AudioVisualization => "Audio Visualization",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .find(|c| c.as_str() == trimmed)
            .or_else(|| {
                Self::ALL
                    .iter()
                    .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            })
            .copied()
            .ok_or_else(|| DomainError::ValidationError(format!("Unknown category: {}", trimmed)))
    }
}

/// A submission that passed validation and is ready to persist.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct NewProject {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Title must be between 1 and 100 characters"
    ))]
    pub title: String,

    #[validate(length(
        min = 1,
        max = 1000,
        message = "Description must be between 1 and 1000 characters"
    ))]
    pub description: String,

    pub category: Category,

    #[validate(
        length(max = 2048, message = "URL is too long"),
        regex(path = *HTTP_URL_REGEX, message = "URL must be an absolute http(s) link")
    )]
    pub url: String,

    #[validate(
        length(max = 2048, message = "Image URL is too long"),
        regex(path = *HTTP_URL_REGEX, message = "Image URL must be an absolute http(s) link")
    )]
    pub image_url: Option<String>,
}

impl NewProject {
    /// Normalises raw form input and validates it.
    ///
    /// Text fields are trimmed and a blank image URL means "no image".
    pub fn new(
        title: &str,
        description: &str,
        category: &str,
        url: &str,
        image_url: Option<&str>,
    ) -> Result<Self, DomainError> {
        let project = Self {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            category: category.parse()?,
            url: url.trim().to_string(),
            image_url: image_url
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        };
        project
            .validate()
            .map_err(|e| DomainError::ValidationError(describe_validation_errors(&e)))?;
        Ok(project)
    }
}

/// Flattens validator output into one stable, user-facing message.
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .map(|(field, errs)| {
            let messages: Vec<String> = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            format!("{}: {}", field, messages.join(", "))
        })
        .collect::<Vec<_>>()
        .join("; ")
}
