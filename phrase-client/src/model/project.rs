use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Phrase project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhraseProject {
    /// Identifier assigned by Phrase.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Default file format, for example `properties`.
    #[serde(default)]
    pub main_format: Option<String>,
    /// Whether the project shares its translation memory.
    #[serde(default)]
    pub shares_translation_memory: Option<bool>,
    /// URL of the project image.
    #[serde(default)]
    pub project_image_url: Option<String>,
    /// Account owning the project.
    #[serde(default)]
    pub account_id: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of a project creation.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CreatePhraseProject {
    /// Display name.
    pub name: String,
    /// Default file format, for example `properties`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_format: Option<String>,
    /// Whether the project shares its translation memory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares_translation_memory: Option<bool>,
    /// Drops the current project image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_project_image: Option<bool>,
    /// Account owning the project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

impl CreatePhraseProject {
    /// A project with only its name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Body of a project update. Fields left `None` keep their current value.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UpdatePhraseProject {
    /// Display name.
    pub name: String,
    /// Default file format, for example `properties`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_format: Option<String>,
    /// Whether the project shares its translation memory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shares_translation_memory: Option<bool>,
    /// Drops the current project image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_project_image: Option<bool>,
    /// Account owning the project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}
