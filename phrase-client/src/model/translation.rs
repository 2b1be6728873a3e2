use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::LocalePreview;

/// The content of one key in one locale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    /// Identifier assigned by Phrase.
    pub id: String,
    /// Translated text.
    pub content: String,
    /// Whether the translation still needs review.
    #[serde(default)]
    pub unverified: Option<bool>,
    /// Whether the translation is excluded from downloads.
    #[serde(default)]
    pub excluded: Option<bool>,
    /// Locale of the translation.
    pub locale: LocalePreview,
    /// Key the translation belongs to.
    pub key: TranslationKey,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The key a [`Translation`] belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationKey {
    /// Identifier assigned by Phrase.
    pub id: String,
    /// Key name.
    pub name: String,
}

/// Body of a translation creation.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CreateTranslation {
    /// Locale of the translation.
    pub locale_id: String,
    /// Key of the translation.
    pub key_id: String,
    /// Translated text.
    pub content: String,
    /// Branch the change applies to, the main branch when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Plural form this translation provides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plural_suffix: Option<String>,
    /// Whether the translation still needs review.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unverified: Option<bool>,
    /// Whether the translation is excluded from downloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded: Option<bool>,
}

impl CreateTranslation {
    /// A translation with only the required fields set.
    pub fn new(
        locale_id: impl Into<String>,
        key_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            locale_id: locale_id.into(),
            key_id: key_id.into(),
            content: content.into(),
            ..Self::default()
        }
    }
}
