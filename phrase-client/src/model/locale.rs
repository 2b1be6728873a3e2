use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A locale of a project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhraseLocale {
    /// Identifier assigned by Phrase.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Locale code such as `de-DE`.
    pub code: String,
    /// Whether this is the default locale.
    #[serde(default)]
    pub default: Option<bool>,
    /// Whether this is a main locale.
    #[serde(default)]
    pub main: Option<bool>,
    /// Whether the locale is written right to left.
    #[serde(default)]
    pub rtl: Option<bool>,
    /// Locale this one is translated from.
    #[serde(default)]
    pub source_locale: Option<LocalePreview>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The short form in which other resources refer to a locale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalePreview {
    /// Identifier assigned by Phrase.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Locale code.
    pub code: String,
}

/// Body of a locale creation or update.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CreatePhraseLocale {
    /// Display name.
    pub name: String,
    /// Locale code such as `de-DE`.
    pub code: String,
    /// Branch the change applies to, the main branch when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Whether this is the default locale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
    /// Whether this is a main locale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<bool>,
    /// Whether the locale is written right to left.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rtl: Option<bool>,
    /// Locale this one is translated from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_locale_id: Option<String>,
    /// Marks new translations in this locale as unverified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unverify_new_translations: Option<bool>,
    /// Marks updated translations in this locale as unverified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unverify_updated_translations: Option<bool>,
    /// Machine-translates new keys into this locale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autotranslate: Option<bool>,
}

impl CreatePhraseLocale {
    /// A locale with only its name and code set.
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            ..Self::default()
        }
    }
}

/// Query options of a JSON locale download.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DownloadLocaleOptions {
    /// Escape `'` as `''` in the downloaded messages.
    pub escape_single_quotes: bool,
    /// Include keys without a translation.
    pub include_empty_translations: bool,
    /// Locale whose translations fill in missing ones.
    pub fallback_locale_id: Option<String>,
    /// Branch the change applies to, the main branch when `None`.
    pub branch: Option<String>,
    /// Comma separated tags restricting the downloaded keys.
    pub tags: Option<String>,
}

/// One entry of a locale downloaded as JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Translated text.
    pub message: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A locale downloaded as JSON, keyed by translation key name.
pub type PhraseLocaleMessages = HashMap<String, Message>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_without_description() {
        let messages: PhraseLocaleMessages = serde_json::from_str(
            r#"{
                "greeting": { "message": "Hallo" },
                "farewell": { "message": "Tschüss", "description": "Shown on logout" }
            }"#,
        )
        .unwrap();

        assert_eq!(messages["greeting"].description, None);
        assert_eq!(messages["farewell"].description.as_deref(), Some("Shown on logout"));
    }
}
