use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// A translation key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Key {
    /// Identifier assigned by Phrase.
    pub id: String,
    /// Key name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Hash of the key name.
    #[serde(default)]
    pub name_hash: Option<String>,
    /// Whether the key has plural forms.
    #[serde(default)]
    pub plural: Option<bool>,
    /// Tags attached to the key.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Type of the value, `string` unless set otherwise.
    #[serde(default)]
    pub data_type: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of a key creation.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CreateKey {
    /// Key name.
    pub name: String,
    /// Sent as a single comma separated string.
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "comma_separated")]
    pub tags: Vec<String>,
    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Branch the change applies to, the main branch when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Whether the key has plural forms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plural: Option<bool>,
    /// Plural form of the name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_plural: Option<String>,
    /// Type of the value, `string` unless set otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    /// Maximum length of a translation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_characters_allowed: Option<u32>,
    /// Whether formatting placeholders are ignored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unformatted: Option<bool>,
    /// Whether whitespace is preserved in XML formats.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xml_space_preserve: Option<bool>,
    /// File the key was first uploaded from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_file: Option<String>,
    /// Format string used for localized file names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localized_format_string: Option<String>,
    /// Key used for localized file names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localized_format_key: Option<String>,
}

impl CreateKey {
    /// A key with only its name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

fn comma_separated<S>(tags: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&tags.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_joined() {
        let key = CreateKey {
            tags: vec!["abc".into(), "def".into()],
            plural: Some(false),
            ..CreateKey::new("button.ok")
        };

        assert_eq!(
            serde_json::to_value(&key).unwrap(),
            serde_json::json!({ "name": "button.ok", "tags": "abc,def", "plural": false })
        );
    }

    #[test]
    fn test_response_tags_are_a_list() {
        let key: Key =
            serde_json::from_str(r#"{"id":"k1","name":"button.ok","tags":["abc","def"]}"#).unwrap();
        assert_eq!(key.tags, vec!["abc", "def"]);
    }
}
