use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::LocalePreview;

/// A tag with per-locale statistics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhraseTagWithStats {
    /// Tag name.
    pub name: String,
    /// Number of keys carrying the tag.
    pub keys_count: u64,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Per-locale statistics.
    #[serde(default)]
    pub statistics: Vec<TagStatistics>,
}

/// Statistics of a tag in one locale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagStatistics {
    /// Locale the entry refers to.
    pub locale: LocalePreview,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_ignore_extra_counts() {
        let tag: PhraseTagWithStats = serde_json::from_str(
            r#"{
                "name": "checkout",
                "keys_count": 12,
                "statistics": [
                    {
                        "locale": { "id": "l1", "name": "German", "code": "de-DE" },
                        "statistics": { "keys_total_count": 12 }
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(tag.keys_count, 12);
        assert_eq!(tag.statistics[0].locale.code, "de-DE");
    }
}
