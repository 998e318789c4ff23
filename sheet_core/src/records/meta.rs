//! Metadata shared by stored records: ownership, sharing, timestamps,
//! source citations and rich-text entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of an application user
pub type UserId = String;

/// Who may see a shareable record besides its owner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Only owners (and explicitly listed users)
    #[default]
    Owners,
    /// Everyone in the campaign
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sharing {
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shared_with_user_ids: Vec<UserId>,
}

/// Creation and last-update instants, stored as epoch milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timestamps {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl Timestamps {
    pub fn new(at: DateTime<Utc>) -> Self {
        Timestamps {
            created_at: at,
            updated_at: at,
        }
    }

    /// Mark the record as updated at `at`
    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at.max(self.created_at);
    }
}

/// Ownership, sharing and timestamps of a user-created record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMeta {
    pub owner_user_id: UserId,
    #[serde(flatten)]
    pub sharing: Sharing,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl RecordMeta {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_user_id == user_id
    }
}

/// Book and page citation for reference data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    #[serde(default)]
    pub pages: Vec<u32>,
}

/// Rich-text body made of paragraphs and named sections
pub type Entries = Vec<Entry>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Text(String),
    Section {
        #[serde(rename = "type")]
        kind: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        entries: Vec<Entry>,
    },
    /// Tables, lists and other blocks kept as-is
    Other(serde_json::Value),
}

impl Entry {
    /// Flatten to plain paragraphs, section names included
    pub fn push_text(&self, out: &mut Vec<String>) {
        match self {
            Entry::Text(text) => out.push(text.clone()),
            Entry::Section { name, entries, .. } => {
                if let Some(name) = name {
                    out.push(name.clone());
                }
                for entry in entries {
                    entry.push_text(out);
                }
            }
            Entry::Other(_) => {}
        }
    }
}

/// Plain-text rendering of an entries body, one paragraph per line
pub fn entries_text(entries: &[Entry]) -> String {
    let mut out = Vec::new();
    for entry in entries {
        entry.push_text(&mut out);
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_meta_flattens() {
        let json = r#"{
            "ownerUserId": "u1",
            "visibility": "all",
            "createdAt": 1700000000000,
            "updatedAt": 1700000500000
        }"#;

        let meta: RecordMeta = serde_json::from_str(json).unwrap();
        assert!(meta.is_owned_by("u1"));
        assert_eq!(meta.sharing.visibility, Visibility::All);
        assert!(meta.sharing.shared_with_user_ids.is_empty());
        assert_eq!(meta.timestamps.created_at.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_touch_never_precedes_creation() {
        let created = DateTime::<Utc>::from_timestamp_millis(2_000).unwrap();
        let earlier = DateTime::<Utc>::from_timestamp_millis(1_000).unwrap();
        let mut stamps = Timestamps::new(created);
        stamps.touch(earlier);
        assert_eq!(stamps.updated_at, created);
    }

    #[test]
    fn test_entries_text() {
        let json = r#"[
            "You gain the following benefits.",
            {"type": "entries", "name": "Keen Mind", "entries": ["You always know north."]},
            {"type": "list", "items": ["a", "b"]}
        ]"#;

        let entries: Entries = serde_json::from_str(json).unwrap();
        assert!(matches!(entries[2], Entry::Other(_)));
        assert_eq!(
            entries_text(&entries),
            "You gain the following benefits.\nKeen Mind\nYou always know north."
        );
    }
}
