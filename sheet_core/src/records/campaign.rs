//! Campaigns, notes, the campaign log and audio tracks

use super::meta::{RecordMeta, Timestamps, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which view players and DMs are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CampaignMode {
    #[serde(rename = "combat")]
    Combat,
    #[default]
    #[serde(rename = "out-of-combat")]
    OutOfCombat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignRole {
    Dm,
    Player,
}

/// Denormalized user details kept on campaign documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub role: CampaignRole,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_name: Option<String>,
}

pub type CampaignUserSummaries = BTreeMap<UserId, UserSummary>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(flatten)]
    pub timestamps: Timestamps,
    /// Player-facing name of campaign
    pub name: String,
    /// Display color, e.g. `#aa3300`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Campaign owners
    #[serde(default)]
    pub dm_user_ids: Vec<UserId>,
    #[serde(default)]
    pub dm_invite_emails: Vec<String>,
    #[serde(default)]
    pub player_user_ids: Vec<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_summaries: Option<CampaignUserSummaries>,
    #[serde(default)]
    pub player_invite_emails: Vec<String>,
    #[serde(default)]
    pub mode: CampaignMode,
}

impl Campaign {
    pub fn new(name: impl Into<String>, timestamps: Timestamps) -> Self {
        Campaign {
            timestamps,
            name: name.into(),
            color: None,
            description: None,
            dm_user_ids: Vec::new(),
            dm_invite_emails: Vec::new(),
            player_user_ids: Vec::new(),
            user_summaries: None,
            player_invite_emails: Vec::new(),
            mode: CampaignMode::OutOfCombat,
        }
    }

    /// Role a user holds in this campaign; DM wins if listed as both
    pub fn role_of(&self, user_id: &str) -> Option<CampaignRole> {
        if self.dm_user_ids.iter().any(|id| id == user_id) {
            Some(CampaignRole::Dm)
        } else if self.player_user_ids.iter().any(|id| id == user_id) {
            Some(CampaignRole::Player)
        } else {
            None
        }
    }

    /// Whether an email has a pending invite, and for which role
    pub fn pending_invite(&self, email: &str) -> Option<CampaignRole> {
        if self.dm_invite_emails.iter().any(|e| e.eq_ignore_ascii_case(email)) {
            Some(CampaignRole::Dm)
        } else if self
            .player_invite_emails
            .iter()
            .any(|e| e.eq_ignore_ascii_case(email))
        {
            Some(CampaignRole::Player)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub body: String,
    /// Tags for searching
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Note {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// What happened at a logged moment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogKind {
    #[serde(rename = "campaign created")]
    CampaignCreated,
    #[serde(rename = "campaign updated")]
    CampaignUpdated,
    #[serde(rename = "player invited")]
    PlayerInvited,
    #[serde(rename = "player uninvited")]
    PlayerUninvited,
    #[serde(rename = "dm invited")]
    DmInvited,
    #[serde(rename = "dm uninvited")]
    DmUninvited,
    #[serde(rename = "player invite accepted")]
    PlayerInviteAccepted,
    #[serde(rename = "dm invite accepted")]
    DmInviteAccepted,
    #[serde(rename = "player invite declined")]
    PlayerInviteDeclined,
    #[serde(rename = "dm invite declined")]
    DmInviteDeclined,
    #[serde(rename = "item")]
    Item,
    #[serde(rename = "note")]
    Note,
    #[serde(rename = "spell")]
    Spell,
    #[serde(rename = "rule")]
    Rule,
    #[serde(rename = "chat")]
    Chat,
}

/// Something logged at a particular moment in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogItem {
    #[serde(flatten)]
    pub timestamps: Timestamps,
    #[serde(rename = "type")]
    pub kind: LogKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
    #[serde(default)]
    pub source_user_ids: Vec<UserId>,
    #[serde(default)]
    pub target_user_ids: Vec<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_summaries: Option<CampaignUserSummaries>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audio {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_playing: bool,
    #[serde(default)]
    pub is_looped: bool,
    /// Volume between 0.0 and 1.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_volume: Option<f64>,
    /// Path in the external file store
    pub file_path: String,
}

impl Audio {
    /// Default volume clamped to 0.0..=1.0, full volume when unset
    pub fn volume(&self) -> f64 {
        self.default_volume
            .filter(|v| v.is_finite())
            .map(|v| v.clamp(0.0, 1.0))
            .unwrap_or(1.0)
    }
}
