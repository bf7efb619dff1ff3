//! Data models for cards, decks and tags
//!
//! Field names are camelCase on the wire and timestamps are epoch
//! milliseconds, matching the stored JSON layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A front/back question-answer pair owned by exactly one deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: Uuid,
    pub front: String,
    pub back: String,
    pub deck_id: Uuid,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
    /// Review metadata is persisted but nothing schedules reviews yet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<f32>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub last_reviewed: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
}

impl Card {
    pub fn new(deck_id: Uuid, front: String, back: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            front,
            back,
            deck_id,
            created_at: now,
            updated_at: now,
            difficulty: None,
            last_reviewed: None,
            review_count: None,
        }
    }
}

/// A named collection of cards, optionally tagged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDeck {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Never `Some` and empty once persisted; saves normalize an empty
    /// list to absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<Uuid>>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl CardDeck {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            description: None,
            tag_ids: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_tags(mut self, tag_ids: Vec<Uuid>) -> Self {
        self.tag_ids = if tag_ids.is_empty() { None } else { Some(tag_ids) };
        self
    }
}

/// A named, colored label that decks can carry many of
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: Uuid,
    /// Stored trimmed and lower-cased; unique case-insensitively
    pub name: String,
    #[serde(default)]
    pub color: TagColor,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Tag {
    pub fn new(name: String, color: TagColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            color,
            created_at: Utc::now(),
        }
    }
}

/// Badge color for a tag, from a fixed six-value palette
///
/// Serialized as the hex literal so the stored form stays a plain CSS
/// color string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagColor {
    #[serde(rename = "#646cff")]
    Indigo,
    #[serde(rename = "#74ffb3")]
    Mint,
    #[serde(rename = "#ff6464")]
    Coral,
    #[serde(rename = "#ffb364")]
    Amber,
    #[serde(rename = "#64b3ff")]
    Sky,
    #[serde(rename = "#b364ff")]
    Violet,
}

impl Default for TagColor {
    fn default() -> Self {
        Self::Indigo
    }
}

impl TagColor {
    pub const ALL: [TagColor; 6] = [
        Self::Indigo,
        Self::Mint,
        Self::Coral,
        Self::Amber,
        Self::Sky,
        Self::Violet,
    ];

    pub fn as_hex(&self) -> &'static str {
        match self {
            Self::Indigo => "#646cff",
            Self::Mint => "#74ffb3",
            Self::Coral => "#ff6464",
            Self::Amber => "#ffb364",
            Self::Sky => "#64b3ff",
            Self::Violet => "#b364ff",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Indigo => "indigo",
            Self::Mint => "mint",
            Self::Coral => "coral",
            Self::Amber => "amber",
            Self::Sky => "sky",
            Self::Violet => "violet",
        }
    }
}

impl std::str::FromStr for TagColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|color| color.name() == s || color.as_hex() == s)
            .copied()
            .ok_or_else(|| format!("unknown color '{}' (expected one of: indigo, mint, coral, amber, sky, violet)", s))
    }
}
