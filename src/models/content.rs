use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::error::RankingError;

/// Closed set of content kinds the engine knows how to score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Video,
    Project,
    Challenge,
}

impl Kind {
    pub const ALL: [Kind; 3] = [Kind::Video, Kind::Project, Kind::Challenge];

    /// Parses the upstream type label. Challenges are also stored as "desafio".
    pub fn parse(raw: &str) -> Option<Kind> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "video" | "videos" => Some(Kind::Video),
            "project" | "projects" => Some(Kind::Project),
            "challenge" | "challenges" | "desafio" | "desafios" => Some(Kind::Challenge),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Video => "video",
            Kind::Project => "project",
            Kind::Challenge => "challenge",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Engagement counters after validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementCounters {
    pub views: u64,
    pub likes: u64,
    pub participants: u64,
    pub followers: u64,
}

/// Raw content record as supplied by the content repository
///
/// Counters arrive as plain JSON numbers and are only trusted after
/// conversion into a [`ContentItem`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    pub id: String,
    #[serde(alias = "type")]
    pub kind: String,
    #[serde(default)]
    pub views: Option<f64>,
    #[serde(default)]
    pub likes: Option<f64>,
    #[serde(default)]
    pub participants: Option<f64>,
    #[serde(default)]
    pub followers: Option<f64>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// A validated, read-only content snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    pub kind: Kind,
    #[serde(skip)]
    pub counters: EngagementCounters,
    #[serde(skip)]
    pub featured: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl TryFrom<ContentRecord> for ContentItem {
    type Error = RankingError;

    fn try_from(record: ContentRecord) -> Result<Self, Self::Error> {
        let kind = Kind::parse(&record.kind).ok_or_else(|| RankingError::UnsupportedKind {
            id: record.id.clone(),
            kind: record.kind.clone(),
        })?;

        let counters = EngagementCounters {
            views: validate_counter(&record.id, "views", record.views)?,
            likes: validate_counter(&record.id, "likes", record.likes)?,
            participants: validate_counter(&record.id, "participants", record.participants)?,
            followers: validate_counter(&record.id, "followers", record.followers)?,
        };

        Ok(ContentItem {
            id: record.id,
            kind,
            counters,
            featured: record.featured,
            status: record.status,
            created_at: record.created_at,
            category: record.category,
            title: record.title,
        })
    }
}

/// Converts a raw counter to an integer, rejecting anything that is not a
/// non-negative whole number. Absent counters count as zero.
///
/// `u64::MAX as f64` rounds up to 2^64, so that value and anything above it
/// is out of range. Counters arrive as JSON numbers, which are exact only up
/// to 2^53; larger counts are accepted after rounding to the nearest `f64`.
fn validate_counter(id: &str, counter: &'static str, value: Option<f64>) -> Result<u64, RankingError> {
    let Some(value) = value else {
        return Ok(0);
    };

    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value >= u64::MAX as f64 {
        return Err(RankingError::InvalidCounter {
            id: id.to_string(),
            counter,
            value,
        });
    }

    Ok(value as u64)
}
