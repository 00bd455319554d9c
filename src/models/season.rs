use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Season {
    pub id: Uuid,
    pub number: i32,
    pub title: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Episode {
    pub id: Uuid,
    pub season_id: Uuid,
    pub number: i32,
    pub title: String,
    pub air_at: DateTime<Utc>,
    pub picks_lock_at: DateTime<Utc>,
    #[sqlx(try_from = "String")]
    pub status: EpisodeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Episode {
    /// Picks are only editable while the episode is still upcoming.
    pub fn picks_open(&self) -> bool {
        self.status == EpisodeStatus::Upcoming
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EpisodeStatus {
    Upcoming,
    Locked,
    Scored,
}

impl EpisodeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EpisodeStatus::Upcoming => "upcoming",
            EpisodeStatus::Locked => "locked",
            EpisodeStatus::Scored => "scored",
        }
    }
}

impl From<String> for EpisodeStatus {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "locked" => EpisodeStatus::Locked,
            "scored" => EpisodeStatus::Scored,
            _ => EpisodeStatus::Upcoming,
        }
    }
}

impl fmt::Display for EpisodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Request/Response DTOs

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateSeasonRequest {
    pub number: i32,
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateEpisodeRequest {
    pub number: i32,
    pub title: String,
    pub air_at: DateTime<Utc>,
    /// Defaults to `air_at` when omitted.
    pub picks_lock_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SeasonWithEpisodes {
    pub season: Season,
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentEpisodeResponse {
    pub episode: Episode,
    pub seconds_until_lock: i64,
}
