use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct League {
    pub id: Uuid,
    pub season_id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub invite_code: String,
    pub max_members: i32,
    pub roster_size: i32,
    #[sqlx(try_from = "String")]
    pub draft_status: DraftStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DraftStatus {
    Pending,
    Completed,
}

impl DraftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftStatus::Pending => "pending",
            DraftStatus::Completed => "completed",
        }
    }
}

impl From<String> for DraftStatus {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "completed" => DraftStatus::Completed,
            _ => DraftStatus::Pending,
        }
    }
}

impl fmt::Display for DraftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Request/Response DTOs

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateLeagueRequest {
    pub name: String,
    pub max_members: Option<i32>,
    pub roster_size: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JoinLeagueRequest {
    pub invite_code: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpdateLeagueRequest {
    pub name: Option<String>,
    pub max_members: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeagueSummary {
    pub league: League,
    pub member_count: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MemberInfo {
    pub user_id: Uuid,
    pub username: String,
    pub joined_at: DateTime<Utc>,
    pub is_owner: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeagueDetail {
    pub league: League,
    pub members: Vec<MemberInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EpisodePoints {
    pub episode_number: i32,
    pub points: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeagueStandingRow {
    pub user_id: Uuid,
    pub username: String,
    pub total_points: i64,
    pub episode_points: Vec<EpisodePoints>,
    pub position: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeagueStandingsResponse {
    pub league_id: Uuid,
    pub standings: Vec<LeagueStandingRow>,
    pub scored_episodes: i64,
}
