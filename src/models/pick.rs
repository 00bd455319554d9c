use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct WeeklyPick {
    pub id: Uuid,
    pub league_id: Uuid,
    pub user_id: Uuid,
    pub episode_id: Uuid,
    pub castaway_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SubmitPickRequest {
    pub castaway_id: Uuid,
}

/// One row of a member's pick history. Points are absent until the
/// episode has been scored.
#[derive(Debug, Serialize, Deserialize)]
pub struct PickHistoryEntry {
    pub episode_id: Uuid,
    pub episode_number: i32,
    pub castaway_id: Uuid,
    pub castaway_name: String,
    pub points: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EpisodePickEntry {
    pub user_id: Uuid,
    pub username: String,
    pub castaway_id: Uuid,
    pub castaway_name: String,
    pub points: Option<i32>,
}
