use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct ScoringRule {
    pub id: Uuid,
    pub code: String,
    pub description: String,
    pub points: i32,
    pub eliminates: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateRuleRequest {
    pub code: String,
    pub description: String,
    pub points: i32,
    pub eliminates: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpdateRuleRequest {
    pub description: Option<String>,
    pub points: Option<i32>,
    pub eliminates: Option<bool>,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct EpisodeEvent {
    pub id: Uuid,
    pub episode_id: Uuid,
    pub castaway_id: Uuid,
    pub rule_code: String,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EventInput {
    pub castaway_id: Uuid,
    pub rule_code: String,
    /// Defaults to 1 when omitted.
    pub quantity: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecordEventsRequest {
    pub events: Vec<EventInput>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreEventBreakdown {
    pub rule_code: String,
    pub description: String,
    pub quantity: i32,
    pub points: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CastawayEpisodeScore {
    pub castaway_id: Uuid,
    pub castaway_name: String,
    pub points: i32,
    pub events: Vec<ScoreEventBreakdown>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EpisodeScoresResponse {
    pub episode_id: Uuid,
    pub episode_number: i32,
    pub scores: Vec<CastawayEpisodeScore>,
}
