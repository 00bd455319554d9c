use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct CastawayStatRow {
    pub castaway_id: Uuid,
    pub castaway_name: String,
    pub total_points: i64,
    pub episodes_scored: usize,
    pub mean_points: f64,
    /// Sample standard deviation of per-episode points. High values mark
    /// boom-or-bust castaways.
    pub std_dev: f64,
    pub scoring_rank: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserStatRow {
    pub user_id: Uuid,
    pub username: String,
    pub total_points: i64,
    pub weeks_played: usize,
    pub mean_points: f64,
    pub consistency: f64,
    pub rank: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PickShare {
    pub castaway_id: Uuid,
    pub castaway_name: String,
    pub picks: usize,
    /// Fraction of all picks made for this episode.
    pub share: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EpisodePopularity {
    pub episode_id: Uuid,
    pub episode_number: i32,
    pub total_picks: usize,
    pub castaways: Vec<PickShare>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DraftValueRow {
    pub castaway_id: Uuid,
    pub castaway_name: String,
    pub avg_draft_position: f64,
    pub draft_rank: usize,
    pub scoring_rank: usize,
    /// draft_rank - scoring_rank: positive means the castaway outplays
    /// where leagues drafted them (a steal), negative means a bust.
    pub rank_differential: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StandingsMove {
    pub user_id: Uuid,
    pub username: String,
    pub previous_rank: usize,
    pub current_rank: usize,
    pub delta: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SpotlightPick {
    pub user_id: Uuid,
    pub username: String,
    pub castaway_id: Uuid,
    pub castaway_name: String,
    pub points: i64,
}

/// "Stat of the week" trivia computed over the latest scored episode.
#[derive(Debug, Serialize, Deserialize)]
pub struct SpotlightResponse {
    pub episode_id: Uuid,
    pub episode_number: i32,
    pub biggest_riser: Option<StandingsMove>,
    pub biggest_faller: Option<StandingsMove>,
    pub top_pick: Option<SpotlightPick>,
    /// Fraction of starters that scored below the episode's mean score.
    pub below_mean_share: f64,
}
