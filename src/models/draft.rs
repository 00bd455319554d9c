use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::castaway::CastawayStatus;

/// A member's pre-draft ranking of the season's castaways, best first.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SubmitRankingsRequest {
    pub castaway_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RankedCastaway {
    pub castaway_id: Uuid,
    pub castaway_name: String,
    pub rank: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RosterSlotInfo {
    pub castaway_id: Uuid,
    pub castaway_name: String,
    pub castaway_status: CastawayStatus,
    pub draft_round: i32,
    pub pick_number: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MemberRoster {
    pub user_id: Uuid,
    pub username: String,
    pub slots: Vec<RosterSlotInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DraftResult {
    pub league_id: Uuid,
    pub draft_order: Vec<Uuid>,
    pub rosters: Vec<MemberRoster>,
}
