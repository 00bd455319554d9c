use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Castaway {
    pub id: Uuid,
    pub season_id: Uuid,
    pub name: String,
    pub tribe: Option<String>,
    pub occupation: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: CastawayStatus,
    pub eliminated_in_episode: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CastawayStatus {
    Active,
    Eliminated,
}

impl CastawayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CastawayStatus::Active => "active",
            CastawayStatus::Eliminated => "eliminated",
        }
    }
}

impl From<String> for CastawayStatus {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "eliminated" => CastawayStatus::Eliminated,
            _ => CastawayStatus::Active,
        }
    }
}

impl fmt::Display for CastawayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateCastawayRequest {
    pub name: String,
    pub tribe: Option<String>,
    pub occupation: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpdateCastawayRequest {
    pub name: Option<String>,
    pub tribe: Option<String>,
    pub occupation: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CastawayListQuery {
    pub status: Option<String>,
}
