use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::draft::{DraftResult, MemberRoster, RosterSlotInfo};
use crate::models::league::{DraftStatus, League};

#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("the draft has already run for this league")]
    AlreadyCompleted,
    #[error("at least two members are required to run a draft")]
    TooFewMembers,
    #[error("not enough active castaways: {members} members need {required} at roster size {roster_size}")]
    NotEnoughCastaways {
        members: usize,
        roster_size: usize,
        required: usize,
    },
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// One resolved draft turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftAssignment {
    pub user_id: Uuid,
    pub castaway_id: Uuid,
    pub round: i32,
    pub pick_number: i32,
}

/// Runs the snake draft for a league and persists the resulting rosters.
pub struct DraftService {
    pool: PgPool,
}

impl DraftService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn run_draft(&self, league: &League) -> Result<DraftResult, DraftError> {
        if league.draft_status == DraftStatus::Completed {
            return Err(DraftError::AlreadyCompleted);
        }

        let members: Vec<(Uuid, String)> = sqlx::query_as(
            r#"
            SELECT lm.user_id, u.username
            FROM league_members lm
            JOIN users u ON u.id = lm.user_id
            WHERE lm.league_id = $1
            ORDER BY lm.joined_at
            "#,
        )
        .bind(league.id)
        .fetch_all(&self.pool)
        .await?;

        if members.len() < 2 {
            return Err(DraftError::TooFewMembers);
        }

        let roster_size = league.roster_size as usize;
        // Castaway creation order doubles as the default draft board
        let default_board: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM castaways WHERE season_id = $1 AND status = 'active' ORDER BY created_at",
        )
        .bind(league.season_id)
        .fetch_all(&self.pool)
        .await?;
        let default_board: Vec<Uuid> = default_board.into_iter().map(|(id,)| id).collect();

        let required = members.len() * roster_size;
        if default_board.len() < required {
            return Err(DraftError::NotEnoughCastaways {
                members: members.len(),
                roster_size,
                required,
            });
        }

        let ranking_rows: Vec<(Uuid, Uuid)> = sqlx::query_as(
            r#"
            SELECT user_id, castaway_id
            FROM draft_rankings
            WHERE league_id = $1
            ORDER BY user_id, rank
            "#,
        )
        .bind(league.id)
        .fetch_all(&self.pool)
        .await?;

        let mut preferences: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for (user_id, castaway_id) in ranking_rows {
            preferences.entry(user_id).or_default().push(castaway_id);
        }

        let mut draft_order: Vec<Uuid> = members.iter().map(|(id, _)| *id).collect();
        draft_order.shuffle(&mut rand::thread_rng());

        let assignments = assign_rosters(&draft_order, roster_size, &preferences, &default_board);

        let mut tx = self.pool.begin().await?;
        for assignment in &assignments {
            sqlx::query(
                r#"
                INSERT INTO roster_slots (id, league_id, user_id, castaway_id, draft_round, pick_number)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(league.id)
            .bind(assignment.user_id)
            .bind(assignment.castaway_id)
            .bind(assignment.round)
            .bind(assignment.pick_number)
            .execute(&mut *tx)
            .await?;
        }
        sqlx::query("UPDATE leagues SET draft_status = $1, updated_at = NOW() WHERE id = $2")
            .bind(DraftStatus::Completed.as_str())
            .bind(league.id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!(
            "Draft completed for league {}: {} members, {} castaways assigned",
            league.id,
            members.len(),
            assignments.len()
        );

        let rosters = self.build_rosters(league, &members, &assignments).await?;
        Ok(DraftResult {
            league_id: league.id,
            draft_order,
            rosters,
        })
    }

    async fn build_rosters(
        &self,
        league: &League,
        members: &[(Uuid, String)],
        assignments: &[DraftAssignment],
    ) -> Result<Vec<MemberRoster>, sqlx::Error> {
        let castaways: Vec<(Uuid, String, String)> = sqlx::query_as(
            "SELECT id, name, status FROM castaways WHERE season_id = $1",
        )
        .bind(league.season_id)
        .fetch_all(&self.pool)
        .await?;
        let castaway_info: HashMap<Uuid, (String, String)> = castaways
            .into_iter()
            .map(|(id, name, status)| (id, (name, status)))
            .collect();

        let mut rosters = Vec::with_capacity(members.len());
        for (user_id, username) in members {
            let slots = assignments
                .iter()
                .filter(|a| a.user_id == *user_id)
                .map(|a| {
                    let (name, status) = castaway_info
                        .get(&a.castaway_id)
                        .cloned()
                        .unwrap_or_else(|| (String::new(), "active".to_string()));
                    RosterSlotInfo {
                        castaway_id: a.castaway_id,
                        castaway_name: name,
                        castaway_status: status.into(),
                        draft_round: a.round,
                        pick_number: a.pick_number,
                    }
                })
                .collect();
            rosters.push(MemberRoster {
                user_id: *user_id,
                username: username.clone(),
                slots,
            });
        }
        Ok(rosters)
    }
}

/// Resolve every draft turn. Pure so the snake mechanics can be tested
/// without a database.
///
/// Round 1 follows `order`, round 2 reverses it, and so on. Each turn takes
/// the member's highest-ranked still-available castaway, falling back to
/// the default board for members without a submitted ranking (or whose
/// ranking is exhausted).
pub fn assign_rosters(
    order: &[Uuid],
    roster_size: usize,
    preferences: &HashMap<Uuid, Vec<Uuid>>,
    default_board: &[Uuid],
) -> Vec<DraftAssignment> {
    let mut taken: HashSet<Uuid> = HashSet::new();
    let mut assignments = Vec::with_capacity(order.len() * roster_size);
    let mut pick_number = 1;

    for round in 0..roster_size {
        let turn_order: Vec<Uuid> = if round % 2 == 0 {
            order.to_vec()
        } else {
            order.iter().rev().copied().collect()
        };

        for user_id in turn_order {
            let ranked = preferences.get(&user_id).map(Vec::as_slice).unwrap_or(&[]);
            let choice = ranked
                .iter()
                .chain(default_board.iter())
                .find(|c| !taken.contains(*c));

            if let Some(&castaway_id) = choice {
                taken.insert(castaway_id);
                assignments.push(DraftAssignment {
                    user_id,
                    castaway_id,
                    round: (round + 1) as i32,
                    pick_number,
                });
                pick_number += 1;
            }
        }
    }

    assignments
}
