use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::season::{Episode, EpisodeStatus};

#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("episode has not locked yet; lock picks before scoring")]
    EpisodeNotLocked,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Turns recorded episode events into per-castaway scores against the rule
/// table, applies eliminations, and marks the episode scored.
pub struct ScoringService {
    pool: PgPool,
}

struct CastawayTally {
    points: i64,
    eliminated: bool,
}

impl ScoringService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finalize an episode. Recomputing an already-scored episode is
    /// allowed and replaces the previous scores wholesale; an episode that
    /// never locked is rejected.
    pub async fn finalize_episode(&self, episode: &Episode) -> Result<usize, ScoringError> {
        if episode.status == EpisodeStatus::Upcoming {
            return Err(ScoringError::EpisodeNotLocked);
        }

        let event_rows: Vec<(Uuid, i32, i32, bool)> = sqlx::query_as(
            r#"
            SELECT e.castaway_id, e.quantity, r.points, r.eliminates
            FROM episode_events e
            JOIN scoring_rules r ON r.code = e.rule_code
            WHERE e.episode_id = $1
            "#,
        )
        .bind(episode.id)
        .fetch_all(&self.pool)
        .await?;

        let mut tallies: HashMap<Uuid, CastawayTally> = HashMap::new();
        for (castaway_id, quantity, points, eliminates) in event_rows {
            let tally = tallies.entry(castaway_id).or_insert(CastawayTally {
                points: 0,
                eliminated: false,
            });
            tally.points += points as i64 * quantity as i64;
            tally.eliminated |= eliminates;
        }

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM episode_scores WHERE episode_id = $1")
            .bind(episode.id)
            .execute(&mut *tx)
            .await?;

        for (castaway_id, tally) in &tallies {
            sqlx::query(
                r#"
                INSERT INTO episode_scores (id, episode_id, castaway_id, points)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(episode.id)
            .bind(castaway_id)
            .bind(tally.points as i32)
            .execute(&mut *tx)
            .await?;

            if tally.eliminated {
                // Elimination state only ever moves forward
                sqlx::query(
                    r#"
                    UPDATE castaways
                    SET status = 'eliminated', eliminated_in_episode = $1, updated_at = NOW()
                    WHERE id = $2 AND status = 'active'
                    "#,
                )
                .bind(episode.number)
                .bind(castaway_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        sqlx::query("UPDATE episodes SET status = $1, updated_at = NOW() WHERE id = $2")
            .bind(EpisodeStatus::Scored.as_str())
            .bind(episode.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Finalized episode {} (number {}): scored {} castaways",
            episode.id,
            episode.number,
            tallies.len()
        );

        Ok(tallies.len())
    }
}
