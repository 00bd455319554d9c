use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::league::{EpisodePoints, League, LeagueStandingRow, LeagueStandingsResponse};
use crate::stats::aggregate::dense_ranks_desc;

/// Computes league standings from members' starter picks and the scores
/// those starters earned in scored episodes.
pub struct StandingsService {
    pool: PgPool,
}

impl StandingsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_league_standings(
        &self,
        league: &League,
    ) -> Result<LeagueStandingsResponse, sqlx::Error> {
        let members: Vec<(Uuid, String)> = sqlx::query_as(
            r#"
            SELECT lm.user_id, u.username
            FROM league_members lm
            JOIN users u ON u.id = lm.user_id
            WHERE lm.league_id = $1
            ORDER BY u.username
            "#,
        )
        .bind(league.id)
        .fetch_all(&self.pool)
        .await?;

        // A pick without a matching score row means the starter simply did
        // not score that week; it still counts as a played week worth 0.
        let pick_rows: Vec<(Uuid, i32, Option<i32>)> = sqlx::query_as(
            r#"
            SELECT wp.user_id, ep.number, es.points
            FROM weekly_picks wp
            JOIN episodes ep ON ep.id = wp.episode_id AND ep.status = 'scored'
            LEFT JOIN episode_scores es
                ON es.episode_id = wp.episode_id AND es.castaway_id = wp.castaway_id
            WHERE wp.league_id = $1
            ORDER BY ep.number
            "#,
        )
        .bind(league.id)
        .fetch_all(&self.pool)
        .await?;

        let (scored_episodes,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM episodes WHERE season_id = $1 AND status = 'scored'",
        )
        .bind(league.season_id)
        .fetch_one(&self.pool)
        .await?;

        let mut per_user: HashMap<Uuid, Vec<EpisodePoints>> = HashMap::new();
        for (user_id, episode_number, points) in pick_rows {
            per_user.entry(user_id).or_default().push(EpisodePoints {
                episode_number,
                points: points.unwrap_or(0) as i64,
            });
        }

        let mut rows: Vec<LeagueStandingRow> = members
            .into_iter()
            .map(|(user_id, username)| {
                let episode_points = per_user.remove(&user_id).unwrap_or_default();
                let total_points = episode_points.iter().map(|e| e.points).sum();
                LeagueStandingRow {
                    user_id,
                    username,
                    total_points,
                    episode_points,
                    position: 0,
                }
            })
            .collect();

        // Order by total, then username for a stable display; ties share a position
        rows.sort_by(|a, b| {
            b.total_points
                .cmp(&a.total_points)
                .then_with(|| a.username.cmp(&b.username))
        });
        let totals: Vec<i64> = rows.iter().map(|r| r.total_points).collect();
        for (row, rank) in rows.iter_mut().zip(dense_ranks_desc(&totals)) {
            row.position = rank;
        }

        Ok(LeagueStandingsResponse {
            league_id: league.id,
            standings: rows,
            scored_episodes,
        })
    }
}
