use uuid::Uuid;

use crate::models::stats::UserStatRow;
use crate::stats::aggregate::{dense_ranks_desc, group_by, mean, sample_std_dev};
use crate::stats::StatsService;

impl StatsService {
    /// Global user leaderboard for a season, summed across every league
    /// the user plays in. Consistency is the spread of weekly results.
    pub async fn user_leaderboard(&self, season_id: Uuid) -> Result<Vec<UserStatRow>, sqlx::Error> {
        let rows: Vec<(Uuid, String, Option<i32>)> = sqlx::query_as(
            r#"
            SELECT u.id, u.username, es.points
            FROM weekly_picks wp
            JOIN leagues l ON l.id = wp.league_id AND l.season_id = $1
            JOIN episodes ep ON ep.id = wp.episode_id AND ep.status = 'scored'
            JOIN users u ON u.id = wp.user_id
            LEFT JOIN episode_scores es
                ON es.episode_id = wp.episode_id AND es.castaway_id = wp.castaway_id
            "#,
        )
        .bind(season_id)
        .fetch_all(self.pool())
        .await?;

        let grouped = group_by(rows, |(id, _, _)| *id);

        let mut stats: Vec<UserStatRow> = grouped
            .into_values()
            .map(|picks| {
                let (user_id, username, _) = picks[0].clone();
                let weekly: Vec<f64> = picks
                    .iter()
                    .map(|(_, _, points)| points.unwrap_or(0) as f64)
                    .collect();
                UserStatRow {
                    user_id,
                    username,
                    total_points: weekly.iter().map(|p| *p as i64).sum(),
                    weeks_played: weekly.len(),
                    mean_points: mean(&weekly),
                    consistency: sample_std_dev(&weekly),
                    rank: 0,
                }
            })
            .collect();

        stats.sort_by(|a, b| {
            b.total_points
                .cmp(&a.total_points)
                .then_with(|| a.username.cmp(&b.username))
        });
        let totals: Vec<i64> = stats.iter().map(|s| s.total_points).collect();
        for (row, rank) in stats.iter_mut().zip(dense_ranks_desc(&totals)) {
            row.rank = rank;
        }

        Ok(stats)
    }
}
