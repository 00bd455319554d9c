use uuid::Uuid;

use crate::models::stats::CastawayStatRow;
use crate::stats::aggregate::{dense_ranks_desc, mean, sample_std_dev};
use crate::stats::StatsService;

impl StatsService {
    /// Per-castaway scoring table for a season: totals, per-episode mean,
    /// and the boom/bust spread across scored episodes.
    pub async fn castaway_stats(
        &self,
        season_id: Uuid,
    ) -> Result<Vec<CastawayStatRow>, sqlx::Error> {
        let rows: Vec<(Uuid, String, Option<i32>)> = sqlx::query_as(
            r#"
            SELECT c.id, c.name, es.points
            FROM castaways c
            LEFT JOIN episode_scores es ON es.castaway_id = c.id
            WHERE c.season_id = $1
            ORDER BY c.name
            "#,
        )
        .bind(season_id)
        .fetch_all(self.pool())
        .await?;

        struct Acc {
            name: String,
            points: Vec<f64>,
        }

        let mut order: Vec<Uuid> = Vec::new();
        let mut accs: std::collections::HashMap<Uuid, Acc> = std::collections::HashMap::new();
        for (id, name, points) in rows {
            let acc = accs.entry(id).or_insert_with(|| {
                order.push(id);
                Acc {
                    name,
                    points: Vec::new(),
                }
            });
            if let Some(p) = points {
                acc.points.push(p as f64);
            }
        }

        let mut stats: Vec<CastawayStatRow> = order
            .into_iter()
            .map(|id| {
                let acc = &accs[&id];
                let total: i64 = acc.points.iter().map(|p| *p as i64).sum();
                CastawayStatRow {
                    castaway_id: id,
                    castaway_name: acc.name.clone(),
                    total_points: total,
                    episodes_scored: acc.points.len(),
                    mean_points: mean(&acc.points),
                    std_dev: sample_std_dev(&acc.points),
                    scoring_rank: 0,
                }
            })
            .collect();

        stats.sort_by(|a, b| {
            b.total_points
                .cmp(&a.total_points)
                .then_with(|| a.castaway_name.cmp(&b.castaway_name))
        });
        let totals: Vec<i64> = stats.iter().map(|s| s.total_points).collect();
        for (row, rank) in stats.iter_mut().zip(dense_ranks_desc(&totals)) {
            row.scoring_rank = rank;
        }

        Ok(stats)
    }
}
