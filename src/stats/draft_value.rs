use std::collections::HashMap;

use uuid::Uuid;

use crate::models::stats::DraftValueRow;
use crate::stats::aggregate::{dense_ranks_asc_f64, dense_ranks_desc};
use crate::stats::StatsService;

impl StatsService {
    /// Rank differential per drafted castaway: where leagues drafted them
    /// on average vs. where their scoring actually lands them.
    pub async fn draft_value(&self, season_id: Uuid) -> Result<Vec<DraftValueRow>, sqlx::Error> {
        let slot_rows: Vec<(Uuid, String, i32)> = sqlx::query_as(
            r#"
            SELECT rs.castaway_id, c.name, rs.pick_number
            FROM roster_slots rs
            JOIN leagues l ON l.id = rs.league_id AND l.season_id = $1
            JOIN castaways c ON c.id = rs.castaway_id
            "#,
        )
        .bind(season_id)
        .fetch_all(self.pool())
        .await?;

        if slot_rows.is_empty() {
            return Ok(Vec::new());
        }

        let score_rows: Vec<(Uuid, i64)> = sqlx::query_as(
            r#"
            SELECT es.castaway_id, COALESCE(SUM(es.points), 0)
            FROM episode_scores es
            JOIN castaways c ON c.id = es.castaway_id
            WHERE c.season_id = $1
            GROUP BY es.castaway_id
            "#,
        )
        .bind(season_id)
        .fetch_all(self.pool())
        .await?;
        let totals: HashMap<Uuid, i64> = score_rows.into_iter().collect();

        struct Acc {
            name: String,
            positions: Vec<f64>,
        }
        let mut accs: HashMap<Uuid, Acc> = HashMap::new();
        let mut order: Vec<Uuid> = Vec::new();
        for (castaway_id, name, pick_number) in slot_rows {
            accs.entry(castaway_id)
                .or_insert_with(|| {
                    order.push(castaway_id);
                    Acc {
                        name,
                        positions: Vec::new(),
                    }
                })
                .positions
                .push(pick_number as f64);
        }

        let mut rows: Vec<DraftValueRow> = order
            .into_iter()
            .map(|castaway_id| {
                let acc = &accs[&castaway_id];
                let avg = acc.positions.iter().sum::<f64>() / acc.positions.len() as f64;
                DraftValueRow {
                    castaway_id,
                    castaway_name: acc.name.clone(),
                    avg_draft_position: avg,
                    draft_rank: 0,
                    scoring_rank: 0,
                    rank_differential: 0,
                }
            })
            .collect();

        let avgs: Vec<f64> = rows.iter().map(|r| r.avg_draft_position).collect();
        let draft_ranks = dense_ranks_asc_f64(&avgs);
        let point_totals: Vec<i64> = rows
            .iter()
            .map(|r| totals.get(&r.castaway_id).copied().unwrap_or(0))
            .collect();
        let scoring_ranks = dense_ranks_desc(&point_totals);

        for ((row, draft_rank), scoring_rank) in
            rows.iter_mut().zip(draft_ranks).zip(scoring_ranks)
        {
            row.draft_rank = draft_rank;
            row.scoring_rank = scoring_rank;
            row.rank_differential = draft_rank as i64 - scoring_rank as i64;
        }

        // Steals first, busts last
        rows.sort_by(|a, b| {
            b.rank_differential
                .cmp(&a.rank_differential)
                .then_with(|| a.castaway_name.cmp(&b.castaway_name))
        });

        Ok(rows)
    }
}
