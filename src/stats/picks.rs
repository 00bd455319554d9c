use std::collections::HashMap;

use uuid::Uuid;

use crate::models::stats::{EpisodePopularity, PickShare};
use crate::stats::aggregate::share;
use crate::stats::StatsService;

impl StatsService {
    /// How often each castaway was started, episode by episode.
    pub async fn pick_popularity(
        &self,
        season_id: Uuid,
    ) -> Result<Vec<EpisodePopularity>, sqlx::Error> {
        let rows: Vec<(Uuid, i32, Uuid, String)> = sqlx::query_as(
            r#"
            SELECT ep.id, ep.number, c.id, c.name
            FROM weekly_picks wp
            JOIN leagues l ON l.id = wp.league_id AND l.season_id = $1
            JOIN episodes ep ON ep.id = wp.episode_id
            JOIN castaways c ON c.id = wp.castaway_id
            ORDER BY ep.number
            "#,
        )
        .bind(season_id)
        .fetch_all(self.pool())
        .await?;

        // Group picks per episode, preserving episode order
        let mut episode_order: Vec<(Uuid, i32)> = Vec::new();
        let mut per_episode: HashMap<Uuid, Vec<(Uuid, String)>> = HashMap::new();
        for (episode_id, episode_number, castaway_id, castaway_name) in rows {
            per_episode
                .entry(episode_id)
                .or_insert_with(|| {
                    episode_order.push((episode_id, episode_number));
                    Vec::new()
                })
                .push((castaway_id, castaway_name));
        }

        let popularity = episode_order
            .into_iter()
            .map(|(episode_id, episode_number)| {
                let picks = &per_episode[&episode_id];
                let total_picks = picks.len();

                let mut counts: HashMap<Uuid, (String, usize)> = HashMap::new();
                for (castaway_id, name) in picks {
                    let entry = counts
                        .entry(*castaway_id)
                        .or_insert_with(|| (name.clone(), 0));
                    entry.1 += 1;
                }

                let mut castaways: Vec<PickShare> = counts
                    .into_iter()
                    .map(|(castaway_id, (castaway_name, picks))| PickShare {
                        castaway_id,
                        castaway_name,
                        picks,
                        share: share(picks, total_picks),
                    })
                    .collect();
                castaways.sort_by(|a, b| {
                    b.picks
                        .cmp(&a.picks)
                        .then_with(|| a.castaway_name.cmp(&b.castaway_name))
                });

                EpisodePopularity {
                    episode_id,
                    episode_number,
                    total_picks,
                    castaways,
                }
            })
            .collect();

        Ok(popularity)
    }
}
