use std::collections::HashMap;

use uuid::Uuid;

use crate::models::season::Episode;
use crate::models::stats::{SpotlightPick, SpotlightResponse, StandingsMove};
use crate::stats::aggregate::{dense_ranks_desc, mean, share};
use crate::stats::StatsService;

type PickRow = (Uuid, String, Uuid, String, i32, i32);

impl StatsService {
    /// "Stat of the week": movement and trivia over the latest scored
    /// episode. Returns None while the season has no scored episode.
    pub async fn spotlight(
        &self,
        season_id: Uuid,
    ) -> Result<Option<SpotlightResponse>, sqlx::Error> {
        let latest: Option<Episode> = sqlx::query_as(
            r#"
            SELECT * FROM episodes
            WHERE season_id = $1 AND status = 'scored'
            ORDER BY number DESC
            LIMIT 1
            "#,
        )
        .bind(season_id)
        .fetch_optional(self.pool())
        .await?;
        let latest = match latest {
            Some(episode) => episode,
            None => return Ok(None),
        };

        let rows: Vec<PickRow> = sqlx::query_as(
            r#"
            SELECT wp.user_id, u.username, wp.castaway_id, c.name, ep.number,
                   COALESCE(es.points, 0)
            FROM weekly_picks wp
            JOIN leagues l ON l.id = wp.league_id AND l.season_id = $1
            JOIN episodes ep ON ep.id = wp.episode_id AND ep.status = 'scored'
            JOIN users u ON u.id = wp.user_id
            JOIN castaways c ON c.id = wp.castaway_id
            LEFT JOIN episode_scores es
                ON es.episode_id = wp.episode_id AND es.castaway_id = wp.castaway_id
            ORDER BY u.username
            "#,
        )
        .bind(season_id)
        .fetch_all(self.pool())
        .await?;

        let (biggest_riser, biggest_faller) = standings_moves(&rows, latest.number);

        let latest_rows: Vec<&PickRow> =
            rows.iter().filter(|r| r.4 == latest.number).collect();
        let top_pick = latest_rows
            .iter()
            .max_by(|a, b| a.5.cmp(&b.5).then_with(|| b.1.cmp(&a.1)))
            .map(|(user_id, username, castaway_id, castaway_name, _, points)| SpotlightPick {
                user_id: *user_id,
                username: username.clone(),
                castaway_id: *castaway_id,
                castaway_name: castaway_name.clone(),
                points: *points as i64,
            });

        let latest_points: Vec<f64> = latest_rows.iter().map(|r| r.5 as f64).collect();
        let episode_mean = mean(&latest_points);
        let below = latest_points.iter().filter(|p| **p < episode_mean).count();
        let below_mean_share = share(below, latest_points.len());

        Ok(Some(SpotlightResponse {
            episode_id: latest.id,
            episode_number: latest.number,
            biggest_riser,
            biggest_faller,
            top_pick,
            below_mean_share,
        }))
    }
}

/// Compare dense leaderboard ranks before and after the latest episode.
/// With only one scored episode there is no "before" to move from.
fn standings_moves(
    rows: &[PickRow],
    latest_number: i32,
) -> (Option<StandingsMove>, Option<StandingsMove>) {
    let has_history = rows.iter().any(|r| r.4 < latest_number);
    if !has_history {
        return (None, None);
    }

    let mut users: Vec<(Uuid, String)> = Vec::new();
    let mut seen: HashMap<Uuid, usize> = HashMap::new();
    let mut previous_totals: Vec<i64> = Vec::new();
    let mut current_totals: Vec<i64> = Vec::new();

    for (user_id, username, _, _, episode_number, points) in rows {
        let idx = *seen.entry(*user_id).or_insert_with(|| {
            users.push((*user_id, username.clone()));
            previous_totals.push(0);
            current_totals.push(0);
            users.len() - 1
        });
        current_totals[idx] += *points as i64;
        if *episode_number < latest_number {
            previous_totals[idx] += *points as i64;
        }
    }

    let previous_ranks = dense_ranks_desc(&previous_totals);
    let current_ranks = dense_ranks_desc(&current_totals);

    let mut riser: Option<StandingsMove> = None;
    let mut faller: Option<StandingsMove> = None;
    for (idx, (user_id, username)) in users.iter().enumerate() {
        let delta = previous_ranks[idx] as i64 - current_ranks[idx] as i64;
        let movement = StandingsMove {
            user_id: *user_id,
            username: username.clone(),
            previous_rank: previous_ranks[idx],
            current_rank: current_ranks[idx],
            delta,
        };
        if delta > 0 && riser.as_ref().map_or(true, |r| delta > r.delta) {
            riser = Some(movement);
        } else if delta < 0 && faller.as_ref().map_or(true, |f| delta < f.delta) {
            faller = Some(movement);
        }
    }

    (riser, faller)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(user: Uuid, name: &str, episode: i32, points: i32) -> PickRow {
        (user, name.to_string(), Uuid::new_v4(), "Cast".to_string(), episode, points)
    }

    #[test]
    fn no_movement_without_history() {
        let u = Uuid::new_v4();
        let rows = vec![row(u, "ana", 1, 10)];
        let (riser, faller) = standings_moves(&rows, 1);
        assert!(riser.is_none());
        assert!(faller.is_none());
    }

    #[test]
    fn rank_swap_produces_a_riser_and_a_faller() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        // After episode 1: a leads 10-5. Episode 2: b scores 20, a scores 0.
        let rows = vec![
            row(a, "ana", 1, 10),
            row(b, "bob", 1, 5),
            row(a, "ana", 2, 0),
            row(b, "bob", 2, 20),
        ];
        let (riser, faller) = standings_moves(&rows, 2);

        let riser = riser.expect("bob climbed");
        assert_eq!(riser.username, "bob");
        assert_eq!(riser.previous_rank, 2);
        assert_eq!(riser.current_rank, 1);
        assert_eq!(riser.delta, 1);

        let faller = faller.expect("ana fell");
        assert_eq!(faller.username, "ana");
        assert_eq!(faller.delta, -1);
    }
}
