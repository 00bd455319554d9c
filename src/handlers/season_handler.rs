use std::collections::HashMap;

use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::helpers::{require_ok, require_record};
use crate::db::league_queries;
use crate::models::castaway::{Castaway, CastawayListQuery};
use crate::models::scoring::{CastawayEpisodeScore, EpisodeScoresResponse, ScoreEventBreakdown};
use crate::models::season::{
    CurrentEpisodeResponse, Episode, EpisodeStatus, SeasonWithEpisodes,
};
use crate::ok_or_return;

/// The active season together with its episodes.
pub async fn get_active_season(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let season = ok_or_return!(require_record(
        league_queries::get_active_season(pool.get_ref()).await,
        "No active season"
    ));

    let episodes = ok_or_return!(require_ok(
        sqlx::query_as::<_, Episode>(
            "SELECT * FROM episodes WHERE season_id = $1 ORDER BY number",
        )
        .bind(season.id)
        .fetch_all(pool.get_ref())
        .await
    ));

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": SeasonWithEpisodes { season, episodes }
    })))
}

pub async fn get_season_episodes(
    season_id: Uuid,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let episodes = ok_or_return!(require_ok(
        sqlx::query_as::<_, Episode>(
            "SELECT * FROM episodes WHERE season_id = $1 ORDER BY number",
        )
        .bind(season_id)
        .fetch_all(pool.get_ref())
        .await
    ));

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": episodes
    })))
}

/// The next episode still open for picks in the active season, with a
/// countdown to its lock.
pub async fn get_current_episode(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let season = ok_or_return!(require_record(
        league_queries::get_active_season(pool.get_ref()).await,
        "No active season"
    ));

    let episode = ok_or_return!(require_record(
        sqlx::query_as::<_, Episode>(
            r#"
            SELECT * FROM episodes
            WHERE season_id = $1 AND status = 'upcoming'
            ORDER BY number
            LIMIT 1
            "#,
        )
        .bind(season.id)
        .fetch_optional(pool.get_ref())
        .await,
        "No upcoming episode"
    ));

    let seconds_until_lock = (episode.picks_lock_at - chrono::Utc::now())
        .num_seconds()
        .max(0);

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": CurrentEpisodeResponse {
            episode,
            seconds_until_lock
        }
    })))
}

pub async fn get_season_castaways(
    season_id: Uuid,
    query: web::Query<CastawayListQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let castaways = ok_or_return!(require_ok(match &query.status {
        Some(status) => {
            sqlx::query_as::<_, Castaway>(
                "SELECT * FROM castaways WHERE season_id = $1 AND status = $2 ORDER BY name",
            )
            .bind(season_id)
            .bind(status.to_lowercase())
            .fetch_all(pool.get_ref())
            .await
        }
        None => {
            sqlx::query_as::<_, Castaway>(
                "SELECT * FROM castaways WHERE season_id = $1 ORDER BY name",
            )
            .bind(season_id)
            .fetch_all(pool.get_ref())
            .await
        }
    }));

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": castaways
    })))
}

/// Per-castaway scores for a scored episode, with the rule-by-rule
/// breakdown behind each number.
pub async fn get_episode_scores(episode_id: Uuid, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let episode = ok_or_return!(require_record(
        league_queries::get_episode(pool.get_ref(), episode_id).await,
        "Episode not found"
    ));

    if episode.status != EpisodeStatus::Scored {
        return Ok(HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "Episode has not been scored yet"
        })));
    }

    let score_rows: Vec<(Uuid, String, i32)> = ok_or_return!(require_ok(
        sqlx::query_as(
            r#"
            SELECT es.castaway_id, c.name, es.points
            FROM episode_scores es
            JOIN castaways c ON c.id = es.castaway_id
            WHERE es.episode_id = $1
            ORDER BY es.points DESC, c.name
            "#,
        )
        .bind(episode_id)
        .fetch_all(pool.get_ref())
        .await
    ));

    let event_rows: Vec<(Uuid, String, String, i32, i32)> = ok_or_return!(require_ok(
        sqlx::query_as(
            r#"
            SELECT e.castaway_id, e.rule_code, r.description, e.quantity, r.points
            FROM episode_events e
            JOIN scoring_rules r ON r.code = e.rule_code
            WHERE e.episode_id = $1
            ORDER BY e.created_at
            "#,
        )
        .bind(episode_id)
        .fetch_all(pool.get_ref())
        .await
    ));

    let mut breakdowns: HashMap<Uuid, Vec<ScoreEventBreakdown>> = HashMap::new();
    for (castaway_id, rule_code, description, quantity, points) in event_rows {
        breakdowns
            .entry(castaway_id)
            .or_default()
            .push(ScoreEventBreakdown {
                rule_code,
                description,
                quantity,
                points: points * quantity,
            });
    }

    let scores: Vec<CastawayEpisodeScore> = score_rows
        .into_iter()
        .map(|(castaway_id, castaway_name, points)| CastawayEpisodeScore {
            castaway_id,
            castaway_name,
            points,
            events: breakdowns.remove(&castaway_id).unwrap_or_default(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": EpisodeScoresResponse {
            episode_id,
            episode_number: episode.number,
            scores
        }
    })))
}
