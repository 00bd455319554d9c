use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::helpers::{db_error_response, require_ok, require_record};
use crate::db::league_queries;
use crate::middleware::auth::Claims;
use crate::models::castaway::CastawayStatus;
use crate::models::pick::{EpisodePickEntry, PickHistoryEntry, SubmitPickRequest, WeeklyPick};
use crate::models::season::EpisodeStatus;
use crate::ok_or_return;

#[tracing::instrument(
    name = "Submit weekly pick",
    skip(request, pool, claims),
    fields(username = %claims.username)
)]
pub async fn submit_pick(
    league_id: Uuid,
    episode_id: Uuid,
    request: web::Json<SubmitPickRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => return Ok(HttpResponse::Unauthorized().finish()),
    };

    let league = ok_or_return!(require_record(
        league_queries::get_league(pool.get_ref(), league_id).await,
        "League not found"
    ));

    let is_member = ok_or_return!(require_ok(
        league_queries::is_league_member(pool.get_ref(), league_id, user_id).await
    ));
    if !is_member {
        return Ok(HttpResponse::Forbidden().json(json!({
            "success": false,
            "message": "Only league members can submit picks"
        })));
    }

    let episode = ok_or_return!(require_record(
        league_queries::get_episode(pool.get_ref(), episode_id).await,
        "Episode not found"
    ));
    if episode.season_id != league.season_id {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Episode does not belong to this league's season"
        })));
    }

    if !episode.picks_open() {
        return Ok(HttpResponse::Conflict().json(json!({
            "success": false,
            "message": "Picks are locked for this episode"
        })));
    }

    let on_roster: Option<(Uuid,)> = ok_or_return!(require_ok(
        sqlx::query_as(
            "SELECT id FROM roster_slots WHERE league_id = $1 AND user_id = $2 AND castaway_id = $3",
        )
        .bind(league_id)
        .bind(user_id)
        .bind(request.castaway_id)
        .fetch_optional(pool.get_ref())
        .await
    ));
    if on_roster.is_none() {
        return Ok(HttpResponse::Conflict().json(json!({
            "success": false,
            "message": "You can only start a castaway from your roster"
        })));
    }

    let castaway = ok_or_return!(require_record(
        league_queries::get_castaway(pool.get_ref(), request.castaway_id).await,
        "Castaway not found"
    ));
    if castaway.status == CastawayStatus::Eliminated {
        if let Some(eliminated_in) = castaway.eliminated_in_episode {
            if eliminated_in < episode.number {
                return Ok(HttpResponse::Conflict().json(json!({
                    "success": false,
                    "message": format!(
                        "{} was eliminated in episode {} and cannot be started",
                        castaway.name, eliminated_in
                    )
                })));
            }
        }
    }

    let result = sqlx::query_as::<_, WeeklyPick>(
        r#"
        INSERT INTO weekly_picks (id, league_id, user_id, episode_id, castaway_id)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (league_id, user_id, episode_id)
        DO UPDATE SET castaway_id = EXCLUDED.castaway_id, updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(league_id)
    .bind(user_id)
    .bind(episode_id)
    .bind(request.castaway_id)
    .fetch_one(pool.get_ref())
    .await;

    match result {
        Ok(pick) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Pick saved",
            "data": pick
        }))),
        Err(e) => {
            tracing::error!("Failed to save pick: {:?}", e);
            Ok(db_error_response())
        }
    }
}

pub async fn get_my_picks(
    league_id: Uuid,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => return Ok(HttpResponse::Unauthorized().finish()),
    };

    let rows: Vec<(Uuid, i32, Uuid, String, Option<i32>)> = ok_or_return!(require_ok(
        sqlx::query_as(
            r#"
            SELECT wp.episode_id, ep.number, wp.castaway_id, c.name, es.points
            FROM weekly_picks wp
            JOIN episodes ep ON ep.id = wp.episode_id
            JOIN castaways c ON c.id = wp.castaway_id
            LEFT JOIN episode_scores es
                ON es.episode_id = wp.episode_id AND es.castaway_id = wp.castaway_id
            WHERE wp.league_id = $1 AND wp.user_id = $2
            ORDER BY ep.number
            "#,
        )
        .bind(league_id)
        .bind(user_id)
        .fetch_all(pool.get_ref())
        .await
    ));

    let picks: Vec<PickHistoryEntry> = rows
        .into_iter()
        .map(
            |(episode_id, episode_number, castaway_id, castaway_name, points)| PickHistoryEntry {
                episode_id,
                episode_number,
                castaway_id,
                castaway_name,
                points,
            },
        )
        .collect();

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": picks
    })))
}

/// Everyone's picks for an episode. Hidden until the episode locks so
/// members cannot copy each other's starters.
pub async fn get_episode_picks(
    league_id: Uuid,
    episode_id: Uuid,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => return Ok(HttpResponse::Unauthorized().finish()),
    };

    let is_member = ok_or_return!(require_ok(
        league_queries::is_league_member(pool.get_ref(), league_id, user_id).await
    ));
    if !is_member {
        return Ok(HttpResponse::Forbidden().json(json!({
            "success": false,
            "message": "Only league members can view picks"
        })));
    }

    let episode = ok_or_return!(require_record(
        league_queries::get_episode(pool.get_ref(), episode_id).await,
        "Episode not found"
    ));
    if episode.status == EpisodeStatus::Upcoming {
        return Ok(HttpResponse::Forbidden().json(json!({
            "success": false,
            "message": "Picks are hidden until the episode locks"
        })));
    }

    let rows: Vec<(Uuid, String, Uuid, String, Option<i32>)> = ok_or_return!(require_ok(
        sqlx::query_as(
            r#"
            SELECT wp.user_id, u.username, wp.castaway_id, c.name, es.points
            FROM weekly_picks wp
            JOIN users u ON u.id = wp.user_id
            JOIN castaways c ON c.id = wp.castaway_id
            LEFT JOIN episode_scores es
                ON es.episode_id = wp.episode_id AND es.castaway_id = wp.castaway_id
            WHERE wp.league_id = $1 AND wp.episode_id = $2
            ORDER BY u.username
            "#,
        )
        .bind(league_id)
        .bind(episode_id)
        .fetch_all(pool.get_ref())
        .await
    ));

    let picks: Vec<EpisodePickEntry> = rows
        .into_iter()
        .map(
            |(member_id, username, castaway_id, castaway_name, points)| EpisodePickEntry {
                user_id: member_id,
                username,
                castaway_id,
                castaway_name,
                points,
            },
        )
        .collect();

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": picks
    })))
}
