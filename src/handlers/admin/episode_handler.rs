use actix_web::{web, HttpResponse, Result};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::helpers::{db_error_response, require_record};
use crate::db::league_queries;
use crate::middleware::auth::Claims;
use crate::models::season::{CreateEpisodeRequest, EpisodeStatus};
use crate::ok_or_return;

#[tracing::instrument(
    name = "Create episode",
    skip(request, pool, claims),
    fields(episode_number = %request.number, admin = %claims.username)
)]
pub async fn create_episode(
    season_id: Uuid,
    request: web::Json<CreateEpisodeRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    ok_or_return!(require_record(
        sqlx::query_as::<_, crate::models::season::Season>(
            "SELECT * FROM seasons WHERE id = $1",
        )
        .bind(season_id)
        .fetch_optional(pool.get_ref())
        .await,
        "Season not found"
    ));

    let picks_lock_at = request.picks_lock_at.unwrap_or(request.air_at);
    if picks_lock_at > request.air_at {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "picks_lock_at cannot be after the episode airs"
        })));
    }

    // An episode created after its lock time has passed starts out locked
    let status = if picks_lock_at <= Utc::now() {
        EpisodeStatus::Locked
    } else {
        EpisodeStatus::Upcoming
    };

    let episode_id = Uuid::new_v4();
    let result = sqlx::query(
        r#"
        INSERT INTO episodes (id, season_id, number, title, air_at, picks_lock_at, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(episode_id)
    .bind(season_id)
    .bind(request.number)
    .bind(request.title.trim())
    .bind(request.air_at)
    .bind(picks_lock_at)
    .bind(status.as_str())
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => {
            let episode = ok_or_return!(require_record(
                league_queries::get_episode(pool.get_ref(), episode_id).await,
                "Episode not found after creation"
            ));
            Ok(HttpResponse::Created().json(json!({
                "success": true,
                "message": "Episode created",
                "data": episode
            })))
        }
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return Ok(HttpResponse::Conflict().json(json!({
                        "success": false,
                        "message": format!(
                            "Episode {} already exists in this season",
                            request.number
                        )
                    })));
                }
            }
            tracing::error!("Failed to create episode: {:?}", e);
            Ok(db_error_response())
        }
    }
}

#[tracing::instrument(
    name = "Lock episode",
    skip(pool, claims),
    fields(admin = %claims.username)
)]
pub async fn lock_episode(
    episode_id: Uuid,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let episode = ok_or_return!(require_record(
        league_queries::get_episode(pool.get_ref(), episode_id).await,
        "Episode not found"
    ));

    match episode.status {
        EpisodeStatus::Locked => {
            return Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "message": "Episode is already locked",
                "data": episode
            })));
        }
        EpisodeStatus::Scored => {
            return Ok(HttpResponse::Conflict().json(json!({
                "success": false,
                "message": "A scored episode cannot be re-locked"
            })));
        }
        EpisodeStatus::Upcoming => {}
    }

    let result = sqlx::query("UPDATE episodes SET status = $1, updated_at = NOW() WHERE id = $2")
        .bind(EpisodeStatus::Locked.as_str())
        .bind(episode_id)
        .execute(pool.get_ref())
        .await;

    match result {
        Ok(_) => {
            tracing::info!("Episode {} locked by {}", episode.number, claims.username);
            let episode = ok_or_return!(require_record(
                league_queries::get_episode(pool.get_ref(), episode_id).await,
                "Episode not found"
            ));
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "message": "Episode locked",
                "data": episode
            })))
        }
        Err(e) => {
            tracing::error!("Failed to lock episode {}: {:?}", episode_id, e);
            Ok(db_error_response())
        }
    }
}

