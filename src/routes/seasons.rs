use actix_web::{get, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::season_handler;
use crate::models::castaway::CastawayListQuery;

/// Get the active season with its episodes
#[get("/seasons/active")]
async fn get_active_season(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    season_handler::get_active_season(pool).await
}

/// Get episodes for a season
#[get("/seasons/{season_id}/episodes")]
async fn get_season_episodes(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let season_id = path.into_inner();
    season_handler::get_season_episodes(season_id, pool).await
}

/// Get castaways for a season, optionally filtered by status
#[get("/seasons/{season_id}/castaways")]
async fn get_season_castaways(
    path: web::Path<Uuid>,
    query: web::Query<CastawayListQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let season_id = path.into_inner();
    season_handler::get_season_castaways(season_id, query, pool).await
}

/// Get the next episode open for picks with its lock countdown
#[get("/episodes/current")]
async fn get_current_episode(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    season_handler::get_current_episode(pool).await
}

/// Get per-castaway scores for a scored episode
#[get("/episodes/{episode_id}/scores")]
async fn get_episode_scores(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let episode_id = path.into_inner();
    season_handler::get_episode_scores(episode_id, pool).await
}
