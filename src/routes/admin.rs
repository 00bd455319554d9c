use actix_web::{get, post, put, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::admin::{castaway_handler, episode_handler, scoring_handler, season_handler};
use crate::middleware::auth::Claims;
use crate::models::castaway::{CreateCastawayRequest, UpdateCastawayRequest};
use crate::models::scoring::{CreateRuleRequest, RecordEventsRequest, UpdateRuleRequest};
use crate::models::season::{CreateEpisodeRequest, CreateSeasonRequest};

/// List all seasons
#[get("/seasons")]
async fn list_seasons(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    season_handler::list_seasons(pool).await
}

/// Create a season
#[post("/seasons")]
async fn create_season(
    request: web::Json<CreateSeasonRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    season_handler::create_season(request, pool, claims).await
}

/// Activate a season, deactivating any other
#[put("/seasons/{season_id}/activate")]
async fn activate_season(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let season_id = path.into_inner();
    season_handler::activate_season(season_id, pool, claims).await
}

/// Add an episode to a season
#[post("/seasons/{season_id}/episodes")]
async fn create_episode(
    path: web::Path<Uuid>,
    request: web::Json<CreateEpisodeRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let season_id = path.into_inner();
    episode_handler::create_episode(season_id, request, pool, claims).await
}

/// Lock an episode's picks manually
#[put("/episodes/{episode_id}/lock")]
async fn lock_episode(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let episode_id = path.into_inner();
    episode_handler::lock_episode(episode_id, pool, claims).await
}

/// Add a castaway to a season
#[post("/seasons/{season_id}/castaways")]
async fn create_castaway(
    path: web::Path<Uuid>,
    request: web::Json<CreateCastawayRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let season_id = path.into_inner();
    castaway_handler::create_castaway(season_id, request, pool, claims).await
}

/// Update castaway details
#[put("/castaways/{castaway_id}")]
async fn update_castaway(
    path: web::Path<Uuid>,
    request: web::Json<UpdateCastawayRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let castaway_id = path.into_inner();
    castaway_handler::update_castaway(castaway_id, request, pool, claims).await
}

/// List scoring rules
#[get("/scoring/rules")]
async fn list_rules(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    scoring_handler::list_rules(pool).await
}

/// Create a scoring rule
#[post("/scoring/rules")]
async fn create_rule(
    request: web::Json<CreateRuleRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    scoring_handler::create_rule(request, pool, claims).await
}

/// Update a scoring rule
#[put("/scoring/rules/{rule_id}")]
async fn update_rule(
    path: web::Path<Uuid>,
    request: web::Json<UpdateRuleRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let rule_id = path.into_inner();
    scoring_handler::update_rule(rule_id, request, pool, claims).await
}

/// List the events recorded for an episode
#[get("/episodes/{episode_id}/events")]
async fn list_events(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let episode_id = path.into_inner();
    scoring_handler::list_events(episode_id, pool).await
}

/// Record scoring events for an episode
#[post("/episodes/{episode_id}/events")]
async fn record_events(
    path: web::Path<Uuid>,
    request: web::Json<RecordEventsRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let episode_id = path.into_inner();
    scoring_handler::record_events(episode_id, request, pool, claims).await
}

/// Score an episode from its recorded events
#[post("/episodes/{episode_id}/finalize")]
async fn finalize_episode(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let episode_id = path.into_inner();
    scoring_handler::finalize_episode(episode_id, pool, claims).await
}
