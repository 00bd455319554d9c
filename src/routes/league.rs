use actix_web::{get, post, put, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::league::{
    draft_handler, league_handler, pick_handler, ranking_handler, standings_handler,
};
use crate::middleware::auth::Claims;
use crate::models::draft::SubmitRankingsRequest;
use crate::models::league::{CreateLeagueRequest, JoinLeagueRequest, UpdateLeagueRequest};
use crate::models::pick::SubmitPickRequest;

/// Create a new league in the active season
#[post("/leagues")]
async fn create_league(
    request: web::Json<CreateLeagueRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    league_handler::create_league(request, pool, claims).await
}

/// Join a league by invite code
#[post("/leagues/join")]
async fn join_league(
    request: web::Json<JoinLeagueRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    league_handler::join_league(request, pool, claims).await
}

/// List the caller's leagues
#[get("/leagues/mine")]
async fn get_my_leagues(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    league_handler::get_my_leagues(pool, claims).await
}

/// Get league info with its member list
#[get("/leagues/{league_id}")]
async fn get_league_detail(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let league_id = path.into_inner();
    league_handler::get_league_detail(league_id, pool, claims).await
}

/// Update league settings (owner only)
#[put("/leagues/{league_id}")]
async fn update_league(
    path: web::Path<Uuid>,
    request: web::Json<UpdateLeagueRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let league_id = path.into_inner();
    league_handler::update_league(league_id, request, pool, claims).await
}

/// Submit a pre-draft ranking of castaways
#[put("/leagues/{league_id}/rankings")]
async fn submit_rankings(
    path: web::Path<Uuid>,
    request: web::Json<SubmitRankingsRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let league_id = path.into_inner();
    ranking_handler::submit_rankings(league_id, request, pool, claims).await
}

/// Get the caller's submitted ranking
#[get("/leagues/{league_id}/rankings")]
async fn get_my_rankings(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let league_id = path.into_inner();
    ranking_handler::get_my_rankings(league_id, pool, claims).await
}

/// Run the snake draft (owner only)
#[post("/leagues/{league_id}/draft")]
async fn run_draft(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let league_id = path.into_inner();
    draft_handler::run_draft(league_id, pool, claims).await
}

/// Get drafted rosters grouped per member
#[get("/leagues/{league_id}/rosters")]
async fn get_rosters(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let league_id = path.into_inner();
    draft_handler::get_rosters(league_id, pool, claims).await
}

/// The caller's pick history with points
#[get("/leagues/{league_id}/picks/mine")]
async fn get_my_picks(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let league_id = path.into_inner();
    pick_handler::get_my_picks(league_id, pool, claims).await
}

/// Set the starter for an episode
#[put("/leagues/{league_id}/picks/{episode_id}")]
async fn submit_pick(
    path: web::Path<(Uuid, Uuid)>,
    request: web::Json<SubmitPickRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let (league_id, episode_id) = path.into_inner();
    pick_handler::submit_pick(league_id, episode_id, request, pool, claims).await
}

/// All members' picks for an episode (after lock)
#[get("/leagues/{league_id}/picks/{episode_id}")]
async fn get_episode_picks(
    path: web::Path<(Uuid, Uuid)>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let (league_id, episode_id) = path.into_inner();
    pick_handler::get_episode_picks(league_id, episode_id, pool, claims).await
}

/// League standings
#[get("/leagues/{league_id}/standings")]
async fn get_standings(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let league_id = path.into_inner();
    standings_handler::get_standings(league_id, pool, claims).await
}
