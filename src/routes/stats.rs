use actix_web::{get, web, HttpResponse, Result};
use sqlx::PgPool;

use crate::handlers::stats_handler;

/// Per-castaway season scoring table
#[get("/castaways")]
async fn castaway_stats(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    stats_handler::castaway_stats(pool).await
}

/// Global user leaderboard
#[get("/users")]
async fn user_leaderboard(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    stats_handler::user_leaderboard(pool).await
}

/// Pick counts and shares per episode
#[get("/picks/popularity")]
async fn pick_popularity(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    stats_handler::pick_popularity(pool).await
}

/// Draft position vs. scoring rank differentials
#[get("/draft-value")]
async fn draft_value(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    stats_handler::draft_value(pool).await
}

/// Stat of the week
#[get("/spotlight")]
async fn spotlight(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    stats_handler::spotlight(pool).await
}
