use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::PgPool;

use crate::db::helpers::{db_error_response, require_record};
use crate::db::league_queries;
use crate::models::season::Season;
use crate::ok_or_return;
use crate::stats::StatsService;

async fn active_season(pool: &PgPool) -> Result<Season, HttpResponse> {
    require_record(
        league_queries::get_active_season(pool).await,
        "No active season",
    )
}

pub async fn castaway_stats(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let season = ok_or_return!(active_season(pool.get_ref()).await);
    let stats_service = StatsService::new(pool.get_ref().clone());

    match stats_service.castaway_stats(season.id).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": stats
        }))),
        Err(e) => {
            tracing::error!("Failed to compute castaway stats: {:?}", e);
            Ok(db_error_response())
        }
    }
}

pub async fn user_leaderboard(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let season = ok_or_return!(active_season(pool.get_ref()).await);
    let stats_service = StatsService::new(pool.get_ref().clone());

    match stats_service.user_leaderboard(season.id).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": stats
        }))),
        Err(e) => {
            tracing::error!("Failed to compute user leaderboard: {:?}", e);
            Ok(db_error_response())
        }
    }
}

pub async fn pick_popularity(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let season = ok_or_return!(active_season(pool.get_ref()).await);
    let stats_service = StatsService::new(pool.get_ref().clone());

    match stats_service.pick_popularity(season.id).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": stats
        }))),
        Err(e) => {
            tracing::error!("Failed to compute pick popularity: {:?}", e);
            Ok(db_error_response())
        }
    }
}

pub async fn draft_value(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let season = ok_or_return!(active_season(pool.get_ref()).await);
    let stats_service = StatsService::new(pool.get_ref().clone());

    match stats_service.draft_value(season.id).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": stats
        }))),
        Err(e) => {
            tracing::error!("Failed to compute draft value: {:?}", e);
            Ok(db_error_response())
        }
    }
}

pub async fn spotlight(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let season = ok_or_return!(active_season(pool.get_ref()).await);
    let stats_service = StatsService::new(pool.get_ref().clone());

    match stats_service.spotlight(season.id).await {
        Ok(Some(spotlight)) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": spotlight
        }))),
        Ok(None) => Ok(HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "No scored episode yet"
        }))),
        Err(e) => {
            tracing::error!("Failed to compute spotlight: {:?}", e);
            Ok(db_error_response())
        }
    }
}
