use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::helpers::{db_error_response, require_ok, require_record};
use crate::db::league_queries;
use crate::fantasy::standings::StandingsService;
use crate::middleware::auth::Claims;
use crate::ok_or_return;

pub async fn get_standings(
    league_id: Uuid,
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
            "message": "Only league members can view standings"
        })));
    }

    let standings_service = StandingsService::new(pool.get_ref().clone());
    match standings_service.get_league_standings(&league).await {
        Ok(standings) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": standings
        }))),
        Err(e) => {
            tracing::error!("Failed to compute standings for league {}: {:?}", league_id, e);
            Ok(db_error_response())
        }
    }
}
