use std::collections::HashMap;

use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::helpers::{require_ok, require_record};
use crate::db::league_queries;
use crate::fantasy::draft::{DraftError, DraftService};
use crate::middleware::auth::Claims;
use crate::models::draft::{MemberRoster, RosterSlotInfo};
use crate::ok_or_return;

#[tracing::instrument(
    name = "Run league draft",
    skip(pool, claims),
    fields(username = %claims.username)
)]
pub async fn run_draft(
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

    if league.owner_id != user_id {
        return Ok(HttpResponse::Forbidden().json(json!({
            "success": false,
            "message": "Only the league owner can run the draft"
        })));
    }

    let draft_service = DraftService::new(pool.get_ref().clone());
    match draft_service.run_draft(&league).await {
        Ok(result) => {
            tracing::info!("Draft completed for league {}", league_id);
            Ok(HttpResponse::Created().json(json!({
                "success": true,
                "message": "Draft completed",
                "data": result
            })))
        }
        Err(DraftError::Database(e)) => {
            tracing::error!("Draft failed for league {}: {:?}", league_id, e);
            Ok(crate::db::helpers::db_error_response())
        }
        Err(e) => Ok(HttpResponse::Conflict().json(json!({
            "success": false,
            "message": e.to_string()
        }))),
    }
}

pub async fn get_rosters(
    league_id: Uuid,
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
            "message": "Only league members can view rosters"
        })));
    }

    let rows: Vec<(Uuid, String, Uuid, String, String, i32, i32)> = ok_or_return!(require_ok(
        sqlx::query_as(
            r#"
            SELECT rs.user_id, u.username, rs.castaway_id, c.name, c.status,
                   rs.draft_round, rs.pick_number
            FROM roster_slots rs
            JOIN users u ON u.id = rs.user_id
            JOIN castaways c ON c.id = rs.castaway_id
            WHERE rs.league_id = $1
            ORDER BY rs.pick_number
            "#,
        )
        .bind(league_id)
        .fetch_all(pool.get_ref())
        .await
    ));

    let mut order: Vec<Uuid> = Vec::new();
    let mut grouped: HashMap<Uuid, MemberRoster> = HashMap::new();
    for (member_id, username, castaway_id, castaway_name, castaway_status, draft_round, pick_number) in
        rows
    {
        grouped
            .entry(member_id)
            .or_insert_with(|| {
                order.push(member_id);
                MemberRoster {
                    user_id: member_id,
                    username,
                    slots: Vec::new(),
                }
            })
            .slots
            .push(RosterSlotInfo {
                castaway_id,
                castaway_name,
                castaway_status: castaway_status.into(),
                draft_round,
                pick_number,
            });
    }

    let rosters: Vec<MemberRoster> = order
        .into_iter()
        .filter_map(|id| grouped.remove(&id))
        .collect();

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": rosters
    })))
}
