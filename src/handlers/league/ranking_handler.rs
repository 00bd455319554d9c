use std::collections::HashSet;

use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::helpers::{db_error_response, require_ok, require_record};
use crate::db::league_queries;
use crate::middleware::auth::Claims;
use crate::models::draft::{RankedCastaway, SubmitRankingsRequest};
use crate::models::league::DraftStatus;
use crate::ok_or_return;

#[tracing::instrument(
    name = "Submit draft rankings",
    skip(request, pool, claims),
    fields(username = %claims.username, count = %request.castaway_ids.len())
)]
pub async fn submit_rankings(
    league_id: Uuid,
    request: web::Json<SubmitRankingsRequest>,
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
            "message": "Only league members can submit rankings"
        })));
    }

    if league.draft_status == DraftStatus::Completed {
        return Ok(HttpResponse::Conflict().json(json!({
            "success": false,
            "message": "The draft has already run"
        })));
    }

    if request.castaway_ids.is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Rankings must not be empty"
        })));
    }

    let unique: HashSet<Uuid> = request.castaway_ids.iter().copied().collect();
    if unique.len() != request.castaway_ids.len() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Rankings must not repeat a castaway"
        })));
    }

    let valid_rows: Vec<(Uuid,)> = ok_or_return!(require_ok(
        sqlx::query_as(
            "SELECT id FROM castaways WHERE season_id = $1 AND status = 'active'",
        )
        .bind(league.season_id)
        .fetch_all(pool.get_ref())
        .await
    ));
    let valid: HashSet<Uuid> = valid_rows.into_iter().map(|(id,)| id).collect();
    if let Some(unknown) = request.castaway_ids.iter().find(|id| !valid.contains(*id)) {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": format!("Castaway {} is not draftable in this season", unknown)
        })));
    }

    let mut tx = match pool.begin().await {
        Ok(tx) => tx,
        Err(e) => {
            tracing::error!("Failed to open transaction: {:?}", e);
            return Ok(db_error_response());
        }
    };

    // Resubmission replaces the previous list wholesale
    if let Err(e) = sqlx::query("DELETE FROM draft_rankings WHERE league_id = $1 AND user_id = $2")
        .bind(league_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
    {
        tracing::error!("Failed to clear previous rankings: {:?}", e);
        return Ok(db_error_response());
    }

    for (index, castaway_id) in request.castaway_ids.iter().enumerate() {
        let insert = sqlx::query(
            r#"
            INSERT INTO draft_rankings (id, league_id, user_id, castaway_id, rank)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(league_id)
        .bind(user_id)
        .bind(castaway_id)
        .bind((index + 1) as i32)
        .execute(&mut *tx)
        .await;

        if let Err(e) = insert {
            tracing::error!("Failed to insert ranking: {:?}", e);
            return Ok(db_error_response());
        }
    }

    if let Err(e) = tx.commit().await {
        tracing::error!("Failed to commit rankings: {:?}", e);
        return Ok(db_error_response());
    }

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Rankings saved"
    })))
}

pub async fn get_my_rankings(
    league_id: Uuid,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => return Ok(HttpResponse::Unauthorized().finish()),
    };

    let rows: Vec<(Uuid, String, i32)> = ok_or_return!(require_ok(
        sqlx::query_as(
            r#"
            SELECT dr.castaway_id, c.name, dr.rank
            FROM draft_rankings dr
            JOIN castaways c ON c.id = dr.castaway_id
            WHERE dr.league_id = $1 AND dr.user_id = $2
            ORDER BY dr.rank
            "#,
        )
        .bind(league_id)
        .bind(user_id)
        .fetch_all(pool.get_ref())
        .await
    ));

    let rankings: Vec<RankedCastaway> = rows
        .into_iter()
        .map(|(castaway_id, castaway_name, rank)| RankedCastaway {
            castaway_id,
            castaway_name,
            rank,
        })
        .collect();

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": rankings
    })))
}
