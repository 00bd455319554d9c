use std::collections::HashSet;

use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::helpers::{db_error_response, require_ok, require_record};
use crate::db::league_queries;
use crate::fantasy::scoring::{ScoringError, ScoringService};
use crate::middleware::auth::Claims;
use crate::models::scoring::{
    CreateRuleRequest, EpisodeEvent, RecordEventsRequest, ScoringRule, UpdateRuleRequest,
};
use crate::models::season::EpisodeStatus;
use crate::ok_or_return;

pub async fn list_rules(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let rules = ok_or_return!(require_ok(
        sqlx::query_as::<_, ScoringRule>("SELECT * FROM scoring_rules ORDER BY code")
            .fetch_all(pool.get_ref())
            .await
    ));

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": rules
    })))
}

#[tracing::instrument(
    name = "Create scoring rule",
    skip(request, pool, claims),
    fields(rule_code = %request.code, admin = %claims.username)
)]
pub async fn create_rule(
    request: web::Json<CreateRuleRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let code = request.code.trim().to_lowercase();
    if code.is_empty() || request.description.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Rule code and description must not be empty"
        })));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO scoring_rules (id, code, description, points, eliminates)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&code)
    .bind(request.description.trim())
    .bind(request.points)
    .bind(request.eliminates.unwrap_or(false))
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => {
            let rule = ok_or_return!(require_record(
                sqlx::query_as::<_, ScoringRule>("SELECT * FROM scoring_rules WHERE code = $1")
                    .bind(&code)
                    .fetch_optional(pool.get_ref())
                    .await,
                "Rule not found after creation"
            ));
            Ok(HttpResponse::Created().json(json!({
                "success": true,
                "message": "Scoring rule created",
                "data": rule
            })))
        }
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return Ok(HttpResponse::Conflict().json(json!({
                        "success": false,
                        "message": format!("Rule {} already exists", code)
                    })));
                }
            }
            tracing::error!("Failed to create scoring rule: {:?}", e);
            Ok(db_error_response())
        }
    }
}

#[tracing::instrument(
    name = "Update scoring rule",
    skip(request, pool, claims),
    fields(admin = %claims.username)
)]
pub async fn update_rule(
    rule_id: Uuid,
    request: web::Json<UpdateRuleRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    ok_or_return!(require_record(
        sqlx::query_as::<_, ScoringRule>("SELECT * FROM scoring_rules WHERE id = $1")
            .bind(rule_id)
            .fetch_optional(pool.get_ref())
            .await,
        "Rule not found"
    ));

    let result = sqlx::query(
        r#"
        UPDATE scoring_rules
        SET description = COALESCE($1, description),
            points = COALESCE($2, points),
            eliminates = COALESCE($3, eliminates),
            updated_at = NOW()
        WHERE id = $4
        "#,
    )
    .bind(request.description.as_deref().map(str::trim))
    .bind(request.points)
    .bind(request.eliminates)
    .bind(rule_id)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => {
            let rule = ok_or_return!(require_record(
                sqlx::query_as::<_, ScoringRule>("SELECT * FROM scoring_rules WHERE id = $1")
                    .bind(rule_id)
                    .fetch_optional(pool.get_ref())
                    .await,
                "Rule not found"
            ));
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "message": "Scoring rule updated",
                "data": rule
            })))
        }
        Err(e) => {
            tracing::error!("Failed to update rule {}: {:?}", rule_id, e);
            Ok(db_error_response())
        }
    }
}

#[tracing::instrument(
    name = "Record episode events",
    skip(request, pool, claims),
    fields(event_count = %request.events.len(), admin = %claims.username)
)]
pub async fn record_events(
    episode_id: Uuid,
    request: web::Json<RecordEventsRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let episode = ok_or_return!(require_record(
        league_queries::get_episode(pool.get_ref(), episode_id).await,
        "Episode not found"
    ));

    if episode.status == EpisodeStatus::Upcoming {
        return Ok(HttpResponse::Conflict().json(json!({
            "success": false,
            "message": "Events can only be recorded once the episode has locked"
        })));
    }

    if request.events.is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "No events to record"
        })));
    }

    // Validate rule codes and castaways up front so the batch inserts
    // cannot half-succeed on bad input
    let rule_rows: Vec<(String,)> = ok_or_return!(require_ok(
        sqlx::query_as("SELECT code FROM scoring_rules")
            .fetch_all(pool.get_ref())
            .await
    ));
    let known_rules: HashSet<String> = rule_rows.into_iter().map(|(code,)| code).collect();

    let castaway_rows: Vec<(Uuid,)> = ok_or_return!(require_ok(
        sqlx::query_as("SELECT id FROM castaways WHERE season_id = $1")
            .bind(episode.season_id)
            .fetch_all(pool.get_ref())
            .await
    ));
    let known_castaways: HashSet<Uuid> = castaway_rows.into_iter().map(|(id,)| id).collect();

    for event in &request.events {
        if !known_rules.contains(&event.rule_code) {
            return Ok(HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": format!("Unknown scoring rule: {}", event.rule_code)
            })));
        }
        if !known_castaways.contains(&event.castaway_id) {
            return Ok(HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": format!("Castaway {} is not in this season", event.castaway_id)
            })));
        }
        if event.quantity.is_some_and(|q| q < 1) {
            return Ok(HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": "Event quantity must be at least 1"
            })));
        }
    }

    let mut tx = match pool.begin().await {
        Ok(tx) => tx,
        Err(e) => {
            tracing::error!("Failed to open transaction: {:?}", e);
            return Ok(db_error_response());
        }
    };

    for event in &request.events {
        let insert = sqlx::query(
            r#"
            INSERT INTO episode_events (id, episode_id, castaway_id, rule_code, quantity)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(episode_id)
        .bind(event.castaway_id)
        .bind(&event.rule_code)
        .bind(event.quantity.unwrap_or(1))
        .execute(&mut *tx)
        .await;

        if let Err(e) = insert {
            tracing::error!("Failed to insert episode event: {:?}", e);
            return Ok(db_error_response());
        }
    }

    if let Err(e) = tx.commit().await {
        tracing::error!("Failed to commit episode events: {:?}", e);
        return Ok(db_error_response());
    }

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": format!("Recorded {} events", request.events.len())
    })))
}

/// The events recorded so far for an episode, for review before finalizing.
pub async fn list_events(episode_id: Uuid, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    ok_or_return!(require_record(
        league_queries::get_episode(pool.get_ref(), episode_id).await,
        "Episode not found"
    ));

    let events = ok_or_return!(require_ok(
        sqlx::query_as::<_, EpisodeEvent>(
            "SELECT * FROM episode_events WHERE episode_id = $1 ORDER BY created_at",
        )
        .bind(episode_id)
        .fetch_all(pool.get_ref())
        .await
    ));

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": events
    })))
}

#[tracing::instrument(
    name = "Finalize episode",
    skip(pool, claims),
    fields(admin = %claims.username)
)]
pub async fn finalize_episode(
    episode_id: Uuid,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let episode = ok_or_return!(require_record(
        league_queries::get_episode(pool.get_ref(), episode_id).await,
        "Episode not found"
    ));

    let scoring_service = ScoringService::new(pool.get_ref().clone());
    match scoring_service.finalize_episode(&episode).await {
        Ok(scored) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": format!("Episode finalized; {} castaways scored", scored)
        }))),
        Err(ScoringError::EpisodeNotLocked) => Ok(HttpResponse::Conflict().json(json!({
            "success": false,
            "message": "Lock the episode before scoring it"
        }))),
        Err(ScoringError::Database(e)) => {
            tracing::error!("Failed to finalize episode {}: {:?}", episode_id, e);
            Ok(db_error_response())
        }
    }
}
