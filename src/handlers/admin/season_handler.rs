use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::helpers::{db_error_response, require_ok, require_record};
use crate::middleware::auth::Claims;
use crate::models::season::{CreateSeasonRequest, Season};
use crate::ok_or_return;

#[tracing::instrument(
    name = "Create season",
    skip(request, pool, claims),
    fields(season_number = %request.number, admin = %claims.username)
)]
pub async fn create_season(
    request: web::Json<CreateSeasonRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    if request.title.trim().is_empty() || request.number < 1 {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Season needs a positive number and a title"
        })));
    }

    let season_id = Uuid::new_v4();
    let result = sqlx::query(
        "INSERT INTO seasons (id, number, title) VALUES ($1, $2, $3)",
    )
    .bind(season_id)
    .bind(request.number)
    .bind(request.title.trim())
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => {
            let season = ok_or_return!(require_record(
                sqlx::query_as::<_, Season>("SELECT * FROM seasons WHERE id = $1")
                    .bind(season_id)
                    .fetch_optional(pool.get_ref())
                    .await,
                "Season not found after creation"
            ));
            Ok(HttpResponse::Created().json(json!({
                "success": true,
                "message": "Season created",
                "data": season
            })))
        }
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return Ok(HttpResponse::Conflict().json(json!({
                        "success": false,
                        "message": format!("Season {} already exists", request.number)
                    })));
                }
            }
            tracing::error!("Failed to create season: {:?}", e);
            Ok(db_error_response())
        }
    }
}

#[tracing::instrument(
    name = "Activate season",
    skip(pool, claims),
    fields(admin = %claims.username)
)]
pub async fn activate_season(
    season_id: Uuid,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let season = ok_or_return!(require_record(
        sqlx::query_as::<_, Season>("SELECT * FROM seasons WHERE id = $1")
            .bind(season_id)
            .fetch_optional(pool.get_ref())
            .await,
        "Season not found"
    ));

    if season.is_active {
        return Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Season is already active",
            "data": season
        })));
    }

    let mut tx = match pool.begin().await {
        Ok(tx) => tx,
        Err(e) => {
            tracing::error!("Failed to open transaction: {:?}", e);
            return Ok(db_error_response());
        }
    };

    // Deactivate whatever was active, then flip the target inside one
    // transaction so the one-active invariant holds throughout
    let steps = async {
        sqlx::query("UPDATE seasons SET is_active = FALSE, updated_at = NOW() WHERE is_active")
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE seasons SET is_active = TRUE, updated_at = NOW() WHERE id = $1")
            .bind(season_id)
            .execute(&mut *tx)
            .await?;
        Ok::<(), sqlx::Error>(())
    }
    .await;

    if let Err(e) = steps {
        tracing::error!("Failed to activate season {}: {:?}", season_id, e);
        return Ok(db_error_response());
    }
    if let Err(e) = tx.commit().await {
        tracing::error!("Failed to commit season activation: {:?}", e);
        return Ok(db_error_response());
    }

    tracing::info!("Season {} activated by {}", season.number, claims.username);

    let season = ok_or_return!(require_record(
        sqlx::query_as::<_, Season>("SELECT * FROM seasons WHERE id = $1")
            .bind(season_id)
            .fetch_optional(pool.get_ref())
            .await,
        "Season not found"
    ));

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Season activated",
        "data": season
    })))
}

pub async fn list_seasons(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let seasons = ok_or_return!(require_ok(
        sqlx::query_as::<_, Season>("SELECT * FROM seasons ORDER BY number DESC")
            .fetch_all(pool.get_ref())
            .await
    ));

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": seasons
    })))
}
