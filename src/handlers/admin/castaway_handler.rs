use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::helpers::{db_error_response, require_record};
use crate::db::league_queries;
use crate::middleware::auth::Claims;
use crate::models::castaway::{CreateCastawayRequest, UpdateCastawayRequest};
use crate::models::season::Season;
use crate::ok_or_return;

#[tracing::instrument(
    name = "Create castaway",
    skip(request, pool, claims),
    fields(castaway_name = %request.name, admin = %claims.username)
)]
pub async fn create_castaway(
    season_id: Uuid,
    request: web::Json<CreateCastawayRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    if request.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Castaway name must not be empty"
        })));
    }

    ok_or_return!(require_record(
        sqlx::query_as::<_, Season>("SELECT * FROM seasons WHERE id = $1")
            .bind(season_id)
            .fetch_optional(pool.get_ref())
            .await,
        "Season not found"
    ));

    let castaway_id = Uuid::new_v4();
    let result = sqlx::query(
        r#"
        INSERT INTO castaways (id, season_id, name, tribe, occupation)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(castaway_id)
    .bind(season_id)
    .bind(request.name.trim())
    .bind(&request.tribe)
    .bind(&request.occupation)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => {
            let castaway = ok_or_return!(require_record(
                league_queries::get_castaway(pool.get_ref(), castaway_id).await,
                "Castaway not found after creation"
            ));
            Ok(HttpResponse::Created().json(json!({
                "success": true,
                "message": "Castaway created",
                "data": castaway
            })))
        }
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return Ok(HttpResponse::Conflict().json(json!({
                        "success": false,
                        "message": format!("{} is already in this season", request.name.trim())
                    })));
                }
            }
            tracing::error!("Failed to create castaway: {:?}", e);
            Ok(db_error_response())
        }
    }
}

#[tracing::instrument(
    name = "Update castaway",
    skip(request, pool, claims),
    fields(admin = %claims.username)
)]
pub async fn update_castaway(
    castaway_id: Uuid,
    request: web::Json<UpdateCastawayRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    ok_or_return!(require_record(
        league_queries::get_castaway(pool.get_ref(), castaway_id).await,
        "Castaway not found"
    ));

    let result = sqlx::query(
        r#"
        UPDATE castaways
        SET name = COALESCE($1, name),
            tribe = COALESCE($2, tribe),
            occupation = COALESCE($3, occupation),
            updated_at = NOW()
        WHERE id = $4
        "#,
    )
    .bind(request.name.as_deref().map(str::trim))
    .bind(&request.tribe)
    .bind(&request.occupation)
    .bind(castaway_id)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => {
            let castaway = ok_or_return!(require_record(
                league_queries::get_castaway(pool.get_ref(), castaway_id).await,
                "Castaway not found"
            ));
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "message": "Castaway updated",
                "data": castaway
            })))
        }
        Err(e) => {
            tracing::error!("Failed to update castaway {}: {:?}", castaway_id, e);
            Ok(db_error_response())
        }
    }
}
