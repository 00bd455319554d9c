use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;

use crate::db::helpers::require_record;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::user::{ProfileResponse, UpdateProfileRequest};
use crate::ok_or_return;

pub async fn get_profile(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => return Ok(HttpResponse::Unauthorized().finish()),
    };

    let profile = ok_or_return!(require_record(
        sqlx::query_as::<_, ProfileResponse>(
            r#"
            SELECT id, username, email, display_name, favorite_castaway_id, created_at
            FROM users WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool.get_ref())
        .await,
        "User not found"
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::success("Profile", profile)))
}

#[tracing::instrument(
    name = "Update profile",
    skip(request, pool, claims),
    fields(username = %claims.username)
)]
pub async fn update_profile(
    request: web::Json<UpdateProfileRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => return Ok(HttpResponse::Unauthorized().finish()),
    };

    let result = sqlx::query(
        r#"
        UPDATE users
        SET display_name = COALESCE($1, display_name),
            favorite_castaway_id = COALESCE($2, favorite_castaway_id),
            updated_at = NOW()
        WHERE id = $3
        "#,
    )
    .bind(&request.display_name)
    .bind(request.favorite_castaway_id)
    .bind(user_id)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Profile updated"))),
        Err(e) => {
            tracing::error!("Failed to update profile: {:?}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to update profile")))
        }
    }
}
