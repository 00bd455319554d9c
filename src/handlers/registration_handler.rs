use actix_web::{web, HttpResponse};
use chrono::Utc;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{RegistrationRequest, UserRole, UserStatus};
use crate::utils::password::hash_password;

#[tracing::instrument(
    name = "Adding a new user",
    // Don't show arguments
    skip(user_form, pool),
    fields(
        username = %user_form.username,
        email = %user_form
    )
)]
pub async fn register_user(
    user_form: web::Json<RegistrationRequest>,
    pool: web::Data<PgPool>,
) -> HttpResponse {
    if user_form.username.trim().is_empty() || user_form.email.trim().is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "message": "Username and email must not be empty"
        }));
    }

    match insert_user(&user_form, &pool).await {
        Ok(_) => HttpResponse::Ok().finish(),
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return HttpResponse::Conflict().json(serde_json::json!({
                        "success": false,
                        "message": "Username or email is already taken"
                    }));
                }
            }
            tracing::error!("Failed to register user: {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub async fn insert_user(
    user_form: &web::Json<RegistrationRequest>,
    pool: &PgPool,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO users (id, username, password_hash, email, role, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&user_form.username)
    .bind(hash_password(user_form.password.expose_secret()))
    .bind(&user_form.email)
    .bind(UserRole::User.as_str())
    .bind(UserStatus::Active.as_str())
    .bind(Utc::now())
    .bind(Utc::now())
    .execute(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute user insert query: {:?}", e);
        e
    })?;

    Ok(())
}
