use actix_web::{web, HttpResponse};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::ExposeSecret;
use sqlx::PgPool;

use crate::config::jwt::JwtSettings;
use crate::middleware::auth::Claims;
use crate::models::auth::{LoginRequest, LoginResponse};
use crate::models::user::User;
use crate::utils::password::verify_password;

#[tracing::instrument(
    name = "Login user attempt",
    skip(login_form, pool, jwt_settings),
    fields(
        username = %login_form.username
    )
)]
pub async fn login_user(
    login_form: web::Json<LoginRequest>,
    pool: web::Data<PgPool>,
    jwt_settings: web::Data<JwtSettings>,
) -> HttpResponse {
    let user_result = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(&login_form.username)
        .fetch_optional(pool.get_ref())
        .await;

    let user = match user_result {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::info!("User not found or invalid credentials");
            return HttpResponse::Unauthorized().finish();
        }
        Err(e) => {
            tracing::error!("Database error occurred: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    // Verify password
    if !verify_password(
        login_form.password.expose_secret(),
        user.password_hash.expose_secret(),
    ) {
        tracing::info!("Invalid password");
        return HttpResponse::Unauthorized().finish();
    }

    // Generate JWT token
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(jwt_settings.expiration_hours))
        .expect("Valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username,
        role: user.role,
        status: user.status,
        exp: expiration,
    };

    let token = match encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_settings.secret.expose_secret().as_bytes()),
    ) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Error generating JWT token: {:?}", e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    HttpResponse::Ok().json(LoginResponse { token })
}
