use actix_web::{get, put, web, HttpResponse, Result};
use sqlx::PgPool;

use crate::handlers::profile_handler;
use crate::middleware::auth::Claims;
use crate::models::user::UpdateProfileRequest;

#[get("")]
async fn get_profile(pool: web::Data<PgPool>, claims: web::ReqData<Claims>) -> Result<HttpResponse> {
    profile_handler::get_profile(pool, claims).await
}

#[put("")]
async fn update_profile(
    request: web::Json<UpdateProfileRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    profile_handler::update_profile(request, pool, claims).await
}
