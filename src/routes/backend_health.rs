use actix_web::{get, HttpResponse};

#[get("/backend_health")]
async fn backend_health() -> HttpResponse {
    HttpResponse::Ok().finish()
}
