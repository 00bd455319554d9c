//! Database query helper functions to reduce boilerplate error handling.
//!
//! These helpers simplify common patterns like:
//! - Fetching a required record (NotFound if missing)
//! - Collapsing database failures into a uniform 500 response

use actix_web::HttpResponse;
use serde_json::json;

/// Result type for database operations that return an HttpResponse on error
pub type DbResult<T> = Result<T, HttpResponse>;

/// Macro for handlers returning `Result<HttpResponse>`.
/// Converts a `DbResult<T>` to return `Ok(error_response)` on error.
///
/// # Example
/// ```ignore
/// let league = ok_or_return!(require_record(
///     sqlx::query_as("SELECT * FROM leagues WHERE id = $1")
///         .bind(league_id)
///         .fetch_optional(pool)
///         .await,
///     "League not found"
/// ));
/// ```
#[macro_export]
macro_rules! ok_or_return {
    ($expr:expr) => {
        match $expr {
            Ok(val) => val,
            Err(response) => return Ok(response),
        }
    };
}

/// Unwrap an optional database result, returning NotFound if None and
/// InternalServerError on a query failure.
pub fn require_record<T>(
    result: Result<Option<T>, sqlx::Error>,
    not_found_message: &str,
) -> DbResult<T> {
    match result {
        Ok(Some(record)) => Ok(record),
        Ok(None) => Err(HttpResponse::NotFound().json(json!({
            "success": false,
            "message": not_found_message
        }))),
        Err(e) => {
            tracing::error!("Database query failed: {:?}", e);
            Err(db_error_response())
        }
    }
}

/// Unwrap a non-optional database result, returning InternalServerError on failure.
pub fn require_ok<T>(result: Result<T, sqlx::Error>) -> DbResult<T> {
    result.map_err(|e| {
        tracing::error!("Database query failed: {:?}", e);
        db_error_response()
    })
}

/// The uniform 500 body. Details stay in the logs, never in the response.
pub fn db_error_response() -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({
        "success": false,
        "message": "Internal server error"
    }))
}
