use actix_web::{web, HttpResponse, Result};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::helpers::{db_error_response, require_ok, require_record};
use crate::db::league_queries;
use crate::middleware::auth::Claims;
use crate::models::league::{
    CreateLeagueRequest, JoinLeagueRequest, League, LeagueDetail, LeagueSummary, MemberInfo,
    UpdateLeagueRequest,
};
use crate::ok_or_return;
use crate::utils::invite_code::generate_invite_code;

const DEFAULT_MAX_MEMBERS: i32 = 12;
const DEFAULT_ROSTER_SIZE: i32 = 2;

#[tracing::instrument(
    name = "Create league",
    skip(request, pool, claims),
    fields(league_name = %request.name, username = %claims.username)
)]
pub async fn create_league(
    request: web::Json<CreateLeagueRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let owner_id = match claims.user_id() {
        Some(id) => id,
        None => return Ok(HttpResponse::Unauthorized().finish()),
    };

    if request.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "League name must not be empty"
        })));
    }

    let max_members = request.max_members.unwrap_or(DEFAULT_MAX_MEMBERS);
    let roster_size = request.roster_size.unwrap_or(DEFAULT_ROSTER_SIZE);
    if !(2..=50).contains(&max_members) || !(1..=6).contains(&roster_size) {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "max_members must be between 2 and 50, roster_size between 1 and 6"
        })));
    }

    let season = ok_or_return!(require_record(
        league_queries::get_active_season(pool.get_ref()).await,
        "No active season to create a league for"
    ));

    let league_id = Uuid::new_v4();
    let invite_code = generate_invite_code();

    let mut tx = match pool.begin().await {
        Ok(tx) => tx,
        Err(e) => {
            tracing::error!("Failed to open transaction: {:?}", e);
            return Ok(db_error_response());
        }
    };

    let insert = sqlx::query(
        r#"
        INSERT INTO leagues
            (id, season_id, owner_id, name, invite_code, max_members, roster_size)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(league_id)
    .bind(season.id)
    .bind(owner_id)
    .bind(request.name.trim())
    .bind(&invite_code)
    .bind(max_members)
    .bind(roster_size)
    .execute(&mut *tx)
    .await;

    if let Err(e) = insert {
        tracing::error!("Failed to insert league: {:?}", e);
        return Ok(db_error_response());
    }

    let membership = sqlx::query(
        "INSERT INTO league_members (id, league_id, user_id, joined_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(Uuid::new_v4())
    .bind(league_id)
    .bind(owner_id)
    .bind(Utc::now())
    .execute(&mut *tx)
    .await;

    if let Err(e) = membership {
        tracing::error!("Failed to insert owner membership: {:?}", e);
        return Ok(db_error_response());
    }

    if let Err(e) = tx.commit().await {
        tracing::error!("Failed to commit league creation: {:?}", e);
        return Ok(db_error_response());
    }

    let league = ok_or_return!(require_record(
        league_queries::get_league(pool.get_ref(), league_id).await,
        "League not found after creation"
    ));

    tracing::info!("League {} created by {}", league_id, claims.username);

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "League created",
        "data": league
    })))
}

#[tracing::instrument(
    name = "Join league",
    skip(request, pool, claims),
    fields(username = %claims.username)
)]
pub async fn join_league(
    request: web::Json<JoinLeagueRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => return Ok(HttpResponse::Unauthorized().finish()),
    };

    let code = request.invite_code.trim().to_uppercase();
    let league = ok_or_return!(require_record(
        sqlx::query_as::<_, League>("SELECT * FROM leagues WHERE invite_code = $1")
            .bind(&code)
            .fetch_optional(pool.get_ref())
            .await,
        "No league with that invite code"
    ));

    if league.draft_status == crate::models::league::DraftStatus::Completed {
        return Ok(HttpResponse::Conflict().json(json!({
            "success": false,
            "message": "The draft has already run; this league is closed to new members"
        })));
    }

    let already_member = ok_or_return!(require_ok(
        league_queries::is_league_member(pool.get_ref(), league.id, user_id).await
    ));
    if already_member {
        return Ok(HttpResponse::Conflict().json(json!({
            "success": false,
            "message": "Already a member of this league"
        })));
    }

    let members = ok_or_return!(require_ok(
        league_queries::member_count(pool.get_ref(), league.id).await
    ));
    if members >= league.max_members as i64 {
        return Ok(HttpResponse::Conflict().json(json!({
            "success": false,
            "message": "League is full"
        })));
    }

    let insert = sqlx::query(
        "INSERT INTO league_members (id, league_id, user_id, joined_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(Uuid::new_v4())
    .bind(league.id)
    .bind(user_id)
    .bind(Utc::now())
    .execute(pool.get_ref())
    .await;

    match insert {
        Ok(_) => {
            tracing::info!("User {} joined league {}", claims.username, league.id);
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "message": "Joined league",
                "data": league
            })))
        }
        Err(e) => {
            tracing::error!("Failed to join league: {:?}", e);
            Ok(db_error_response())
        }
    }
}

pub async fn get_my_leagues(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = match claims.user_id() {
        Some(id) => id,
        None => return Ok(HttpResponse::Unauthorized().finish()),
    };

    let leagues = ok_or_return!(require_ok(
        sqlx::query_as::<_, League>(
            r#"
            SELECT l.* FROM leagues l
            JOIN league_members lm ON lm.league_id = l.id
            WHERE lm.user_id = $1
            ORDER BY l.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool.get_ref())
        .await
    ));

    let mut summaries = Vec::with_capacity(leagues.len());
    for league in leagues {
        let member_count = ok_or_return!(require_ok(
            league_queries::member_count(pool.get_ref(), league.id).await
        ));
        summaries.push(LeagueSummary {
            league,
            member_count,
        });
    }

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": summaries
    })))
}

pub async fn get_league_detail(
    league_id: Uuid,
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
            "message": "Only league members can view this league"
        })));
    }

    let member_rows: Vec<(Uuid, String, chrono::DateTime<chrono::Utc>)> =
        ok_or_return!(require_ok(
            sqlx::query_as(
                r#"
                SELECT lm.user_id, u.username, lm.joined_at
                FROM league_members lm
                JOIN users u ON u.id = lm.user_id
                WHERE lm.league_id = $1
                ORDER BY lm.joined_at
                "#,
            )
            .bind(league_id)
            .fetch_all(pool.get_ref())
            .await
        ));

    let members = member_rows
        .into_iter()
        .map(|(member_id, username, joined_at)| MemberInfo {
            user_id: member_id,
            username,
            joined_at,
            is_owner: member_id == league.owner_id,
        })
        .collect();

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": LeagueDetail { league, members }
    })))
}

#[tracing::instrument(
    name = "Update league",
    skip(request, pool, claims),
    fields(username = %claims.username)
)]
pub async fn update_league(
    league_id: Uuid,
    request: web::Json<UpdateLeagueRequest>,
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

    if league.owner_id != user_id {
        return Ok(HttpResponse::Forbidden().json(json!({
            "success": false,
            "message": "Only the league owner can update the league"
        })));
    }

    if let Some(max_members) = request.max_members {
        let members = ok_or_return!(require_ok(
            league_queries::member_count(pool.get_ref(), league_id).await
        ));
        if (max_members as i64) < members {
            return Ok(HttpResponse::Conflict().json(json!({
                "success": false,
                "message": "max_members cannot drop below the current member count"
            })));
        }
    }

    let result = sqlx::query(
        r#"
        UPDATE leagues
        SET name = COALESCE($1, name),
            max_members = COALESCE($2, max_members),
            updated_at = NOW()
        WHERE id = $3
        "#,
    )
    .bind(request.name.as_deref().map(str::trim))
    .bind(request.max_members)
    .bind(league_id)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "League updated"
        }))),
        Err(e) => {
            tracing::error!("Failed to update league {}: {:?}", league_id, e);
            Ok(db_error_response())
        }
    }
}
