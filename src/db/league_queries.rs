//! Shared fetches used by several handlers.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::castaway::Castaway;
use crate::models::league::League;
use crate::models::season::{Episode, Season};

pub async fn get_league(pool: &PgPool, league_id: Uuid) -> Result<Option<League>, sqlx::Error> {
    sqlx::query_as::<_, League>("SELECT * FROM leagues WHERE id = $1")
        .bind(league_id)
        .fetch_optional(pool)
        .await
}

pub async fn is_league_member(
    pool: &PgPool,
    league_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let row: Option<(Uuid,)> = sqlx::query_as(
        "SELECT id FROM league_members WHERE league_id = $1 AND user_id = $2",
    )
    .bind(league_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.is_some())
}

pub async fn member_count(pool: &PgPool, league_id: Uuid) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM league_members WHERE league_id = $1")
            .bind(league_id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

pub async fn get_active_season(pool: &PgPool) -> Result<Option<Season>, sqlx::Error> {
    sqlx::query_as::<_, Season>("SELECT * FROM seasons WHERE is_active")
        .fetch_optional(pool)
        .await
}

pub async fn get_episode(pool: &PgPool, episode_id: Uuid) -> Result<Option<Episode>, sqlx::Error> {
    sqlx::query_as::<_, Episode>("SELECT * FROM episodes WHERE id = $1")
        .bind(episode_id)
        .fetch_optional(pool)
        .await
}

pub async fn get_castaway(
    pool: &PgPool,
    castaway_id: Uuid,
) -> Result<Option<Castaway>, sqlx::Error> {
    sqlx::query_as::<_, Castaway>("SELECT * FROM castaways WHERE id = $1")
        .bind(castaway_id)
        .fetch_optional(pool)
        .await
}
