//! Season-wide descriptive statistics. Every endpoint follows the same
//! shape: fetch the season's rows once, reduce in memory with the
//! `aggregate` toolkit, sort, and return.

pub mod aggregate;
mod castaways;
mod draft_value;
mod picks;
mod spotlight;
mod users;

use sqlx::PgPool;

pub struct StatsService {
    pool: PgPool,
}

impl StatsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }
}
