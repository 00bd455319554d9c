use std::error::Error;
use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::models::season::Episode;

/// Background scheduler that locks episode picks on time, so pick
/// immutability does not depend on an admin pressing the button.
pub struct SchedulerService {
    scheduler: Arc<Mutex<JobScheduler>>,
    pool: PgPool,
}

impl SchedulerService {
    pub async fn new(pool: PgPool) -> Result<Self, Box<dyn Error>> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            scheduler: Arc::new(Mutex::new(scheduler)),
            pool,
        })
    }

    pub async fn start(&self) -> Result<(), Box<dyn Error>> {
        let scheduler = self.scheduler.lock().await;

        let pool = self.pool.clone();
        // Every minute, on the minute
        let lock_job = Job::new_async("0 * * * * *", move |_uuid, _l| {
            let pool = pool.clone();
            Box::pin(async move {
                match lock_due_episodes(&pool).await {
                    Ok(locked) if locked.is_empty() => {}
                    Ok(locked) => {
                        for episode in &locked {
                            tracing::info!(
                                "Locked picks for episode {} ({})",
                                episode.number,
                                episode.title
                            );
                        }
                    }
                    Err(e) => {
                        tracing::error!("Episode lock sweep failed: {}", e);
                    }
                }
            })
        })?;

        scheduler.add(lock_job).await?;
        scheduler.start().await?;

        tracing::info!("Scheduler service started");
        Ok(())
    }

    pub async fn stop(&self) -> Result<(), Box<dyn Error>> {
        let mut scheduler = self.scheduler.lock().await;
        scheduler.shutdown().await?;

        tracing::info!("Scheduler service stopped");
        Ok(())
    }
}

/// Flip every upcoming episode whose lock time has passed to locked.
/// Exposed on its own so tests can drive the transition without cron.
pub async fn lock_due_episodes(pool: &PgPool) -> Result<Vec<Episode>, sqlx::Error> {
    sqlx::query_as::<_, Episode>(
        r#"
        UPDATE episodes
        SET status = 'locked', updated_at = NOW()
        WHERE status = 'upcoming' AND picks_lock_at <= NOW()
        RETURNING *
        "#,
    )
    .fetch_all(pool)
    .await
}
