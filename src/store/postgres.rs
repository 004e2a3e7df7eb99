//! Direct Postgres backend for the health log (sqlx)

use super::HealthLogStore;
use crate::error::CoachError;
use crate::models::HealthLogEntry;
use crate::Result;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::debug;

/// Upper bound on waiting for a pooled connection while the database is down.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(3);

pub struct PostgresStore {
    pool: PgPool,
    schema_ready: Arc<OnceCell<()>>,
}

impl PostgresStore {
    /// Pool connects on first use, so startup never blocks on the database.
    pub fn connect_lazy(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_lazy(url)?;

        Ok(Self {
            pool,
            schema_ready: Arc::new(OnceCell::new()),
        })
    }

    async fn ensure_schema(&self) -> Result<()> {
        self.schema_ready
            .get_or_try_init(|| async {
                sqlx::query(
                    r#"
                    CREATE TABLE IF NOT EXISTS health_logs (
                      id BIGSERIAL PRIMARY KEY,
                      user_name TEXT NOT NULL,
                      focus_area TEXT NOT NULL,
                      primary_goal TEXT,
                      activity_level TEXT,
                      health_metric TEXT,
                      timestamp TIMESTAMPTZ NOT NULL DEFAULT NOW()
                    );
                    "#,
                )
                .execute(&self.pool)
                .await?;

                Ok::<(), sqlx::Error>(())
            })
            .await
            .map_err(|e| {
                CoachError::Database(format!("Failed to initialize health_logs schema: {}", e))
            })?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl HealthLogStore for PostgresStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn record(&self, entry: &HealthLogEntry) -> Result<()> {
        self.ensure_schema().await?;

        let timestamp = chrono::DateTime::parse_from_rfc3339(&entry.timestamp)
            .map(|ts| ts.with_timezone(&chrono::Utc))
            .unwrap_or_else(|_| chrono::Utc::now());

        sqlx::query(
            r#"
            INSERT INTO health_logs
              (user_name, focus_area, primary_goal, activity_level, health_metric, timestamp)
            VALUES
              ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&entry.user_name)
        .bind(entry.focus_area.as_str())
        .bind(&entry.goal)
        .bind(&entry.activity_level)
        .bind(&entry.primary_metric)
        .bind(timestamp)
        .execute(&self.pool)
        .await
        .map_err(|e| CoachError::Database(format!("Failed to insert health log: {}", e)))?;

        debug!(user_name = %entry.user_name, "Health log stored in postgres");
        Ok(())
    }
}
