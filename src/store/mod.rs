//! Health log persistence
//!
//! Completed coaching sessions are appended to a `health_logs` table.
//! Backends: Supabase REST, direct Postgres, or in-memory for tests.
//! Writes are best-effort; the workflow drops any error they return.

use crate::config::AppConfig;
use crate::models::HealthLogEntry;
use crate::Result;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

pub mod postgres;
pub mod supabase;

pub use postgres::PostgresStore;
pub use supabase::SupabaseStore;

pub const HEALTH_LOG_TABLE: &str = "health_logs";

/// Append-only sink for completed sessions
#[async_trait::async_trait]
pub trait HealthLogStore: Send + Sync {
    fn backend(&self) -> &'static str;
    async fn record(&self, entry: &HealthLogEntry) -> Result<()>;
}

/// In-memory store for development and tests
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<RwLock<Vec<HealthLogEntry>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entries(&self) -> Vec<HealthLogEntry> {
        self.entries.read().await.clone()
    }

    /// Polls until `count` entries landed from detached writes, or two seconds pass.
    #[cfg(test)]
    pub async fn wait_for_entries(&self, count: usize) -> Vec<HealthLogEntry> {
        for _ in 0..200 {
            let entries = self.entries().await;
            if entries.len() >= count {
                return entries;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        self.entries().await
    }
}

#[async_trait::async_trait]
impl HealthLogStore for InMemoryStore {
    fn backend(&self) -> &'static str {
        "in-memory"
    }

    async fn record(&self, entry: &HealthLogEntry) -> Result<()> {
        self.entries.write().await.push(entry.clone());
        Ok(())
    }
}

/// Pick a backend from config. Supabase wins over a raw database URL;
/// with neither configured persistence is off.
pub fn build_store(config: &AppConfig) -> Option<Arc<dyn HealthLogStore>> {
    if let Some(supabase) = &config.supabase {
        match SupabaseStore::new(supabase) {
            Ok(store) => {
                info!("Health log backend: supabase");
                return Some(Arc::new(store));
            }
            Err(error) => {
                warn!("Failed to build supabase client, trying next backend: {}", error);
            }
        }
    }

    if let Some(url) = &config.database_url {
        match PostgresStore::connect_lazy(url) {
            Ok(store) => {
                info!("Health log backend: postgres");
                return Some(Arc::new(store));
            }
            Err(error) => {
                warn!("Failed to initialize postgres backend: {}", error);
            }
        }
    }

    info!("Health log backend: disabled");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SupabaseConfig;
    use crate::models::FocusArea;

    fn entry(user: &str) -> HealthLogEntry {
        HealthLogEntry {
            user_name: user.to_string(),
            focus_area: FocusArea::Resilience,
            goal: Some("sleep 8h".to_string()),
            activity_level: Some("low".to_string()),
            primary_metric: Some("sleep hours".to_string()),
            timestamp: "2024-05-01T09:30:00.000000+00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_in_memory_store_appends() {
        let store = InMemoryStore::new();
        store.record(&entry("a")).await.unwrap();
        store.record(&entry("b")).await.unwrap();

        let entries = store.entries().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].user_name, "b");
    }

    #[test]
    fn test_build_store_disabled_without_config() {
        assert!(build_store(&AppConfig::default()).is_none());
    }

    #[tokio::test]
    async fn test_build_store_prefers_supabase() {
        let config = AppConfig {
            supabase: Some(SupabaseConfig {
                url: "http://127.0.0.1:9".to_string(),
                key: "k".to_string(),
            }),
            database_url: Some("postgres://localhost/wellness".to_string()),
            ..AppConfig::default()
        };
        let store = build_store(&config).unwrap();
        assert_eq!(store.backend(), "supabase");
    }

    #[tokio::test]
    async fn test_build_store_falls_back_to_postgres() {
        let config = AppConfig {
            database_url: Some("postgres://user:pw@localhost/wellness".to_string()),
            ..AppConfig::default()
        };
        let store = build_store(&config).unwrap();
        assert_eq!(store.backend(), "postgres");
    }
}
