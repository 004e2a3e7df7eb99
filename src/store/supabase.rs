//! Supabase (PostgREST) backend for the health log

use super::{HealthLogStore, HEALTH_LOG_TABLE};
use crate::config::SupabaseConfig;
use crate::error::CoachError;
use crate::models::HealthLogEntry;
use crate::Result;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

pub struct SupabaseStore {
    client: Client,
    insert_url: String,
    key: String,
}

impl SupabaseStore {
    pub fn new(config: &SupabaseConfig) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(60))
            .pool_max_idle_per_host(4)
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            insert_url: format!("{}/rest/v1/{}", config.url, HEALTH_LOG_TABLE),
            key: config.key.clone(),
        })
    }
}

#[async_trait::async_trait]
impl HealthLogStore for SupabaseStore {
    fn backend(&self) -> &'static str {
        "supabase"
    }

    async fn record(&self, entry: &HealthLogEntry) -> Result<()> {
        let response = self
            .client
            .post(&self.insert_url)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("Prefer", "return=minimal")
            .json(entry)
            .send()
            .await
            .map_err(|e| CoachError::Persistence(format!("supabase insert failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CoachError::Persistence(format!(
                "supabase returned {}: {}",
                status, body
            )));
        }

        debug!(user_name = %entry.user_name, "Health log stored in supabase");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FocusArea;
    use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use std::sync::{Arc, Mutex};

    fn entry() -> HealthLogEntry {
        HealthLogEntry {
            user_name: "sam".to_string(),
            focus_area: FocusArea::Fitness,
            goal: Some("lose weight".to_string()),
            activity_level: Some("moderate".to_string()),
            primary_metric: Some("steps".to_string()),
            timestamp: "2024-05-01T09:30:00.000000+00:00".to_string(),
        }
    }

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_insert_posts_row_with_auth_headers() {
        let seen: Arc<Mutex<Vec<(String, serde_json::Value)>>> = Arc::default();
        let sink = seen.clone();
        let router = Router::new().route(
            "/rest/v1/health_logs",
            post(move |headers: HeaderMap, Json(body): Json<serde_json::Value>| {
                let sink = sink.clone();
                async move {
                    let key = headers
                        .get("apikey")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    sink.lock().unwrap().push((key, body));
                    StatusCode::CREATED
                }
            }),
        );
        let url = spawn(router).await;

        let store = SupabaseStore::new(&SupabaseConfig {
            url,
            key: "anon-key".to_string(),
        })
        .unwrap();
        store.record(&entry()).await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "anon-key");
        assert_eq!(seen[0].1["primary_goal"], "lose weight");
        assert_eq!(seen[0].1["health_metric"], "steps");
    }

    #[tokio::test]
    async fn test_rejected_insert_is_persistence_error() {
        let router = Router::new().route(
            "/rest/v1/health_logs",
            post(|| async { (StatusCode::UNAUTHORIZED, "bad key") }),
        );
        let url = spawn(router).await;

        let store = SupabaseStore::new(&SupabaseConfig {
            url,
            key: "wrong".to_string(),
        })
        .unwrap();
        let err = store.record(&entry()).await.unwrap_err();
        assert!(matches!(err, CoachError::Persistence(_)));
    }
}
