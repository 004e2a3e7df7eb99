//! Sync webhook
//!
//! Forwards a sync payload to the configured endpoint with a bounded timeout.
//! Uses a long-lived reqwest::Client for connection pooling.

use crate::config::AppConfig;
use crate::error::CoachError;
use crate::models::SyncPayload;
use crate::Result;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Delivered { remote_status: u16 },
}

#[async_trait::async_trait]
pub trait SyncNotifier: Send + Sync {
    async fn notify(&self, payload: &SyncPayload) -> Result<SyncOutcome>;
}

pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait::async_trait]
impl SyncNotifier for WebhookNotifier {
    async fn notify(&self, payload: &SyncPayload) -> Result<SyncOutcome> {
        info!(user_name = %payload.user_name, "Forwarding sync payload to webhook");

        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!("Webhook request failed: {}", e);
                CoachError::WebhookUnreachable(e.to_string())
            })?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Webhook rejected sync payload");
            return Err(CoachError::WebhookRejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(SyncOutcome::Delivered {
            remote_status: status.as_u16(),
        })
    }
}

/// None when no webhook URL is configured; `/sync` then answers "skipped".
pub fn build_notifier(config: &AppConfig) -> Result<Option<Arc<dyn SyncNotifier>>> {
    let Some(url) = &config.webhook_url else {
        info!("Sync webhook: disabled");
        return Ok(None);
    };

    let notifier = WebhookNotifier::new(url.clone(), config.webhook_timeout)?;
    info!("Sync webhook: enabled");
    Ok(Some(Arc::new(notifier)))
}
