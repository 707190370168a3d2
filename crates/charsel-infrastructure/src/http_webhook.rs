//! Webhook delivery over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use charsel_core::config::WebhookSettings;
use charsel_core::error::{CharselError, Result};
use charsel_core::submission::{SubmissionPayload, WebhookSender};
use reqwest::Client;

/// Posts submission payloads as JSON to the configured endpoint.
///
/// A delivery succeeds on a 2xx status with a JSON body. Anything else,
/// including timeouts and connection errors, is a [`CharselError::Network`].
pub struct HttpWebhookSender {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpWebhookSender {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self::with_client(Client::new(), url, timeout)
    }

    pub fn with_client(client: Client, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            url: url.into(),
            timeout,
        }
    }

    pub fn from_settings(settings: &WebhookSettings) -> Self {
        Self::new(
            settings.url.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl WebhookSender for HttpWebhookSender {
    async fn deliver(&self, payload: &SubmissionPayload) -> Result<()> {
        tracing::debug!(
            "[HttpWebhookSender] POST {} (character: {})",
            self.url,
            payload.character_id
        );

        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| CharselError::network(format!("Webhook request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CharselError::http_status(
                status.as_u16(),
                format!("Webhook error ({}): {}", status, error_text),
            ));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            CharselError::network(format!("Failed to parse webhook response: {}", e))
        })?;
        tracing::info!("[HttpWebhookSender] Webhook answered {}: {}", status, body);
        Ok(())
    }
}
