use std::sync::Arc;

use super::payload::SubmissionPayload;
use super::webhook::WebhookSender;
use crate::error::Result;
use crate::platform::PlatformBridge;

/// Outcome of a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// Whether the companion native send reported success
    pub native_delivered: bool,
}

/// Delivers a payload to the webhook and, on success, to the native channel.
///
/// The webhook decides the outcome. A webhook failure is reported as is and
/// the native channel is not tried; the user retries by confirming again.
/// Nothing is retried here.
pub struct SubmissionPipeline {
    webhook: Arc<dyn WebhookSender>,
    bridge: Arc<dyn PlatformBridge>,
}

impl SubmissionPipeline {
    pub fn new(webhook: Arc<dyn WebhookSender>, bridge: Arc<dyn PlatformBridge>) -> Self {
        Self { webhook, bridge }
    }

    pub async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmissionReceipt> {
        if payload.is_anonymous() {
            tracing::debug!("[SubmissionPipeline] Submitting for an anonymous session");
        }

        if let Err(e) = self.webhook.deliver(payload).await {
            tracing::error!(
                "[SubmissionPipeline] Webhook delivery of '{}' failed: {}",
                payload.character_id,
                e
            );
            return Err(e);
        }
        tracing::info!(
            "[SubmissionPipeline] Webhook accepted selection of '{}'",
            payload.character_id
        );

        let native_delivered = match payload.to_json() {
            Ok(json) => self.bridge.send_native(&json).await,
            Err(e) => {
                tracing::warn!("[SubmissionPipeline] Cannot encode payload for native send: {}", e);
                false
            }
        };
        if !native_delivered {
            tracing::warn!("[SubmissionPipeline] Companion native send did not go through");
        }

        Ok(SubmissionReceipt { native_delivered })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterCatalog;
    use crate::testing::{RecordingBridge, ScriptedWebhook};

    fn payload() -> SubmissionPayload {
        let anna = CharacterCatalog::builtin().get("anna").cloned().unwrap();
        SubmissionPayload::new(&anna, None, "miniapp")
    }

    #[tokio::test]
    async fn test_webhook_failure_skips_native_channel() {
        let bridge = Arc::new(RecordingBridge::default());
        let webhook = Arc::new(ScriptedWebhook::with_status(500));
        let pipeline = SubmissionPipeline::new(webhook.clone(), bridge.clone());

        let err = pipeline.submit(&payload()).await.unwrap_err();

        assert!(err.is_network());
        assert_eq!(webhook.deliveries(), 1);
        assert!(bridge.native_sends().is_empty());
    }

    #[tokio::test]
    async fn test_webhook_success_sends_same_json_natively_once() {
        let bridge = Arc::new(RecordingBridge::default());
        let webhook = Arc::new(ScriptedWebhook::with_status(200));
        let pipeline = SubmissionPipeline::new(webhook.clone(), bridge.clone());
        let payload = payload();

        let receipt = pipeline.submit(&payload).await.unwrap();

        assert!(receipt.native_delivered);
        assert_eq!(bridge.native_sends(), vec![payload.to_json().unwrap()]);
        assert_eq!(webhook.delivered.lock().unwrap()[0], payload);
    }

    #[tokio::test]
    async fn test_native_failure_does_not_fail_submission() {
        let bridge = Arc::new(RecordingBridge::default().with_native_result(false));
        let pipeline =
            SubmissionPipeline::new(Arc::new(ScriptedWebhook::with_status(204)), bridge.clone());

        let receipt = pipeline.submit(&payload()).await.unwrap();

        assert!(!receipt.native_delivered);
        assert_eq!(bridge.native_sends().len(), 1);
    }
}
