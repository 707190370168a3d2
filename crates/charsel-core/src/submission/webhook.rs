use async_trait::async_trait;

use super::payload::SubmissionPayload;
use crate::error::Result;

/// Delivery to the external automation endpoint.
///
/// Implementations POST the payload as JSON and fail with
/// [`CharselError::Network`](crate::error::CharselError::Network) on transport
/// errors or non-2xx statuses.
#[async_trait]
pub trait WebhookSender: Send + Sync {
    async fn deliver(&self, payload: &SubmissionPayload) -> Result<()>;
}
