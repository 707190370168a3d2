//! Submission of a chosen character.
//!
//! # Module Structure
//!
//! - `payload`: Canonical JSON payload built per attempt
//! - `webhook`: [`WebhookSender`] seam for the external automation endpoint
//! - `pipeline`: Webhook-first delivery with a best-effort native companion send

mod payload;
mod pipeline;
mod webhook;

// Re-export public API
pub use payload::{SubmissionPayload, ACTION_CHARACTER_SELECTED};
pub use pipeline::{SubmissionPipeline, SubmissionReceipt};
pub use webhook::WebhookSender;
