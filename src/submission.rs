//! Delivery of validated contact messages.
//!
//! A [`SubmissionAdapter`] forwards a [`ContactMessage`] through exactly one
//! [`DeliveryStrategy`] and reduces whatever happens to a
//! [`SubmissionOutcome`]. Nothing escapes `submit` as an error.

use reqwest::Client;
use uuid::Uuid;

use crate::domain::ContactMessage;
use crate::email_client::EmailJsClient;

/// Reason reported when a failure carries no explanation of its own.
pub const FALLBACK_REASON: &str = "Failed to send message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Sent,
    Failed(String),
}

impl SubmissionOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, SubmissionOutcome::Sent)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("Failed to reach the delivery endpoint.")]
    Transport(#[from] reqwest::Error),
    #[error("Delivery was rejected with status {status}: {reason}")]
    Rejected { status: u16, reason: String },
}

impl DeliveryError {
    /// The text surfaced to the caller in [`SubmissionOutcome::Failed`].
    pub fn reason(&self) -> String {
        match self {
            DeliveryError::Rejected { reason, .. } if !reason.trim().is_empty() => reason.clone(),
            _ => FALLBACK_REASON.to_string(),
        }
    }
}

/// Client for a same-origin endpoint that forwards submissions to the
/// delivery provider, keeping provider credentials off the caller.
pub struct RelayClient {
    http_client: Client,
    relay_url: String,
}

#[derive(serde::Serialize)]
struct RelayRequest<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

#[derive(serde::Deserialize)]
struct RelayErrorBody {
    error: Option<String>,
}

impl RelayClient {
    pub fn new(relay_url: String, timeout: std::time::Duration) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            relay_url,
        })
    }

    #[tracing::instrument(
        name = "Posting a contact message to the relay endpoint",
        skip(self, message),
        fields(relay_url = %self.relay_url)
    )]
    pub async fn post(&self, message: &ContactMessage) -> Result<(), DeliveryError> {
        let response = self
            .http_client
            .post(&self.relay_url)
            .json(&RelayRequest {
                name: message.name.as_ref(),
                email: message.email.as_ref(),
                message: message.message.as_ref(),
            })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let reason = response
            .json::<RelayErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_default();
        Err(DeliveryError::Rejected {
            status: status.as_u16(),
            reason,
        })
    }
}

pub enum DeliveryStrategy {
    /// Call the provider API directly.
    Direct(EmailJsClient),
    /// Post to the relay endpoint.
    Relay(RelayClient),
}

pub struct SubmissionAdapter {
    strategy: DeliveryStrategy,
}

impl SubmissionAdapter {
    pub fn new(strategy: DeliveryStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &DeliveryStrategy {
        &self.strategy
    }

    /// Makes a single delivery attempt. No retry is made on failure.
    #[tracing::instrument(
        name = "Submitting a contact message",
        skip(self, message),
        fields(submission_id = %Uuid::new_v4(), sender_email = %message.email)
    )]
    pub async fn submit(&self, message: &ContactMessage) -> SubmissionOutcome {
        let delivered = match &self.strategy {
            DeliveryStrategy::Direct(client) => client.send_email(message).await,
            DeliveryStrategy::Relay(client) => client.post(message).await,
        };

        match delivered {
            Ok(()) => {
                tracing::info!("Contact message delivered.");
                SubmissionOutcome::Sent
            }
            Err(e) => {
                tracing::error!(error.cause_chain = ?e, "Failed to deliver contact message.");
                SubmissionOutcome::Failed(e.reason())
            }
        }
    }
}
