use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::domain::{validate, ContactMessage, ContactSubmission, Field, ValidationResult};
use crate::submission::{SubmissionAdapter, SubmissionOutcome};

pub const SUCCESS_BANNER: &str = "Message sent successfully!";
pub const FAILURE_BANNER: &str = "Failed to send message. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejected {
    #[error("A submission is already in flight.")]
    InFlight,
    #[error("The form has invalid fields.")]
    Invalid(ValidationResult),
}

/// Transient state of one contact form instance.
///
/// `Success` and `Error` fall back to `Idle` once `status_display` has
/// elapsed, or as soon as the next submit attempt starts.
#[derive(Debug, Clone)]
pub struct ContactForm {
    pub fields: ContactSubmission,
    field_errors: BTreeMap<Field, String>,
    status: FormStatus,
    status_since: Instant,
    status_display: Duration,
    resets: usize,
}

impl ContactForm {
    pub fn new(status_display: Duration, now: Instant) -> Self {
        Self {
            fields: ContactSubmission::default(),
            field_errors: BTreeMap::new(),
            status: FormStatus::Idle,
            status_since: now,
            status_display,
            resets: 0,
        }
    }

    pub fn status(&mut self, now: Instant) -> FormStatus {
        self.expire_banner(now);
        self.status
    }

    pub fn can_submit(&self) -> bool {
        self.status != FormStatus::Submitting
    }

    pub fn field_error(&self, field: Field) -> Option<&str> {
        self.field_errors.get(&field).map(String::as_str)
    }

    /// Number of times the inputs were cleared after a confirmed delivery.
    pub fn resets(&self) -> usize {
        self.resets
    }

    pub fn banner(&mut self, now: Instant) -> Option<&'static str> {
        match self.status(now) {
            FormStatus::Success => Some(SUCCESS_BANNER),
            FormStatus::Error => Some(FAILURE_BANNER),
            FormStatus::Idle | FormStatus::Submitting => None,
        }
    }

    /// Validates the inputs and, if they pass, moves to `Submitting`.
    pub fn begin_submit(&mut self, now: Instant) -> Result<ContactMessage, SubmitRejected> {
        if self.status == FormStatus::Submitting {
            return Err(SubmitRejected::InFlight);
        }
        self.set_status(FormStatus::Idle, now);

        match ContactMessage::try_from(&self.fields) {
            Ok(message) => {
                self.field_errors.clear();
                self.set_status(FormStatus::Submitting, now);
                Ok(message)
            }
            Err(result) => {
                self.field_errors = result.errors.clone();
                Err(SubmitRejected::Invalid(result))
            }
        }
    }

    pub fn finish_submit(&mut self, outcome: &SubmissionOutcome, now: Instant) {
        if self.status != FormStatus::Submitting {
            tracing::warn!("Ignoring a delivery outcome with no submission in flight.");
            return;
        }

        match outcome {
            SubmissionOutcome::Sent => {
                self.fields = ContactSubmission::default();
                self.resets += 1;
                self.set_status(FormStatus::Success, now);
            }
            SubmissionOutcome::Failed(reason) => {
                tracing::warn!(%reason, "Contact message was not delivered.");
                self.set_status(FormStatus::Error, now);
            }
        }
    }

    /// Runs a full submit cycle against `adapter`.
    pub async fn submit(
        &mut self,
        adapter: &SubmissionAdapter,
        now: Instant,
    ) -> Result<SubmissionOutcome, SubmitRejected> {
        let message = self.begin_submit(now)?;
        let outcome = adapter.submit(&message).await;
        self.finish_submit(&outcome, Instant::now().max(now));
        Ok(outcome)
    }

    /// Validates the current inputs without touching the form status.
    pub fn validation(&self) -> ValidationResult {
        validate(&self.fields)
    }

    fn set_status(&mut self, status: FormStatus, now: Instant) {
        self.status = status;
        self.status_since = now;
    }

    fn expire_banner(&mut self, now: Instant) {
        let shows_banner = matches!(self.status, FormStatus::Success | FormStatus::Error);
        if shows_banner && now.saturating_duration_since(self.status_since) >= self.status_display {
            self.set_status(FormStatus::Idle, now);
        }
    }
}
