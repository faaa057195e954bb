use std::collections::BTreeMap;

use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use anyhow::Context;

use crate::domain::{ContactMessage, ContactSubmission, Field, ValidationResult};
use crate::email_client::EmailJsClient;
use crate::form::FAILURE_BANNER;

#[derive(serde::Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a BTreeMap<Field, String>>,
}

#[tracing::instrument(
    name = "Relaying a contact message",
    skip(submission, email_client),
    fields(
        sender_email = %submission.email,
        sender_name = %submission.name
    )
)]
pub async fn contact(
    submission: web::Json<ContactSubmission>,
    email_client: web::Data<EmailJsClient>,
) -> Result<HttpResponse, ContactError> {
    let message =
        ContactMessage::try_from(submission.into_inner()).map_err(ContactError::Validation)?;

    email_client
        .send_email(&message)
        .await
        .context("Failed to deliver the contact message through EmailJS.")?;

    Ok(HttpResponse::Ok().finish())
}

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("Invalid contact form submission.")]
    Validation(ValidationResult),
    #[error(transparent)]
    Delivery(#[from] anyhow::Error),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContactError::Validation(result) => write!(f, "{}\n{:?}", self, result.errors),
            ContactError::Delivery(e) => write!(f, "{:?}", e),
        }
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::Validation(_) => StatusCode::BAD_REQUEST,
            ContactError::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ContactError::Validation(result) => ErrorBody {
                error: "Invalid contact form submission.",
                fields: Some(&result.errors),
            },
            ContactError::Delivery(e) => {
                tracing::error!(error.cause_chain = ?e, "Contact message was not delivered.");
                ErrorBody {
                    error: FAILURE_BANNER,
                    fields: None,
                }
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Answers malformed JSON bodies with the same `{error}` shape as the route.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    tracing::warn!(error = %err, "Rejected an unreadable contact payload.");
    let response = HttpResponse::BadRequest().json(ErrorBody {
        error: "Invalid contact form submission.",
        fields: None,
    });
    actix_web::error::InternalError::from_response(err, response).into()
}
