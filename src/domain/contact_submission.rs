use std::collections::BTreeMap;

use crate::domain::message_body::MessageBody;
use crate::domain::sender_email::SenderEmail;
use crate::domain::sender_name::SenderName;

/// The raw fields of a contact form, as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: BTreeMap<Field, String>,
}

/// A submission whose every field passed validation. This is the only shape
/// the delivery side accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: SenderName,
    pub email: SenderEmail,
    pub message: MessageBody,
}

/// Checks every field of `submission` and collects all failures at once.
pub fn validate(submission: &ContactSubmission) -> ValidationResult {
    parse_fields(submission).1
}

fn parse_fields(submission: &ContactSubmission) -> (Option<ContactMessage>, ValidationResult) {
    let mut errors = BTreeMap::new();

    let name = SenderName::parse(submission.name.clone())
        .map_err(|reason| errors.insert(Field::Name, reason))
        .ok();
    let email = SenderEmail::parse(submission.email.clone())
        .map_err(|reason| errors.insert(Field::Email, reason))
        .ok();
    let message = MessageBody::parse(submission.message.clone())
        .map_err(|reason| errors.insert(Field::Message, reason))
        .ok();

    let parsed = match (name, email, message) {
        (Some(name), Some(email), Some(message)) => Some(ContactMessage {
            name,
            email,
            message,
        }),
        _ => None,
    };

    let result = ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    };
    (parsed, result)
}

impl TryFrom<ContactSubmission> for ContactMessage {
    type Error = ValidationResult;

    fn try_from(submission: ContactSubmission) -> Result<Self, Self::Error> {
        match parse_fields(&submission) {
            (Some(message), _) => Ok(message),
            (None, result) => Err(result),
        }
    }
}

impl TryFrom<&ContactSubmission> for ContactMessage {
    type Error = ValidationResult;

    fn try_from(submission: &ContactSubmission) -> Result<Self, Self::Error> {
        match parse_fields(submission) {
            (Some(message), _) => Ok(message),
            (None, result) => Err(result),
        }
    }
}
