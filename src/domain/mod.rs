mod contact_submission;
mod message_body;
mod sender_email;
mod sender_name;

// expose chosen features on a sub-crate level
pub use contact_submission::validate;
pub use contact_submission::ContactMessage;
pub use contact_submission::ContactSubmission;
pub use contact_submission::Field;
pub use contact_submission::ValidationResult;
pub use message_body::MessageBody;
pub use sender_email::SenderEmail;
pub use sender_name::SenderName;
