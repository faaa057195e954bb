use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody(String);

impl MessageBody {
    pub const MAX_LENGTH: usize = 4096;

    pub fn parse(s: String) -> Result<MessageBody, String> {
        if s.trim().is_empty() {
            return Err("Message is required".to_string());
        }

        // Counted on the raw text: inner line breaks are part of the message.
        if s.graphemes(true).count() > Self::MAX_LENGTH {
            return Err(format!(
                "Message must be at most {} characters",
                Self::MAX_LENGTH
            ));
        }

        Ok(Self(s))
    }
}

impl AsRef<str> for MessageBody {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
