/// Display name of the visitor sending a contact message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderName(String);

impl SenderName {
    pub fn parse(s: String) -> Result<SenderName, String> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err("Name is required".to_string());
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for SenderName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
