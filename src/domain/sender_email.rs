use validator::validate_email;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderEmail(String);

impl SenderEmail {
    pub fn parse(s: String) -> Result<SenderEmail, String> {
        let trimmed = s.trim();

        if has_address_shape(trimmed) && validate_email(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err("Valid email is required".to_string())
        }
    }
}

/// `local@domain.tld`: one `@`, no whitespace, and a dotted domain whose
/// labels are all non-empty.
fn has_address_shape(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

impl AsRef<str> for SenderEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SenderEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
