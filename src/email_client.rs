use crate::domain::ContactMessage;
use crate::submission::DeliveryError;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

/// Client for the EmailJS REST API, which renders a template and mails the
/// result to the account owner.
pub struct EmailJsClient {
    http_client: Client,
    // the API url that we want to call and have it send the email for us
    base_url: String,
    service_id: String,
    template_id: String,
    public_key: String,
    private_key: Option<Secret<String>>,
}

#[derive(serde::Serialize)]
struct SendEmailRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
}

#[derive(serde::Serialize)]
struct TemplateParams<'a> {
    from_name: &'a str,
    from_email: &'a str,
    message: &'a str,
}

impl EmailJsClient {
    pub fn new(
        base_url: String,
        service_id: String,
        template_id: String,
        public_key: String,
        private_key: Option<Secret<String>>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            service_id,
            template_id,
            public_key,
            private_key,
        })
    }

    #[tracing::instrument(
        name = "Sending a contact message through EmailJS",
        skip(self, message),
        fields(sender_email = %message.email)
    )]
    pub async fn send_email(&self, message: &ContactMessage) -> Result<(), DeliveryError> {
        let url = format!("{}/api/v1.0/email/send", self.base_url.trim_end_matches('/'));
        let request_body = SendEmailRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            template_params: TemplateParams {
                from_name: message.name.as_ref(),
                from_email: message.email.as_ref(),
                message: message.message.as_ref(),
            },
            access_token: self
                .private_key
                .as_ref()
                .map(|key| key.expose_secret().as_str()),
        };

        let response = self
            .http_client
            .post(&url)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        // EmailJS explains rejections in a plain-text body.
        let reason = response.text().await.unwrap_or_default();
        Err(DeliveryError::Rejected {
            status: status.as_u16(),
            reason: reason.trim().to_string(),
        })
    }
}
