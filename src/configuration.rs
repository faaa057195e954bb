use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::email_client::EmailJsClient;
use crate::submission::{DeliveryStrategy, RelayClient, SubmissionAdapter};

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either 'local' or 'production'.",
                other
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailJsSettings,
    pub submission: SubmissionSettings,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

/// Credentials and endpoint of the EmailJS account that receives messages.
///
/// The service, template and public key identify the account and are not
/// secret; the private key, when set, is sent as the access token.
#[derive(Debug, Deserialize)]
pub struct EmailJsSettings {
    pub base_url: String,
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub template_id: String,
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub private_key: Option<Secret<String>>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl EmailJsSettings {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }

    /// Names of the required keys that are unset or blank.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        [
            ("EMAILJS_SERVICE_ID", &self.service_id),
            ("EMAILJS_TEMPLATE_ID", &self.template_id),
            ("EMAILJS_PUBLIC_KEY", &self.public_key),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(key, _)| key)
        .collect()
    }

    pub fn is_configured(&self) -> bool {
        self.missing_keys().is_empty()
    }

    pub fn client(&self) -> Result<EmailJsClient, reqwest::Error> {
        EmailJsClient::new(
            self.base_url.clone(),
            self.service_id.clone(),
            self.template_id.clone(),
            self.public_key.clone(),
            self.private_key
                .as_ref()
                .map(|key| Secret::new(key.expose_secret().clone())),
            self.timeout(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Direct,
    Relay,
}

#[derive(Debug, Deserialize)]
pub struct SubmissionSettings {
    pub strategy: StrategyKind,
    pub relay_url: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub status_display_milliseconds: u64,
}

impl SubmissionSettings {
    pub fn status_display(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.status_display_milliseconds)
    }
}

impl Settings {
    /// Builds the adapter for the configured delivery strategy.
    pub fn submission_adapter(&self) -> Result<SubmissionAdapter, reqwest::Error> {
        let strategy = match self.submission.strategy {
            StrategyKind::Direct => DeliveryStrategy::Direct(self.email_client.client()?),
            StrategyKind::Relay => DeliveryStrategy::Relay(RelayClient::new(
                self.submission.relay_url.clone(),
                self.email_client.timeout(),
            )?),
        };
        Ok(SubmissionAdapter::new(strategy))
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine current directory: {e}"))
    })?;
    let config_dir = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        // try to convert the "local" String into an Environment::Local enum
        .try_into()
        .map_err(config::ConfigError::Message)?;

    let environment_file = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(config_dir.join("base.yaml")))
        .add_source(config::File::from(config_dir.join(environment_file)))
        // e.g. APP_APPLICATION__PORT=5001 sets Settings.application.port
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .set_override_option("email_client.service_id", env_key("EMAILJS_SERVICE_ID"))?
        .set_override_option("email_client.template_id", env_key("EMAILJS_TEMPLATE_ID"))?
        .set_override_option("email_client.public_key", env_key("EMAILJS_PUBLIC_KEY"))?
        .set_override_option("email_client.private_key", env_key("EMAILJS_PRIVATE_KEY"))?
        .build()?;

    settings.try_deserialize::<Settings>()
}

fn env_key(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
