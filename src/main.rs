use std::net::TcpListener;

use contact_relay::{
    configuration::get_configuration,
    startup::run,
    telemetry::{get_subscriber, init_subscriber},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize the logger
    let subscriber = get_subscriber("contact_relay".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration()?;

    let missing = configuration.email_client.missing_keys();
    if !missing.is_empty() {
        tracing::warn!(
            missing_keys = ?missing,
            "EmailJS credentials are incomplete; contact messages will be rejected."
        );
    }

    let email_client = configuration.email_client.client()?;

    let addr_to_bind = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&addr_to_bind)?;
    tracing::info!(address = %addr_to_bind, "Contact relay listening.");

    run(listener, email_client)?.await?;
    Ok(())
}
