use anyhow::Context;
use folio_email_contracts::EmailService;
use folio_email_impl::{EmailServiceConfig, EmailServiceImpl};
use tracing::{info, warn};

/// Set up the smtp session and check it once. An unreachable smtp server is
/// reported but does not stop the caller.
pub async fn connect(config: EmailServiceConfig) -> anyhow::Result<EmailServiceImpl> {
    let host = config.smtp_host.clone();
    let email = EmailServiceImpl::new(config).context("Failed to set up smtp transport")?;

    match email.ping().await {
        Ok(()) => info!("Connected to smtp server at {host}"),
        Err(err) => warn!("Could not verify smtp connection to {host}: {err:#}"),
    }

    Ok(email)
}
