use std::{net::SocketAddr, sync::Arc};

use folio_api_rest::RestServerConfig;
use folio_config::Config;
use folio_core_contact_impl::ContactFeatureConfig;
use folio_core_health_impl::HealthFeatureConfig;
use folio_email_impl::{EmailServiceConfig, SmtpCredentials};
use tracing::warn;
use types::{ContactFeature, Email, HealthFeature, RestServer, Template, TemplateEmail, Time};

pub mod types;

/// Everything the services need from the config, in the shape they expect.
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    pub rest_server_config: RestServerConfig,
    pub email_service_config: EmailServiceConfig,
    pub contact_feature_config: ContactFeatureConfig,
    pub health_feature_config: HealthFeatureConfig,
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // API
        let rest_server_config = RestServerConfig {
            addr: SocketAddr::new(config.http.host, config.http.port),
            static_dir: config.http.static_dir.clone().into(),
        };

        // Email
        let credentials = match (&config.email.user, &config.email.password) {
            (Some(user), Some(password)) => Some(SmtpCredentials {
                username: user.as_str().into(),
                password: password.0.clone(),
            }),
            (Some(_), None) | (None, Some(_)) => {
                warn!("Only one of email.user and email.password is set, ignoring both");
                None
            }
            (None, None) => None,
        };

        let email_service_config = EmailServiceConfig {
            smtp_host: config.email.smtp_host.clone(),
            smtp_port: config.email.smtp_port,
            credentials,
            from: config.email.user.clone().map(|user| match &config.email.from_name {
                Some(name) => user.with_name(name.clone()),
                None => user.into(),
            }),
            timeout: config.email.timeout.into(),
        };

        // Core
        let recipient = config.contact_recipient().cloned();
        if recipient.is_none() {
            warn!("No contact recipient configured, contact form submissions will fail");
        }
        let contact_feature_config = ContactFeatureConfig {
            recipient: recipient.map(|recipient| Arc::new(recipient.into())),
            signature: config.contact.owner_name.clone().into(),
        };

        let health_feature_config = HealthFeatureConfig {
            cache_ttl: config.health.cache_ttl.into(),
            ping_timeout: config.health.ping_timeout.into(),
        };

        Ok(Self {
            rest_server_config,
            email_service_config,
            contact_feature_config,
            health_feature_config,
        })
    }
}

/// Wires the concrete services together.
#[derive(Debug)]
pub struct Provider {
    config: ConfigProvider,
    email: Email,
}

impl Provider {
    pub fn new(config: ConfigProvider, email: Email) -> Self {
        Self { config, email }
    }

    pub fn rest_server(self) -> anyhow::Result<RestServer> {
        let Self { config, email } = self;

        let template: Template = Template::new()?;
        let template_email: TemplateEmail = TemplateEmail::new(email.clone(), template);

        let health: HealthFeature =
            HealthFeature::new(Time::default(), email, config.health_feature_config);
        let contact: ContactFeature =
            ContactFeature::new(template_email, config.contact_feature_config);

        Ok(RestServer::new(health, contact, config.rest_server_config))
    }
}
