use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{File, FileFormat};
pub use duration::Duration;
use folio_models::email_address::EmailAddress;
use serde::Deserialize;

mod duration;

/// The defaults, compiled into the binary.
pub const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

/// Colon separated list of additional config files.
pub const CONFIG_PATHS_ENV: &str = "FOLIO_CONFIG";

/// Environment variables that override single config keys.
pub const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("HOST", "http.host"),
    ("PORT", "http.port"),
    ("SMTP_HOST", "email.smtp_host"),
    ("EMAIL_USER", "email.user"),
    ("EMAIL_PASSWORD", "email.password"),
    ("CONTACT_EMAIL", "contact.recipient"),
];

/// Load the config from the defaults, the files in `FOLIO_CONFIG` and the
/// process environment.
pub fn load() -> anyhow::Result<Config> {
    let paths = std::env::var(CONFIG_PATHS_ENV)
        .map(|paths| {
            paths
                .split(':')
                .filter(|path| !path.is_empty())
                .map(PathBuf::from)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    load_with(&paths, |key| std::env::var(key).ok())
}

pub fn load_with(
    paths: &[impl AsRef<Path>],
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Config> {
    let builder = config::Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

    let builder = paths.iter().try_fold(builder, |builder, path| {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        let source = File::from_str(&content, FileFormat::Toml);
        anyhow::Ok(builder.add_source(source))
    })?;

    let builder = ENV_OVERRIDES
        .iter()
        .try_fold(builder, |builder, &(var, key)| {
            let value = env(var).filter(|value| !value.trim().is_empty());
            builder.set_override_option(key, value)
        })?;

    builder
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    pub static_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: Option<u16>,
    /// Account name for the smtp server and address of the sender.
    pub user: Option<EmailAddress>,
    pub password: Option<Password>,
    pub from_name: Option<String>,
    pub timeout: Duration,
}

#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct Password(pub String);

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[redacted]")
    }
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub recipient: Option<EmailAddress>,
    pub owner_name: String,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
    pub ping_timeout: Duration,
}

impl Config {
    /// Where contact notifications go: `contact.recipient`, falling back to
    /// the smtp account.
    pub fn contact_recipient(&self) -> Option<&EmailAddress> {
        self.contact.recipient.as_ref().or(self.email.user.as_ref())
    }
}
