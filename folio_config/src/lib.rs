use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{File, FileFormat};
pub use duration::Duration;
use folio_models::{email_address::EmailAddress, project::Project};
use serde::Deserialize;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Loads the configuration by merging the given TOML files in order, later
/// files overriding earlier ones.
pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub storage: StorageConfig,
    pub email: EmailConfig,
    pub health: HealthConfig,
    pub contact: ContactConfig,
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    pub real_ip: Option<HttpRealIpConfig>,
}

#[derive(Debug, Deserialize)]
pub struct HttpRealIpConfig {
    pub header: String,
    pub set_from: IpAddr,
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp_url: String,
    pub from: EmailAddress,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    /// Recipient of contact form messages.
    pub email: EmailAddress,
    pub cooldown: Duration,
    pub window: Duration,
    pub daily_limit: u32,
    pub min_message_length: usize,
    pub max_field_length: usize,
    pub max_message_length: usize,
    pub spam: SpamConfig,
}

#[derive(Debug, Deserialize)]
pub struct SpamConfig {
    pub shorteners: Vec<String>,
    pub keywords: Vec<String>,
    /// Length of a run of one repeated character that counts as spam.
    pub repeated_char_run: usize,
}
