use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{COLLECTOR_SCHEME, DEFAULT_LOG_LEVEL, ENV_PREFIX, HIT_PATH, XITI_DOMAIN};
use config::{Config as RConfig, Environment, File, FileFormat};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Config {
    /// Xiti subdomain, e.g. `logi7` for `http://logi7.xiti.com`.
    pub subdomain: String,
    pub site_id: String,
    /// Subsite sent as `s2` when a tagging call does not override it.
    pub subsite_id: Option<String>,

    pub app_version: Option<String>,
    pub device_id: Option<String>,

    /// Replaces `http://{subdomain}.xiti.com/hit.xiti` when set.
    pub collector_url: Option<String>,
    pub request_timeout_ms: Option<u64>,

    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn new(subdomain: impl Into<String>, site_id: impl Into<String>) -> Self {
        Self {
            subdomain: subdomain.into(),
            site_id: site_id.into(),
            subsite_id: None,
            app_version: None,
            device_id: None,
            collector_url: None,
            request_timeout_ms: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_dir: None,
        }
    }

    pub fn with_subsite_id(mut self, subsite_id: impl Into<String>) -> Self {
        self.subsite_id = Some(subsite_id.into());
        self
    }

    pub fn with_app_version(mut self, app_version: impl Into<String>) -> Self {
        self.app_version = Some(app_version.into());
        self
    }

    pub fn with_collector_url(mut self, collector_url: impl Into<String>) -> Self {
        self.collector_url = Some(collector_url.into());
        self
    }

    /// Endpoint every hit is sent to, without the query string.
    pub fn collector_endpoint(&self) -> String {
        match &self.collector_url {
            Some(url) => url.clone(),
            None => format!(
                "{}://{}.{}{}",
                COLLECTOR_SCHEME, self.subdomain, XITI_DOMAIN, HIT_PATH
            ),
        }
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads the configuration from defaults, an optional TOML file and
    /// `XITI_*` environment variables, in increasing priority.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let mut builder = RConfig::builder();

        // set defaults
        builder = builder.set_default("log_level", DEFAULT_LOG_LEVEL)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX));

        let config: Config = builder
            .build()
            .with_context(|| match path {
                Some(path) => format!("failed to read config file {}", path.display()),
                None => "failed to read configuration".to_string(),
            })?
            .try_deserialize()
            .context("failed to parse config file")?;

        Ok(config)
    }

    pub fn load_from_env() -> Result<Config> {
        Self::load(None)
    }
}
