//! Settings structures for sougou-search configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure, mirroring settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub credentials: Credentials,
    pub upstream: UpstreamSettings,
    pub outgoing: OutgoingSettings,
    pub defaults: DefaultSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse settings file {}", path.display()))?;
        Ok(settings)
    }

    /// Merge with process environment variables (SOUGOU_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_env_from(|key| std::env::var(key).ok());
    }

    /// Merge with variables from an arbitrary lookup
    pub fn merge_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values leave file-provided credentials in place
        if let Some(val) = lookup("SOUGOU_APPID").filter(|v| !v.trim().is_empty()) {
            self.credentials.appid = val;
        }
        if let Some(val) = lookup("SOUGOU_SECRET").filter(|v| !v.trim().is_empty()) {
            self.credentials.secret = val;
        }
        if let Some(val) = lookup("SOUGOU_BASE_URL") {
            if !val.trim().is_empty() {
                self.upstream.base_url = val.trim().to_string();
            }
        }
        if let Some(val) = lookup("SOUGOU_RETRIES") {
            if let Ok(retries) = val.trim().parse() {
                self.outgoing.retries = retries;
            }
        }
    }
}

/// Application credentials for the upstream API
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Credentials {
    pub appid: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(appid: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            appid: appid.into(),
            secret: secret.into(),
        }
    }

    /// Both the app id and the secret are present and non-blank
    pub fn is_complete(&self) -> bool {
        !self.appid.trim().is_empty() && !self.secret.trim().is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("appid", &self.appid)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Upstream endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamSettings {
    /// Scheme and host of the search API
    pub base_url: String,
    /// Path of the search endpoint
    pub path: String,
    /// Include WeChat official-account articles
    pub open_wx: bool,
    /// User agent sent with each request
    pub user_agent: Option<String>,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            base_url: crate::DEFAULT_BASE_URL.to_string(),
            path: crate::DEFAULT_SEARCH_PATH.to_string(),
            open_wx: true,
            user_agent: None,
        }
    }
}

impl UpstreamSettings {
    /// Full endpoint URL
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Extra attempts after a connection failure (0 = single attempt)
    pub retries: u32,
    /// Delay between attempts in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            verify_ssl: true,
            retries: 0,
            retry_delay_ms: 500,
        }
    }
}

/// Defaults applied when the command line does not override them
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultSettings {
    pub max_results: i64,
    /// Seconds
    pub timeout: f64,
}

impl Default for DefaultSettings {
    fn default() -> Self {
        Self {
            max_results: crate::DEFAULT_MAX_RESULTS as i64,
            timeout: crate::DEFAULT_TIMEOUT,
        }
    }
}
