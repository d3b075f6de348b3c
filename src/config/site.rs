// src/config/site.rs
use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_CONFIG_PATH: &str = "config/search_notify.toml";

pub const ENV_CONFIG_PATH: &str = "SEARCH_NOTIFY_CONFIG_PATH";
pub const ENV_SITE_HOST: &str = "SITE_HOST";
pub const ENV_SITE_BASE_URL: &str = "SITE_BASE_URL";
pub const ENV_INDEXNOW_KEY: &str = "INDEXNOW_KEY";
pub const ENV_BING_API_KEY: &str = "BING_WEBMASTER_API_KEY";

pub const DEFAULT_HOST: &str = "insurelimos.net";
pub const DEFAULT_BASE_URL: &str = "https://insurelimos.net";
pub const DEFAULT_INDEXNOW_ENDPOINT: &str = "https://api.indexnow.org/IndexNow";
pub const DEFAULT_BING_ENDPOINT: &str =
    "https://ssl.bing.com/webmaster/api.svc/pox/SubmitUrlBatch";

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_indexnow_endpoint() -> String {
    DEFAULT_INDEXNOW_ENDPOINT.to_string()
}
fn default_bing_endpoint() -> String {
    DEFAULT_BING_ENDPOINT.to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_connect_timeout_secs() -> u64 {
    4
}
fn default_user_agent() -> String {
    format!("search-notify/{}", env!("CARGO_PKG_VERSION"))
}

/// Who we are when talking to search engines. Fixed for the process lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteIdentity {
    /// Bare domain, e.g. `insurelimos.net`.
    #[serde(default = "default_host")]
    pub host: String,
    /// Scheme + host, no trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Pre-shared IndexNow key; also served by the web layer at `/{key}.txt`.
    #[serde(default)]
    pub indexnow_key: String,
    /// Only ever filled from `BING_WEBMASTER_API_KEY`. Absent is a valid state.
    #[serde(skip)]
    pub bing_api_key: Option<String>,
}

impl Default for SiteIdentity {
    fn default() -> Self {
        Self {
            host: default_host(),
            base_url: default_base_url(),
            indexnow_key: String::new(),
            bing_api_key: None,
        }
    }
}

impl SiteIdentity {
    /// Where IndexNow fetches the key to verify ownership.
    pub fn key_location(&self) -> String {
        format!("https://{}/{}.txt", self.host, self.indexnow_key)
    }

    /// Path the web layer must serve (body = the key itself).
    pub fn key_file_path(&self) -> String {
        format!("/{}.txt", self.indexnow_key)
    }

    pub fn has_bing_key(&self) -> bool {
        self.bing_api_key.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Endpoints {
    #[serde(default = "default_indexnow_endpoint")]
    pub indexnow: String,
    #[serde(default = "default_bing_endpoint")]
    pub bing: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            indexnow: default_indexnow_endpoint(),
            bing: default_bing_endpoint(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Full runtime configuration, passed explicitly to the notifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotifyConfig {
    #[serde(default)]
    pub site: SiteIdentity,
    #[serde(default)]
    pub endpoints: Endpoints,
    #[serde(default)]
    pub http: HttpSettings,
}

impl NotifyConfig {
    /// Build a config in code (tests, embedding). Still validated.
    pub fn new(host: &str, base_url: &str, indexnow_key: &str) -> Result<Self> {
        let mut cfg = NotifyConfig::default();
        cfg.site.host = host.to_string();
        cfg.site.base_url = base_url.to_string();
        cfg.site.indexnow_key = indexnow_key.to_string();
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn with_bing_api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.site.bing_api_key = if key.trim().is_empty() {
            None
        } else {
            Some(key.trim().to_string())
        };
        self
    }

    pub fn with_endpoints(mut self, indexnow: impl Into<String>, bing: impl Into<String>) -> Self {
        self.endpoints.indexnow = indexnow.into();
        self.endpoints.bing = bing.into();
        self
    }

    /// Load from an explicit TOML file, then apply env overrides and validate.
    pub fn load_from(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading notify config from {}", path.display()))?;
        let mut cfg: NotifyConfig = toml::from_str(&data)
            .with_context(|| format!("parsing notify config {}", path.display()))?;
        cfg.apply_env();
        cfg.validate()?;
        cfg.log_summary();
        Ok(cfg)
    }

    /// Load using env var + fallbacks:
    /// 1) $SEARCH_NOTIFY_CONFIG_PATH
    /// 2) config/search_notify.toml
    /// 3) built-in defaults (key must then come from $INDEXNOW_KEY)
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            } else {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
        }
        let fallback = PathBuf::from(DEFAULT_CONFIG_PATH);
        if fallback.exists() {
            return Self::load_from(&fallback);
        }
        let mut cfg = NotifyConfig::default();
        cfg.apply_env();
        cfg.validate()?;
        cfg.log_summary();
        Ok(cfg)
    }

    fn apply_env(&mut self) {
        if let Some(v) = non_blank_env(ENV_SITE_HOST) {
            self.site.host = v;
        }
        if let Some(v) = non_blank_env(ENV_SITE_BASE_URL) {
            self.site.base_url = v;
        }
        if let Some(v) = non_blank_env(ENV_INDEXNOW_KEY) {
            self.site.indexnow_key = v;
        }
        self.site.bing_api_key = non_blank_env(ENV_BING_API_KEY);
    }

    /// Normalize and check the site identity.
    pub fn validate(&mut self) -> Result<()> {
        self.site.host = self.site.host.trim().to_string();
        if self.site.host.is_empty() || self.site.host.contains('/') {
            bail!("site host must be a bare domain, got {:?}", self.site.host);
        }

        let base = self.site.base_url.trim().trim_end_matches('/').to_string();
        if !base.starts_with("https://") {
            bail!("site base URL must use https, got {base:?}");
        }
        // Base URL is exactly `https://{host}`: IndexNow rejects URLs outside `host`,
        // and Bing's `siteUrl` must name the same site.
        let parsed = reqwest::Url::parse(&base)
            .with_context(|| format!("parsing site base URL {base:?}"))?;
        let same_host = parsed
            .host_str()
            .is_some_and(|h| h.eq_ignore_ascii_case(&self.site.host));
        if !same_host {
            bail!(
                "site base URL {base:?} does not match site host {:?}",
                self.site.host
            );
        }
        if parsed.port().is_some() || parsed.path() != "/" || parsed.query().is_some() {
            bail!("site base URL must be scheme + host only, got {base:?}");
        }
        self.site.base_url = base;

        self.site.indexnow_key = self.site.indexnow_key.trim().to_string();
        validate_indexnow_key(&self.site.indexnow_key)
            .with_context(|| format!("checking {ENV_INDEXNOW_KEY}"))?;

        if self.http.timeout_secs == 0 {
            self.http.timeout_secs = default_timeout_secs();
        }
        if self.http.connect_timeout_secs == 0 {
            self.http.connect_timeout_secs = default_connect_timeout_secs();
        }
        Ok(())
    }

    fn log_summary(&self) {
        // Safe diagnostics: never the keys themselves
        info!(
            target: "search_notify",
            host = %self.site.host,
            base_url = %self.site.base_url,
            indexnow_key_len = self.site.indexnow_key.len(),
            bing_key = self.site.has_bing_key(),
            "notify config loaded"
        );
    }
}

fn non_blank_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// IndexNow keys: 8-128 chars of `a-z`, `A-Z`, `0-9`, `-`.
pub fn validate_indexnow_key(key: &str) -> Result<()> {
    if key.is_empty() {
        bail!("IndexNow key is not configured");
    }
    if !(8..=128).contains(&key.len()) {
        bail!("IndexNow key must be 8-128 characters, got {}", key.len());
    }
    if !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        bail!("IndexNow key may only contain a-z, A-Z, 0-9 and '-'");
    }
    Ok(())
}
