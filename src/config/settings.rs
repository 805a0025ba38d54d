use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::site::urls::{self, Locale};

const DEFAULT_BASE_URL: &str = "https://www.onefc.com";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TRANSPORT_RETRIES: u32 = 3;
const DEFAULT_BACKOFF_MS: u64 = 1_000;
const DEFAULT_FETCH_WORKERS: usize = 4;
const DEFAULT_RETRY_PAUSE_MS: u64 = 1_000;
const DEFAULT_ENTRY_DELAY_MS: u64 = 200;
const DEFAULT_RESOLVE_CACHE_TTL_SECS: u64 = 3_600;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub accept_language: Option<String>,
    #[serde(default)]
    pub locales: Option<Vec<Locale>>,
    #[serde(default)]
    pub probe_timeout_secs: Option<u64>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub transport_retries: Option<u32>,
    #[serde(default)]
    pub backoff_ms: Option<u64>,
    #[serde(default)]
    pub fetch_workers: Option<usize>,
    #[serde(default)]
    pub retry_pause_ms: Option<u64>,
    #[serde(default)]
    pub entry_delay_ms: Option<u64>,
    #[serde(default)]
    pub resolve_cache_ttl_secs: Option<u64>,
}

impl Settings {
    /// Every field filled with its effective value, as written by `config init`.
    pub fn effective(&self) -> Self {
        Self {
            base_url: Some(self.base_url().to_string()),
            user_agent: Some(self.user_agent().to_string()),
            accept_language: Some(self.accept_language().to_string()),
            locales: Some(self.locales()),
            probe_timeout_secs: Some(self.probe_timeout().as_secs()),
            request_timeout_secs: Some(self.request_timeout().as_secs()),
            transport_retries: Some(self.transport_retries()),
            backoff_ms: Some(self.backoff_ms.unwrap_or(DEFAULT_BACKOFF_MS)),
            fetch_workers: Some(self.fetch_workers()),
            retry_pause_ms: Some(self.retry_pause_ms.unwrap_or(DEFAULT_RETRY_PAUSE_MS)),
            entry_delay_ms: Some(self.entry_delay_ms.unwrap_or(DEFAULT_ENTRY_DELAY_MS)),
            resolve_cache_ttl_secs: Some(self.resolve_cache_ttl().as_secs()),
        }
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    pub fn accept_language(&self) -> &str {
        self.accept_language
            .as_deref()
            .unwrap_or(DEFAULT_ACCEPT_LANGUAGE)
    }

    pub fn locales(&self) -> Vec<Locale> {
        self.locales.clone().unwrap_or_else(Locale::defaults)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs.unwrap_or(DEFAULT_PROBE_TIMEOUT_SECS))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Deadline for one locale fetch: the first attempt plus one transport
    /// retry and its backoff.
    pub fn locale_task_timeout(&self) -> Duration {
        let retried = self.transport_retries().min(1);
        self.request_timeout()
            .saturating_mul(1 + retried)
            .saturating_add(self.backoff().saturating_mul(retried))
    }

    pub fn transport_retries(&self) -> u32 {
        self.transport_retries.unwrap_or(DEFAULT_TRANSPORT_RETRIES)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms.unwrap_or(DEFAULT_BACKOFF_MS))
    }

    pub fn fetch_workers(&self) -> usize {
        self.fetch_workers.unwrap_or(DEFAULT_FETCH_WORKERS)
    }

    pub fn retry_pause(&self) -> Duration {
        Duration::from_millis(self.retry_pause_ms.unwrap_or(DEFAULT_RETRY_PAUSE_MS))
    }

    pub fn entry_delay(&self) -> Duration {
        Duration::from_millis(self.entry_delay_ms.unwrap_or(DEFAULT_ENTRY_DELAY_MS))
    }

    pub fn resolve_cache_ttl(&self) -> Duration {
        Duration::from_secs(
            self.resolve_cache_ttl_secs
                .unwrap_or(DEFAULT_RESOLVE_CACHE_TTL_SECS),
        )
    }

    pub fn validate(&self) -> AppResult<()> {
        url::Url::parse(self.base_url()).map_err(|err| {
            AppError::Config(format!("base_url `{}` is not a url: {err}", self.base_url()))
        })?;

        if self.fetch_workers() == 0 {
            return Err(AppError::Config(
                "fetch_workers must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout().is_zero() || self.probe_timeout().is_zero() {
            return Err(AppError::Config(
                "request and probe timeouts must be greater than 0".to_string(),
            ));
        }

        urls::validate_locales(&self.locales())
    }
}

pub fn load(path: PathBuf) -> AppResult<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let raw = fs::read_to_string(path)?;
    let settings: Settings = serde_json::from_str(&raw)?;
    settings.validate()?;
    Ok(settings)
}

pub fn save(path: PathBuf, settings: &Settings) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = serde_json::to_string_pretty(settings)?;
    fs::write(&path, payload)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    Ok(())
}
