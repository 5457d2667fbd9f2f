use crate::error::ConfigError;
use log::debug;
use std::fmt;
use std::time::Duration;

pub const TOKEN_VAR: &str = "UDEMY_TOKEN";
pub const STATEMENT_VAR: &str = "UDEMY_STATEMENT";
pub const PAGE_SIZE_VAR: &str = "UDEMY_FETCH";
pub const BASE_URL_VAR: &str = "UDEMY_BASE_URL";
pub const TIMEOUT_VAR: &str = "UDEMY_TIMEOUT";

pub const DEFAULT_BASE_URL: &str = "https://www.udemy.com/api-2.0";
pub const DEFAULT_PAGE_SIZE: u32 = 500;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Token and statement id for the seller being reported on.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
    statement_id: String,
}

impl Credentials {
    /// Both values are required; unset, empty and blank values are rejected.
    /// The token is checked first.
    pub fn new(token: Option<String>, statement_id: Option<String>) -> Result<Self, ConfigError> {
        let token = non_blank(token).ok_or(ConfigError::MissingToken(TOKEN_VAR))?;
        let statement_id =
            non_blank(statement_id).ok_or(ConfigError::MissingStatement(STATEMENT_VAR))?;
        Ok(Self {
            token,
            statement_id,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn statement_id(&self) -> &str {
        &self.statement_id
    }
}

// Keep the token out of `{:?}` output and therefore out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<token>")
            .field("statement_id", &self.statement_id)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub page_size: u32,
    pub base_url: String,
    pub timeout: Duration,
}

impl Config {
    /// Configuration with default page size, base URL and timeout.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            page_size: DEFAULT_PAGE_SIZE,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Page size from its raw text; unset or blank keeps the current value.
    pub fn with_page_size(mut self, raw: Option<String>) -> Result<Self, ConfigError> {
        if let Some(raw) = non_blank(raw) {
            self.page_size = parse_page_size(&raw)?;
        }
        Ok(self)
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = non_blank(base_url) {
            self.base_url = base_url.trim_end_matches('/').to_string();
        }
        self
    }

    /// Timeout in whole seconds; unset or blank keeps the current value.
    pub fn with_timeout(mut self, raw: Option<String>) -> Result<Self, ConfigError> {
        if let Some(raw) = non_blank(raw) {
            self.timeout = parse_timeout(&raw)?;
        }
        Ok(self)
    }

    /// Build the configuration from named variables resolved through `lookup`.
    ///
    /// `lookup` receives the variable names above (`UDEMY_TOKEN`, ...), so
    /// callers can read the process environment or supply fixed values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self::new(Credentials::new(
            lookup(TOKEN_VAR),
            lookup(STATEMENT_VAR),
        )?)
        .with_page_size(lookup(PAGE_SIZE_VAR))?
        .with_base_url(lookup(BASE_URL_VAR))
        .with_timeout(lookup(TIMEOUT_VAR))?;
        config.log_loaded();
        Ok(config)
    }

    pub fn log_loaded(&self) {
        debug!(
            "Loaded configuration for statement {} (page size {}, timeout {:?})",
            self.credentials.statement_id(),
            self.page_size,
            self.timeout
        );
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_page_size(raw: &str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| ConfigError::InvalidPageSize {
            var: PAGE_SIZE_VAR,
            value: raw.to_string(),
        })
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| ConfigError::InvalidTimeout {
            var: TIMEOUT_VAR,
            value: raw.to_string(),
        })
}
