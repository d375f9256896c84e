use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Top of every hour (sec min hour dom mon dow).
pub const DEFAULT_INGEST_SCHEDULE: &str = "0 0 * * * *";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Browser frontend origin (CORS + post-login redirect)
    pub client_url: String,
    pub auth: AuthConfig,
    pub jsearch: JSearchConfig,
    pub ingest: IngestConfig,
}

/// Identity-provider token verification settings
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub issuer: String,
    pub audience: Option<String>,
}

/// External job source (JSearch on RapidAPI)
#[derive(Debug, Clone)]
pub struct JSearchConfig {
    pub api_key: String,
    pub base_url: String,
    pub host: String,
    pub query: String,
    pub timeout_secs: u64,
}

impl JSearchConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://jsearch.p.rapidapi.com".to_string(),
            host: "jsearch.p.rapidapi.com".to_string(),
            query: "developer jobs".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Scheduled + manual ingestion settings
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub schedule: String,
    pub scheduler_enabled: bool,
    /// Shared secret for the manual trigger. `None` disables the route.
    pub trigger_token: Option<String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            schedule: DEFAULT_INGEST_SCHEDULE.to_string(),
            scheduler_enabled: true,
            trigger_token: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            client_url: env::var("CLIENT_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            auth: AuthConfig::from_env()?,
            jsearch: JSearchConfig::from_env()?,
            ingest: IngestConfig::from_env()?,
        })
    }
}

impl AuthConfig {
    fn from_env() -> Result<Self> {
        Ok(Self {
            jwt_secret: env::var("AUTH_JWT_SECRET").context("AUTH_JWT_SECRET must be set")?,
            issuer: env::var("AUTH_ISSUER").context("AUTH_ISSUER must be set")?,
            audience: non_empty_var("AUTH_AUDIENCE"),
        })
    }
}

impl JSearchConfig {
    /// Only the JSearch part of the environment; used by `ingest_cli fetch`.
    pub fn from_env() -> Result<Self> {
        let _ = dotenv();

        let defaults = Self::new(env::var("RAPIDAPI_KEY").context("RAPIDAPI_KEY must be set")?);
        Ok(Self {
            base_url: env::var("JSEARCH_BASE_URL").unwrap_or(defaults.base_url.clone()),
            host: env::var("JSEARCH_HOST").unwrap_or(defaults.host.clone()),
            query: env::var("JSEARCH_QUERY").unwrap_or(defaults.query.clone()),
            timeout_secs: match env::var("JSEARCH_TIMEOUT_SECS") {
                Ok(v) => v
                    .parse()
                    .context("JSEARCH_TIMEOUT_SECS must be a whole number of seconds")?,
                Err(_) => defaults.timeout_secs,
            },
            api_key: defaults.api_key,
        })
    }
}

impl IngestConfig {
    fn from_env() -> Result<Self> {
        Ok(Self {
            schedule: env::var("INGEST_SCHEDULE")
                .unwrap_or_else(|_| DEFAULT_INGEST_SCHEDULE.to_string()),
            scheduler_enabled: match env::var("INGEST_SCHEDULER_ENABLED") {
                Ok(v) => parse_bool(&v).context("INGEST_SCHEDULER_ENABLED must be true or false")?,
                Err(_) => true,
            },
            trigger_token: non_empty_var("INGEST_TRIGGER_TOKEN"),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognized boolean '{}'", other),
    }
}
