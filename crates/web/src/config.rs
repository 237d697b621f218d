use anyhow::{Context, Result};

const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub club_api_url: String,
    pub api_keys: String,
    pub upstream_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            host: var("HOST").context("Cannot load HOST env variable")?,
            port: var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            club_api_url: var("CLUB_API_URL").context("Cannot load CLUB_API_URL env variable")?,
            api_keys: var("API_KEYS").unwrap_or_default(),
            upstream_timeout_secs: var("UPSTREAM_TIMEOUT_SECS")
                .map(|v| v.parse())
                .transpose()
                .context("UPSTREAM_TIMEOUT_SECS must be a number")?
                .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        })
    }
}
