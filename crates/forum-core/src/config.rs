use crate::error::ConfigError;

/// Default token lifetime: one day from mint.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Process configuration, read once at startup from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    /// Server-side key for the token digest. Rotating it invalidates every
    /// outstanding validation token.
    pub token_secret: String,
    pub token_ttl_secs: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env_string("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?;
        let token_secret =
            env_string("TOKEN_SECRET").ok_or(ConfigError::MissingVar("TOKEN_SECRET"))?;
        let token_ttl_secs = match env_string("TOKEN_TTL_SECS") {
            Some(raw) => raw.parse().map_err(|source| ConfigError::InvalidVar {
                key: "TOKEN_TTL_SECS",
                source,
            })?,
            None => DEFAULT_TOKEN_TTL_SECS,
        };

        Ok(Self {
            database_url,
            token_secret,
            token_ttl_secs,
        })
    }
}

pub fn normalize_env_value(raw: String) -> String {
    let trimmed = raw.trim();

    if let Some(inner) = trimmed.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        return inner.trim().to_string();
    }
    if let Some(inner) = trimmed.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')) {
        return inner.trim().to_string();
    }

    trimmed.to_string()
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(normalize_env_value)
        .filter(|s| !s.is_empty())
}
