use anyhow::{Context, Result, anyhow};
use dotenvy::dotenv;
use std::{env, str::FromStr};

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub api_prefix: String,
    pub cors_origin: String,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_signup_per_min: u32,
    pub rate_protected_per_min: u32,

    pub log_dir: String,
    pub log_level: tracing::Level,
    pub email_cache_capacity: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, falling back to defaults for
    /// optional keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).ok_or_else(|| anyhow!("{key} must be set"));

        fn parsed<T>(value: Option<String>, key: &str, default: T) -> Result<T>
        where
            T: FromStr,
            T::Err: std::error::Error + Send + Sync + 'static,
        {
            match value {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{key} has an invalid value: {raw}")),
                None => Ok(default),
            }
        }

        let opt = |key: &str| lookup(key);

        let log_level = match opt("LOG_LEVEL") {
            Some(raw) => raw
                .parse::<tracing::Level>()
                .map_err(|_| anyhow!("LOG_LEVEL has an invalid value: {raw}"))?,
            None => tracing::Level::DEBUG,
        };

        Ok(Self {
            server_addr: required("SERVER_ADDR")?,
            database_url: required("DATABASE_URL")?,
            api_prefix: opt("API_PREFIX").unwrap_or_else(|| "/api".to_string()),
            cors_origin: opt("CORS_ORIGIN")
                .unwrap_or_else(|| "http://localhost:8000".to_string()),

            rate_login_per_min: parsed(opt("RATE_LOGIN_PER_MIN"), "RATE_LOGIN_PER_MIN", 60)?,
            rate_signup_per_min: parsed(opt("RATE_SIGNUP_PER_MIN"), "RATE_SIGNUP_PER_MIN", 30)?,
            rate_protected_per_min: parsed(
                opt("RATE_PROTECTED_PER_MIN"),
                "RATE_PROTECTED_PER_MIN",
                1000,
            )?,

            log_dir: opt("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
            log_level,
            email_cache_capacity: parsed(
                opt("EMAIL_CACHE_CAPACITY"),
                "EMAIL_CACHE_CAPACITY",
                100_000,
            )?,
        })
    }
}
