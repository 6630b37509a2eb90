use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::llm_client::DEFAULT_GENERATOR_URL;

const MAX_GENERATOR_ATTEMPTS: u32 = 5;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub users_file: PathBuf,
    pub companies_file: PathBuf,
    pub skills_file: PathBuf,
    pub top_paying_roles_file: PathBuf,
    pub generator_url: String,
    pub generator_timeout: Duration,
    pub generator_max_attempts: u32,
    /// `APP_ENV=development`. Lowers the default log level and logs prompts.
    pub dev_mode: bool,
    pub port: u16,
    pub function_path_prefix: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let dev_mode = std::env::var("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("development"))
            .unwrap_or(false);

        let generator_max_attempts = parse_env("GENERATOR_MAX_ATTEMPTS", 1u32)?;
        if generator_max_attempts == 0 || generator_max_attempts > MAX_GENERATOR_ATTEMPTS {
            bail!("GENERATOR_MAX_ATTEMPTS must be between 1 and {MAX_GENERATOR_ATTEMPTS}");
        }

        Ok(Config {
            google_api_key: require_env("GOOGLE_API_KEY")?,
            users_file: path_env("USERS_FILE", "data/users.json"),
            companies_file: path_env("COMPANIES_FILE", "data/companies.json"),
            skills_file: path_env("SKILLS_FILE", "data/skills.json"),
            top_paying_roles_file: path_env(
                "TOP_PAYING_ROLES_FILE",
                "data/top-paying_roles_first1.csv",
            ),
            generator_url: std::env::var("GENERATOR_API_URL")
                .unwrap_or_else(|_| DEFAULT_GENERATOR_URL.to_string()),
            generator_timeout: Duration::from_secs(parse_env("GENERATOR_TIMEOUT_SECS", 30u64)?),
            generator_max_attempts,
            dev_mode,
            port: parse_env("PORT", 8080u16)?,
            function_path_prefix: std::env::var("FUNCTION_PATH_PREFIX")
                .unwrap_or_else(|_| "/.netlify/functions/api".to_string()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| {
                if dev_mode { "debug" } else { "info" }.to_string()
            }),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}

fn path_env(key: &str, default: &str) -> PathBuf {
    std::env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
