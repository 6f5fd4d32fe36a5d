//! Server Configuration
//!
//! Read once from the environment (after `.env` is loaded) in `main`.

use anyhow::{Context, bail};
use auth::AuthConfig;
use std::env;
use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_DB_ACQUIRE_TIMEOUT_SECS: u64 = 5;
const DEFAULT_JWT_EXPIRES_IN: &str = "1h";
const DEFAULT_RESET_TOKEN_EXPIRY_MINUTES: u64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Test,
    Production,
}

impl AppEnv {
    fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "production" | "prod" => Ok(Self::Production),
            other => bail!("APP_ENV must be development, test or production, got {other:?}"),
        }
    }

    /// A missing JWT secret falls back to the fixed dev secret
    pub fn allows_dev_secret(self) -> bool {
        self != Self::Production
    }
}

/// Allowed CORS origins
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw == "*" {
            return Self::Any;
        }
        Self::List(
            raw.split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub app_env: AppEnv,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub cors_origins: CorsOrigins,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let app_env = AppEnv::parse(&var_or("APP_ENV", "development"))?;

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let auth = AuthConfig {
            jwt_ttl: parse_duration(&var_or("JWT_EXPIRES_IN", DEFAULT_JWT_EXPIRES_IN))
                .context("JWT_EXPIRES_IN")?,
            reset_token_ttl: reset_token_ttl(parsed_or(
                "RESET_TOKEN_EXPIRY_MINUTES",
                DEFAULT_RESET_TOKEN_EXPIRY_MINUTES,
            )?)?,
            bcrypt_cost: bcrypt_cost(parsed_or("BCRYPT_COST", default_bcrypt_cost())?)?,
            require_extended_profile: parsed_or("REQUIRE_EXTENDED_PROFILE", false)?,
            ..jwt_secret(app_env)?
        };

        Ok(Self {
            app_env,
            port: parsed_or("PORT", DEFAULT_PORT)?,
            database_url,
            db_max_connections: parsed_or("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
            db_acquire_timeout: Duration::from_secs(parsed_or(
                "DB_ACQUIRE_TIMEOUT_SECS",
                DEFAULT_DB_ACQUIRE_TIMEOUT_SECS,
            )?),
            cors_origins: CorsOrigins::parse(&var_or("CORS_ORIGIN", "*")),
            auth,
        })
    }
}

fn default_bcrypt_cost() -> u32 {
    AuthConfig::default().bcrypt_cost
}

fn reset_token_ttl(minutes: u64) -> anyhow::Result<Duration> {
    if minutes == 0 {
        bail!("RESET_TOKEN_EXPIRY_MINUTES must be positive");
    }
    let secs = minutes
        .checked_mul(60)
        .context("RESET_TOKEN_EXPIRY_MINUTES overflows")?;
    Ok(Duration::from_secs(secs))
}

/// Rejected here so a bad cost fails startup, not every registration
fn bcrypt_cost(cost: u32) -> anyhow::Result<u32> {
    let range = platform::password::COST_RANGE;
    if !range.contains(&cost) {
        bail!(
            "BCRYPT_COST must be between {} and {}, got {cost}",
            range.start(),
            range.end()
        );
    }
    Ok(cost)
}

/// Signing secret from `JWT_SECRET`, or the dev secret where allowed
fn jwt_secret(app_env: AppEnv) -> anyhow::Result<AuthConfig> {
    match env::var("JWT_SECRET") {
        Ok(secret) if !secret.trim().is_empty() => Ok(AuthConfig::with_secret(secret)),
        _ if app_env.allows_dev_secret() => {
            tracing::warn!("JWT_SECRET not set, using the development secret");
            Ok(AuthConfig::development())
        }
        _ => bail!("JWT_SECRET must be set in production"),
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{key}: invalid value {raw:?}: {e}")),
        _ => Ok(default),
    }
}

/// `<n>` (seconds), `<n>s`, `<n>m`, `<n>h` or `<n>d`
pub fn parse_duration(raw: &str) -> anyhow::Result<Duration> {
    let raw = raw.trim();
    let (digits, unit) = match raw.find(|c: char| !c.is_ascii_digit()) {
        Some(idx) => raw.split_at(idx),
        None => (raw, "s"),
    };
    let n: u64 = digits
        .parse()
        .with_context(|| format!("invalid duration {raw:?}"))?;
    let secs = match unit {
        "s" => Some(n),
        "m" => n.checked_mul(60),
        "h" => n.checked_mul(60 * 60),
        "d" => n.checked_mul(24 * 60 * 60),
        _ => bail!("invalid duration unit in {raw:?}"),
    };
    let secs = secs.context("duration overflows")?;
    if secs == 0 {
        bail!("duration must be positive");
    }
    Ok(Duration::from_secs(secs))
}
