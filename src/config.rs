use std::{env, fmt::Display, str::FromStr};

use crate::middleware::session::MIN_SECRET_LEN;

const DEV_SESSION_SECRET: &str = "blog-service-development-secret-change-me";

/// Runtime configuration, read from the environment (after `.env`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub session: SessionConfig,
    pub bcrypt_cost: u32,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl_secs: i64,
    /// Unmodified sessions refresh their expiry at most this often
    pub touch_after_secs: i64,
    pub cookie_secure: bool,
    /// Session cookies are signed with a key derived from this
    pub secret: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "blog.sid".to_string(),
            ttl_secs: 24 * 3600,
            touch_after_secs: 24 * 3600,
            cookie_secure: false,
            secret: DEV_SESSION_SECRET.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let defaults = SessionConfig::default();

        Ok(Self {
            host: try_load("HOST", "0.0.0.0")?,
            port: try_load("PORT", "3000")?,
            database_url: try_load("DATABASE_URL", "mongodb://localhost:27017/bloggersite")?,
            session: SessionConfig {
                cookie_name: try_load("SESSION_COOKIE_NAME", &defaults.cookie_name)?,
                ttl_secs: try_load("SESSION_TTL_SECS", &defaults.ttl_secs.to_string())?,
                touch_after_secs: try_load(
                    "SESSION_TOUCH_AFTER_SECS",
                    &defaults.touch_after_secs.to_string(),
                )?,
                cookie_secure: try_load("COOKIE_SECURE", "false")?,
                secret: load_secret()?,
            },
            bcrypt_cost: try_load("BCRYPT_COST", &bcrypt::DEFAULT_COST.to_string())?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, String>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        log::info!("{} not set, using default: {}", key, default);
        default.to_string()
    });

    raw.parse()
        .map_err(|e| format!("Invalid {} value '{}': {}", key, raw, e))
}

fn load_secret() -> Result<String, String> {
    let secret = env::var("SESSION_SECRET").unwrap_or_else(|_| {
        log::warn!("⚠️  SESSION_SECRET not set, using the development secret");
        DEV_SESSION_SECRET.to_string()
    });
    check_secret(secret)
}

fn check_secret(secret: String) -> Result<String, String> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(format!(
            "SESSION_SECRET must be at least {} bytes, got {}",
            MIN_SECRET_LEN,
            secret.len()
        ));
    }
    Ok(secret)
}
