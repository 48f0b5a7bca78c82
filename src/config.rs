use std::net::IpAddr;

use chrono::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: IpAddr,
    pub port: u16,
    pub token_ttl_minutes: i64,
    pub max_body_size: usize,
    pub db_max_connections: u32,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;
        let jwt_secret = env_required("JWT_SECRET")?;

        let host: IpAddr = env_or("STOREFRONT_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid STOREFRONT_HOST: {e}"))?;

        let port: u16 = env_or("STOREFRONT_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid STOREFRONT_PORT: {e}"))?;

        let token_ttl_minutes: i64 = env_or("STOREFRONT_TOKEN_TTL_MINUTES", "30")
            .parse()
            .map_err(|e| format!("Invalid STOREFRONT_TOKEN_TTL_MINUTES: {e}"))?;
        if token_ttl_minutes <= 0 {
            return Err("STOREFRONT_TOKEN_TTL_MINUTES must be positive".to_string());
        }

        let max_body_size: usize = env_or("STOREFRONT_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid STOREFRONT_MAX_BODY_SIZE: {e}"))?;

        let db_max_connections: u32 = env_or("STOREFRONT_DB_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid STOREFRONT_DB_MAX_CONNECTIONS: {e}"))?;

        let log_level = env_or("STOREFRONT_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            jwt_secret,
            host,
            port,
            token_ttl_minutes,
            max_body_size,
            db_max_connections,
            log_level,
        })
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::minutes(self.token_ttl_minutes)
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
