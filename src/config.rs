use std::str::FromStr;

use serde::Deserialize;

fn var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn var_parsed<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: var_or("APP_HOST", "0.0.0.0"),
            port: var_parsed("APP_PORT", 8080),
            database_url: std::env::var("DATABASE_URL")?,
            jwt: JwtConfig {
                secret: std::env::var("JWT_SECRET")?,
                issuer: var_or("JWT_ISSUER", "famlink"),
                audience: var_or("JWT_AUDIENCE", "famlink-users"),
                ttl_minutes: var_parsed("JWT_TTL_MINUTES", 60),
                refresh_ttl_minutes: var_parsed("JWT_REFRESH_TTL_MINUTES", 60 * 24 * 14),
            },
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listen_addr_joins_host_and_port() {
        let config = AppConfig {
            host: "127.0.0.1".into(),
            port: 9000,
            database_url: "postgres://localhost/famlink".into(),
            jwt: JwtConfig {
                secret: "s".into(),
                issuer: "i".into(),
                audience: "a".into(),
                ttl_minutes: 5,
                refresh_ttl_minutes: 10,
            },
        };
        assert_eq!(config.listen_addr(), "127.0.0.1:9000");
    }
}
