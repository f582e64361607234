//! Server configuration loaded from the environment

use anyhow::Context;

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
}

impl Config {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got {port:?}"))?,
            None => 3000,
        };

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(n) => n
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS must be a number, got {n:?}"))?,
            None => 10,
        };

        Ok(Self {
            database_url,
            host,
            port,
            max_connections,
        })
    }

    /// Address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
