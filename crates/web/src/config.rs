use std::str::FromStr;

use anyhow::{Context, Result, bail};

/// Backing store for the `picks` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => bail!("Unknown PICKS_STORE '{}', expected 'postgres' or 'memory'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub store: StoreBackend,
    pub client_url: String,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .map(|port| port.parse())
                .transpose()
                .context("PORT must be a number")?
                .unwrap_or(5000),
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            store: lookup("PICKS_STORE")
                .map(|store| store.parse())
                .transpose()?
                .unwrap_or(StoreBackend::Postgres),
            client_url: lookup("CLIENT_URL")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                .map(|n| n.parse())
                .transpose()
                .context("DATABASE_MAX_CONNECTIONS must be a number")?
                .unwrap_or(5),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
