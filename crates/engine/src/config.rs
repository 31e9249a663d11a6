//! Engine configuration from environment variables.

use std::time::Duration;

/// Where character documents are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// SQLite database file
    Sqlite(String),
    /// Process memory; lost on restart
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreConfig,
    pub save_delay: Duration,
    /// Raw `CORS_ALLOWED_ORIGINS`; `None` disables the CORS layer.
    pub cors_allowed_origins: Option<String>,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                 | Default        |
    /// |-------------------------|----------------|
    /// | `SERVER_HOST`           | `0.0.0.0`      |
    /// | `SERVER_PORT` / `PORT`  | `3000`         |
    /// | `SHEETKEEP_DB`          | `sheetkeep.db` |
    /// | `SAVE_DEBOUNCE_MS`      | `1000`         |
    /// | `CORS_ALLOWED_ORIGINS`  | unset          |
    ///
    /// `SHEETKEEP_DB=memory` selects the in-memory store.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = lookup("SERVER_PORT")
            .or_else(|| lookup("PORT"))
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(3000);

        let store = match lookup("SHEETKEEP_DB") {
            Some(db) if db.trim().eq_ignore_ascii_case("memory") => StoreConfig::Memory,
            Some(db) if !db.trim().is_empty() => StoreConfig::Sqlite(db.trim().to_string()),
            _ => StoreConfig::Sqlite("sheetkeep.db".into()),
        };

        let save_delay = lookup("SAVE_DEBOUNCE_MS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(1000));

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            host,
            port,
            store,
            save_delay,
            cors_allowed_origins,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.store, StoreConfig::Sqlite("sheetkeep.db".into()));
        assert_eq!(config.save_delay, Duration::from_millis(1000));
        assert_eq!(config.cors_allowed_origins, None);
    }

    #[test]
    fn port_falls_back_to_port_then_default() {
        assert_eq!(config(&[("PORT", "8080")]).port, 8080);
        assert_eq!(config(&[("SERVER_PORT", "9000"), ("PORT", "8080")]).port, 9000);
        assert_eq!(config(&[("SERVER_PORT", "not-a-port")]).port, 3000);
    }

    #[test]
    fn memory_store_and_debounce_override() {
        let config = config(&[("SHEETKEEP_DB", "memory"), ("SAVE_DEBOUNCE_MS", "250")]);
        assert_eq!(config.store, StoreConfig::Memory);
        assert_eq!(config.save_delay, Duration::from_millis(250));
    }

    #[test]
    fn blank_cors_is_disabled() {
        assert_eq!(config(&[("CORS_ALLOWED_ORIGINS", "  ")]).cors_allowed_origins, None);
        assert_eq!(
            config(&[("CORS_ALLOWED_ORIGINS", "*")]).cors_allowed_origins.as_deref(),
            Some("*")
        );
    }
}
