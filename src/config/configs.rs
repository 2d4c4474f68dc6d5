use ::config as config_rs;
use anyhow::{Context, Result};
use config_rs::{ConfigBuilder, builder::DefaultState};
use serde::{Deserialize, Serialize};

use super::{defaults, envconfig::EnvConfig, validate};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        <Self as EnvConfig>::from_env()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.general.host, self.general.port)
    }
}

impl EnvConfig for AppConfig {
    fn overrides(builder: ConfigBuilder<DefaultState>) -> Result<ConfigBuilder<DefaultState>> {
        let port = std::env::var(defaults::PORT_ENV_VAR)
            .ok()
            .map(|raw| {
                raw.trim().parse::<u16>().with_context(|| {
                    format!("{} must be a valid port number, got '{raw}'", defaults::PORT_ENV_VAR)
                })
            })
            .transpose()?;

        builder
            .set_override_option("general.port", port.map(i64::from))
            .context("failed to apply PORT override")
    }

    fn validate(&self) -> Result<()> {
        validate::validate(self)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub host: String,
    pub port: u16,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            host: defaults::DEFAULT_HOST.to_string(),
            port: defaults::DEFAULT_PORT as u16,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub rust_log: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            rust_log: defaults::DEFAULT_RUST_LOG.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_idle: u32,
}

impl DatabaseConfig {
    /// Single-connection in-memory store; every pool gets its own database.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_idle: 1,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: defaults::DEFAULT_DATABASE_URL.to_string(),
            max_connections: defaults::DEFAULT_DB_MAX_CONNECTIONS as u32,
            min_idle: defaults::DEFAULT_DB_MIN_IDLE as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::{AppConfig, defaults::PORT_ENV_VAR};

    // Tests in this binary share one process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_port<T>(value: &str, f: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        // SAFETY: every env mutation in this binary holds ENV_LOCK.
        unsafe { std::env::set_var(PORT_ENV_VAR, value) };
        let out = f();
        unsafe { std::env::remove_var(PORT_ENV_VAR) };
        out
    }

    #[test]
    fn defaults_listen_on_port_5000() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.general.port, 5000);
        assert_eq!(cfg.bind_addr(), "0.0.0.0:5000");
        assert!(cfg.database.url.starts_with("sqlite://"));
    }

    #[test]
    fn deserializes_partial_sections_with_defaults() {
        let cfg: AppConfig = serde_json::from_value(serde_json::json!({
            "general": { "port": 8080 },
            "database": { "url": "sqlite::memory:" }
        }))
        .expect("partial config should deserialize");

        assert_eq!(cfg.general.port, 8080);
        assert_eq!(cfg.general.host, "0.0.0.0");
        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert_eq!(cfg.database.max_connections, 10);
        assert_eq!(cfg.logging.rust_log, "info,tower_http=info");
    }

    #[test]
    fn port_env_overrides_configured_port() {
        let cfg = with_port("8081", AppConfig::from_env).expect("valid PORT should load");

        assert_eq!(cfg.general.port, 8081);
        assert!(cfg.bind_addr().ends_with(":8081"));
    }

    #[test]
    fn invalid_port_env_is_rejected_with_its_value() {
        let err = with_port("notaport", AppConfig::from_env).expect_err("PORT must be numeric");
        let message = format!("{err:#}");

        assert!(message.contains("PORT must be a valid port number"), "{message}");
        assert!(message.contains("notaport"), "{message}");
    }

    #[test]
    fn out_of_range_port_env_is_rejected() {
        let err = with_port("70000", AppConfig::from_env).expect_err("PORT must fit in u16");

        assert!(format!("{err:#}").contains("PORT must be a valid port number"));
    }
}
