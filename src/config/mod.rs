use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::services::validator::ValidationPolicy;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub catalog: CatalogConfig,
    pub booking: BookingConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
}

// Откуда брать площадки и нужно ли создавать демо-бронь
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub path: Option<PathBuf>,
    pub seed_sample_bookings: bool,
}

// Правила бронирования и фоновые задачи
#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    pub enforce_time_slots: bool,
    pub completion_interval_seconds: u64,
}

impl BookingConfig {
    pub fn policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            enforce_time_slots: self.enforce_time_slots,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Сборка конфигурации из произвольного источника переменных.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        Ok(Config {
            app: AppConfig {
                host: get("HOST", "0.0.0.0"),
                port: parsed("PORT", get("PORT", "8000"))?,
                environment: get("ENVIRONMENT", "development"),
                rust_log: get("RUST_LOG", "venue_booking=debug,tower_http=debug"),
            },
            catalog: CatalogConfig {
                path: lookup("CATALOG_PATH")
                    .filter(|p| !p.trim().is_empty())
                    .map(PathBuf::from),
                seed_sample_bookings: parsed("SEED_SAMPLE_BOOKINGS", get("SEED_SAMPLE_BOOKINGS", "true"))?,
            },
            booking: BookingConfig {
                enforce_time_slots: parsed("ENFORCE_TIME_SLOTS", get("ENFORCE_TIME_SLOTS", "true"))?,
                completion_interval_seconds: parsed(
                    "COMPLETION_INTERVAL_SECONDS",
                    get("COMPLETION_INTERVAL_SECONDS", "300"),
                )?,
            },
        })
    }
}

fn parsed<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid { var, value })
}
