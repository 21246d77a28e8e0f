//! Runtime configuration from environment variables.

use std::path::PathBuf;

use crate::domain::Locale;

pub const MODEL_PATH_ENV: &str = "CARDIORISK_MODEL_PATH";
pub const LOCALE_ENV: &str = "CARDIORISK_LOCALE";
pub const LOG_MODE_ENV: &str = "CARDIORISK_LOG_MODE";
pub const LOG_FILE_ENV: &str = "CARDIORISK_LOG_FILE";

const DEFAULT_MODEL_PATH: &str = "models/heart_attack_pipeline.json";
const DEFAULT_LOG_FILE: &str = "cardiorisk.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is an interactive terminal, stdout otherwise.
    #[default]
    Auto,
    File,
    Stdout,
}

impl LogMode {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Resolve `Auto` against the terminal.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub locale: Locale,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    /// Read the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unknown or empty values fall back
    /// to defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let locale = match get(LOCALE_ENV) {
            Some(tag) => Locale::from_tag(&tag).unwrap_or_else(|| {
                tracing::warn!("Unsupported {} '{}', using English", LOCALE_ENV, tag);
                Locale::English
            }),
            None => Locale::default(),
        };

        Self {
            model_path: get(MODEL_PATH_ENV)
                .map_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH), PathBuf::from),
            locale,
            log_mode: get(LOG_MODE_ENV).map_or(LogMode::Auto, |v| LogMode::parse(&v)),
            log_file: get(LOG_FILE_ENV).map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from),
        }
    }
}
