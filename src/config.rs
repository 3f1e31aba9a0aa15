//! Runtime configuration from environment variables.
//!
//! Supported:
//! - `HEALTHTWIN_MODEL_PATH` (default `models/heart_model.json`)
//! - `HEALTHTWIN_REQUIRE_MODEL_MANIFEST` (`1|true|TRUE|yes|YES`)
//! - `HEALTHTWIN_LOG_MODE` (`stderr` | `file`)
//! - `HEALTHTWIN_LOG_FILE` (default `healthtwin.log`)
//!
//! Unset or unrecognized values fall back to the defaults.

use std::path::PathBuf;

use crate::adapters::logistic::JsonModelLoader;

pub const MODEL_PATH_ENV: &str = "HEALTHTWIN_MODEL_PATH";
pub const REQUIRE_MANIFEST_ENV: &str = "HEALTHTWIN_REQUIRE_MODEL_MANIFEST";
pub const LOG_MODE_ENV: &str = "HEALTHTWIN_LOG_MODE";
pub const LOG_FILE_ENV: &str = "HEALTHTWIN_LOG_FILE";

const DEFAULT_MODEL_PATH: &str = "models/heart_model.json";
const DEFAULT_LOG_FILE: &str = "healthtwin.log";

/// Where log output goes. Stdout is reserved for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    #[default]
    Stderr,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the classifier artifact
    pub model_path: PathBuf,

    /// Refuse to load an artifact not bound by a manifest
    pub require_manifest: bool,

    pub log_mode: LogMode,

    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            require_manifest: false,
            log_mode: LogMode::Stderr,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

fn parse_bool(v: &str) -> bool {
    matches!(v.trim(), "1" | "true" | "TRUE" | "yes" | "YES")
}

impl Config {
    /// Load configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(path) = lookup(MODEL_PATH_ENV).filter(|v| !v.trim().is_empty()) {
            cfg.model_path = PathBuf::from(path.trim());
        }
        if let Some(v) = lookup(REQUIRE_MANIFEST_ENV) {
            cfg.require_manifest = parse_bool(&v);
        }
        if let Some(v) = lookup(LOG_MODE_ENV) {
            cfg.log_mode = match v.trim() {
                "file" => LogMode::File,
                _ => LogMode::Stderr,
            };
        }
        if let Some(path) = lookup(LOG_FILE_ENV).filter(|v| !v.trim().is_empty()) {
            cfg.log_file = PathBuf::from(path.trim());
        }

        cfg
    }

    /// Build the classifier loader described by this configuration.
    #[must_use]
    pub fn model_loader(&self) -> JsonModelLoader {
        JsonModelLoader::new(&self.model_path).require_manifest(self.require_manifest)
    }
}
