//! Server configuration
//!
//! Read once at startup from `NUTRIFIT_*` environment variables.

use std::path::PathBuf;

use thiserror::Error;

use crate::analysis::projection::DEFAULT_PROJECTION_WEEKS;

pub const DEFAULT_LOG_WINDOW_DAYS: u32 = 30;
/// Upper bound on requested projection length
pub const MAX_PROJECTION_WEEKS: usize = 52;
pub const MAX_LOG_WINDOW_DAYS: u32 = 3650;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: '{value}' ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_path: PathBuf,
    /// Optional JSON file overriding/extending the builtin catalogs
    pub reference_path: Option<PathBuf>,
    /// Optional fitted regression parameters
    pub model_path: Option<PathBuf>,
    pub projection_weeks: usize,
    /// Days of logs the analysis tools look back over by default
    pub log_window_days: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let projection_weeks = match get("NUTRIFIT_PROJECTION_WEEKS") {
            Some(raw) => parse_bounded("NUTRIFIT_PROJECTION_WEEKS", &raw, 1, MAX_PROJECTION_WEEKS)?,
            None => DEFAULT_PROJECTION_WEEKS,
        };

        let log_window_days = match get("NUTRIFIT_LOG_WINDOW_DAYS") {
            Some(raw) => parse_bounded("NUTRIFIT_LOG_WINDOW_DAYS", &raw, 1, MAX_LOG_WINDOW_DAYS)?,
            None => DEFAULT_LOG_WINDOW_DAYS,
        };

        Ok(Self {
            database_path: get("NUTRIFIT_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_database_path),
            reference_path: get("NUTRIFIT_REFERENCE_PATH").map(PathBuf::from),
            model_path: get("NUTRIFIT_MODEL_PATH").map(PathBuf::from),
            projection_weeks,
            log_window_days,
        })
    }
}

fn parse_bounded<T>(var: &'static str, raw: &str, min: T, max: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    let value: T = raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        var,
        value: raw.to_string(),
        reason: e.to_string(),
    })?;

    if value < min || value > max {
        return Err(ConfigError::InvalidValue {
            var,
            value: raw.to_string(),
            reason: format!("must be between {} and {}", min, max),
        });
    }
    Ok(value)
}

/// `<project>/data/nutrifit.db`, where the project root is found by walking up
/// out of `target/{debug,release}` when running from a cargo build.
pub fn default_database_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(parent) = path.parent() {
            if let Some(grandparent) = parent.parent() {
                path = grandparent.to_path_buf();
            }
        }
    }

    path.push("data");
    path.push("nutrifit.db");
    path
}
