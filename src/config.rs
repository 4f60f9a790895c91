//! Server configuration from environment variables

use crate::state_machine::state::MIN_DISPLAY_WIDTH;
use crate::state_machine::DEFAULT_DISPLAY_WIDTH;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a port number, got {value:?}")]
    InvalidPort { name: &'static str, value: String },
    #[error("{name} must be an integer of at least {min}, got {value:?}")]
    InvalidDisplayWidth {
        name: &'static str,
        value: String,
        min: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `SQLite` file holding the calculation log
    pub db_path: PathBuf,
    pub port: u16,
    /// Character budget for formatted results
    pub display_width: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let db_path = lookup("CALC_DB_PATH").map_or_else(
            || {
                let home = lookup("HOME").unwrap_or_else(|| "/tmp".to_string());
                PathBuf::from(home).join(".calc-engine").join("calculations.db")
            },
            PathBuf::from,
        );

        let port = match lookup("CALC_PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort {
                name: "CALC_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let display_width = match lookup("CALC_DISPLAY_WIDTH") {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(width) if width >= MIN_DISPLAY_WIDTH => width,
                _ => {
                    return Err(ConfigError::InvalidDisplayWidth {
                        name: "CALC_DISPLAY_WIDTH",
                        value,
                        min: MIN_DISPLAY_WIDTH,
                    })
                }
            },
            None => DEFAULT_DISPLAY_WIDTH,
        };

        Ok(Self {
            db_path,
            port,
            display_width,
        })
    }
}
