//! Configuration loading and management

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

const DEFAULT_DATA_FILE: &str = "hotel_data.json";
const DEFAULT_GREETING: &str = "Hello! Welcome to our hotel. How can I assist you?";

/// Front desk configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the inventory document
    pub data_file: PathBuf,

    /// Greeting spoken when the document has none
    pub fallback_greeting: String,

    /// Repeat each transcribed utterance back on stdout
    pub echo: bool,
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let data_file = lookup("FRONT_DESK_DATA_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        let fallback_greeting = lookup("FRONT_DESK_FALLBACK_GREETING")
            .filter(|greeting| !greeting.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GREETING.to_string());

        let echo = match lookup("FRONT_DESK_ECHO") {
            None => false,
            Some(value) => parse_flag(&value)
                .with_context(|| format!("invalid FRONT_DESK_ECHO value {value:?}"))?,
        };

        Ok(Self {
            data_file,
            fallback_greeting,
            echo,
        })
    }

    /// Ensure the directory holding the data file exists
    pub fn ensure_dirs(&self) -> Result<()> {
        if let Some(parent) = self.data_file.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => bail!("expected a boolean flag"),
    }
}
