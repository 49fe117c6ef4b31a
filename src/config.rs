//! Configuration file support for ferro-iscn.
//!
//! This module loads `.ferro-iscn.toml` configuration files, which set the
//! cleaner's error handling mode, per-code overrides and interpretation
//! switches.
//!
//! # Example Configuration
//!
//! ```toml
//! [error-handling]
//! mode = "lenient"
//! ignore = ["W2003"]
//! reject = ["W1001"]
//!
//! [interpretation]
//! suggest-corrections = true
//! clamp-out-of-range-breakpoints = true
//! ```
//!
//! # Config File Locations
//!
//! Configuration is searched in this order (first found wins):
//! 1. `.ferro-iscn.toml` in current directory
//! 2. `~/.config/ferro/iscn.toml`

use log::{debug, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ErrorCode, IscnError};
use crate::error_handling::{ErrorConfig, ErrorMode, ErrorOverride, ErrorType};
use crate::Result;

/// Parsed configuration from a `.ferro-iscn.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct IscnConfig {
    /// Error handling configuration.
    pub error_handling: ErrorHandlingConfig,
    /// Interpretation switches.
    pub interpretation: InterpretationConfig,
}

/// `[error-handling]` section of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ErrorHandlingConfig {
    /// Base error mode.
    pub mode: Option<ErrorMode>,
    /// Codes to silently correct.
    pub ignore: Vec<String>,
    /// Codes to always reject.
    pub reject: Vec<String>,
    /// Codes to always warn about.
    pub warn: Vec<String>,
}

/// `[interpretation]` section of the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct InterpretationConfig {
    /// Offer a cleaned rewrite on syntax failures.
    pub suggest_corrections: bool,
    /// Treat breakpoints past the end of an arm as that arm's telomere.
    pub clamp_out_of_range_breakpoints: bool,
}

impl Default for InterpretationConfig {
    fn default() -> Self {
        Self {
            suggest_corrections: true,
            clamp_out_of_range_breakpoints: true,
        }
    }
}

impl IscnConfig {
    /// Load configuration from the default locations.
    ///
    /// A file that exists but fails to load is skipped with a warning.
    pub fn load() -> Option<Self> {
        let candidates = [
            Some(PathBuf::from(".ferro-iscn.toml")),
            dirs_home().map(|home| home.join(".config").join("ferro").join("iscn.toml")),
        ];

        for path in candidates.into_iter().flatten() {
            if !path.exists() {
                continue;
            }
            match Self::load_from_path(&path) {
                Ok(config) => {
                    debug!("loaded configuration from {}", path.display());
                    return Some(config);
                }
                Err(e) => warn!("skipping {}: {}", path.display(), e),
            }
        }

        None
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| IscnError::Config {
            code: ErrorCode::ConfigIo,
            msg: format!("{}: {}", path.display(), e),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML content.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| IscnError::Config {
            code: ErrorCode::ConfigParse,
            msg: e.to_string(),
        })
    }

    /// Convert this config to an ErrorConfig.
    ///
    /// Overrides apply in the order ignore, reject, warn; a code listed
    /// twice keeps the last. Unknown codes are an error.
    pub fn to_error_config(&self) -> Result<ErrorConfig> {
        let section = &self.error_handling;
        let mut config = ErrorConfig::new(section.mode.unwrap_or_default());

        let lists = [
            (&section.ignore, ErrorOverride::SilentCorrect),
            (&section.reject, ErrorOverride::Reject),
            (&section.warn, ErrorOverride::WarnCorrect),
        ];
        for (codes, override_) in lists {
            for code in codes {
                config.set_override(error_type_for(code)?, override_);
            }
        }

        Ok(config)
    }
}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

fn error_type_for(code: &str) -> Result<ErrorType> {
    ErrorType::from_code(code).ok_or_else(|| IscnError::Config {
        code: ErrorCode::ConfigParse,
        msg: format!("unknown warning code '{}'", code),
    })
}
