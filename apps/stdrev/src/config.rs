//! # Quirks Configuration
//!
//! Loads an optional TOML quirks file and layers it over the built-in table.
//!
//! ```toml
//! replace_defaults = false
//!
//! [[vendor]]
//! id = "hp-acc"
//! [[vendor.rewrite]]
//! family = "cpp"
//! from = 199710
//! to = 199711
//!
//! [[dialect]]
//! name = "cli"
//! indicator = "__cplusplus_cli"
//! family = "cpp"
//! revision = "C++98"
//! excludes = []
//! ```
//!
//! Lookup order: `--quirks <path>`, then `STDREV_QUIRKS`, then built-in.
//! Both are resolved by clap; this module only sees the final path.

use serde::{Deserialize, Serialize};
use std::path::Path;
use stdrev_core::{QuirksTable, StdrevError};
use tracing::{debug, info};

/// Environment variable naming a quirks file.
pub const QUIRKS_ENV: &str = "STDREV_QUIRKS";

/// Maximum size of any input document read by the CLI (16 MB).
pub const MAX_INPUT_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// On-disk form of a quirks override file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuirksFile {
    /// Use this file's table alone instead of merging it over the built-in one.
    #[serde(default)]
    pub replace_defaults: bool,
    #[serde(flatten)]
    pub table: QuirksTable,
}

impl QuirksFile {
    /// Parse a quirks file from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, StdrevError> {
        toml::from_str(text).map_err(|e| StdrevError::ParseError(e.to_string()))
    }

    /// Combine with the built-in table according to `replace_defaults`.
    #[must_use]
    pub fn into_table(self) -> QuirksTable {
        if self.replace_defaults {
            self.table
        } else {
            QuirksTable::builtin().merge(self.table)
        }
    }
}

/// Read a text document after checking its size.
pub fn read_input(path: &Path) -> Result<String, StdrevError> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        StdrevError::IoError(format!("Cannot read '{}': {}", path.display(), e))
    })?;

    if !metadata.is_file() {
        return Err(StdrevError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    if metadata.len() > MAX_INPUT_FILE_SIZE {
        return Err(StdrevError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_INPUT_FILE_SIZE
        )));
    }

    std::fs::read_to_string(path)
        .map_err(|e| StdrevError::IoError(format!("Cannot read '{}': {}", path.display(), e)))
}

/// Build the effective quirks table.
///
/// With no path the built-in table is used. The result is always validated.
pub fn load_quirks(path: Option<&Path>) -> Result<QuirksTable, StdrevError> {
    let table = match path {
        Some(path) => {
            let file = QuirksFile::from_toml_str(&read_input(path)?)?;
            info!(
                path = %path.display(),
                vendors = file.table.vendors.len(),
                dialects = file.table.dialects.len(),
                replace_defaults = file.replace_defaults,
                "loaded quirks file"
            );
            file.into_table()
        }
        None => {
            debug!("using built-in quirks table");
            QuirksTable::builtin()
        }
    };

    table.validate()?;
    Ok(table)
}

/// Render a table as a TOML quirks file.
pub fn to_toml(table: &QuirksTable) -> Result<String, StdrevError> {
    let file = QuirksFile {
        replace_defaults: true,
        table: table.clone(),
    };
    toml::to_string(&file).map_err(|e| StdrevError::ParseError(e.to_string()))
}

// =============================================================================
// TESTS
// =============================================================================
