//! # Macro Dump Reader
//!
//! Builds a [`SignalSnapshot`] from the predefined-macro listing a compiler
//! prints with `cc -dM -E - </dev/null`:
//!
//! ```text
//! #define __STDC__ 1
//! #define __STDC_VERSION__ 201710L
//! #define __STDC_HOSTED__ 1
//! ```
//!
//! Only conformance indicators are kept as presence flags. Indicators named
//! by a dialect record of the quirks table become dialect flags.

use std::collections::BTreeMap;
use stdrev_core::primitives::{CPLUSPLUS, STDC, STDC_HOSTED, STDC_VERSION};
use stdrev_core::{LanguageFamily, QuirksTable, SignalSnapshot, StdrevError};
use tracing::debug;

/// Presence flags the classifier understands.
const PRESENCE_INDICATORS: [&str; 3] = [STDC, STDC_HOSTED, CPLUSPLUS];

/// A parsed macro dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroDump {
    /// Object-like macros in name order. Function-like macros are skipped.
    pub defines: BTreeMap<String, String>,
}

impl MacroDump {
    /// Parse `#define NAME VALUE` lines. Anything else is ignored.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut defines = BTreeMap::new();

        for line in text.lines() {
            let Some(rest) = line.trim_start().strip_prefix("#define") else {
                continue;
            };
            if !rest.starts_with([' ', '\t']) {
                continue;
            }
            let rest = rest.trim_start();
            let (name, value) = match rest.split_once([' ', '\t']) {
                Some((name, value)) => (name, value.trim()),
                None => (rest, ""),
            };
            if name.is_empty() || name.contains('(') {
                continue;
            }
            defines.insert(name.to_string(), value.to_string());
        }

        debug!(count = defines.len(), "parsed macro dump");
        Self { defines }
    }

    #[must_use]
    pub fn is_defined(&self, name: &str) -> bool {
        self.defines.contains_key(name)
    }

    /// Infer the language family from the conformance macros.
    ///
    /// A dialect indicator from `quirks` identifies its family on its own.
    #[must_use]
    pub fn family(&self, quirks: &QuirksTable) -> LanguageFamily {
        let dialect_family = |family: LanguageFamily| {
            quirks
                .dialects
                .iter()
                .any(|d| d.family == family && self.is_defined(d.indicator.as_str()))
        };

        if self.is_defined(CPLUSPLUS) || dialect_family(LanguageFamily::Cpp) {
            LanguageFamily::Cpp
        } else if self.is_defined(STDC)
            || self.is_defined(STDC_VERSION)
            || dialect_family(LanguageFamily::C)
        {
            LanguageFamily::C
        } else {
            LanguageFamily::None
        }
    }

    /// Integer value of `name`, if defined.
    pub fn integer(&self, name: &str) -> Result<Option<u32>, StdrevError> {
        self.defines
            .get(name)
            .map(|value| parse_integer(value))
            .transpose()
            .map_err(|value| {
                StdrevError::InvalidSnapshot(format!("{name} has non-integer value '{value}'"))
            })
    }

    /// Build a snapshot for `family`.
    ///
    /// The version token is read from the family's version macro.
    pub fn to_snapshot(
        &self,
        family: LanguageFamily,
        quirks: &QuirksTable,
    ) -> Result<SignalSnapshot, StdrevError> {
        let mut snapshot = SignalSnapshot::new();

        for name in PRESENCE_INDICATORS {
            if self.is_defined(name) {
                snapshot = snapshot.with_presence(name);
            }
        }

        snapshot.version_token = match family {
            LanguageFamily::C => self.integer(STDC_VERSION)?,
            LanguageFamily::Cpp => self.integer(CPLUSPLUS)?,
            LanguageFamily::None => None,
        };

        for record in &quirks.dialects {
            if self.is_defined(record.indicator.as_str()) {
                snapshot.dialects.insert(record.indicator.clone());
            }
        }

        Ok(snapshot)
    }
}

/// Parse a C integer literal, dropping `u`/`l` suffixes.
fn parse_integer(value: &str) -> Result<u32, &str> {
    let digits = value.trim_end_matches(['u', 'U', 'l', 'L']);
    digits.parse().map_err(|_| value)
}

// =============================================================================
// TESTS
// =============================================================================
