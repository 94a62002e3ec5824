//! # Core Type Definitions
//!
//! This module contains the small vocabulary types shared by every stage of
//! the classifier:
//! - Language family selector (`LanguageFamily`)
//! - Signal names and vendor identifiers (`Indicator`, `VendorId`)
//! - Language capabilities a dialect may withhold (`Capability`)
//! - Error types (`StdrevError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`
//! - Carry no interior mutability

use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// LANGUAGE FAMILY
// =============================================================================

/// The language the toolchain is compiling, as determined by the caller.
///
/// The CORE never infers the family from other signals. `None` means
/// neither C nor C++ could be detected and always classifies as unknown.
///
/// Deserialization accepts exactly the spellings [`FromStr`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageFamily {
    C,
    Cpp,
    None,
}

impl LanguageFamily {
    /// Short lowercase name used on the command line and in config files.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageFamily::C => "c",
            LanguageFamily::Cpp => "cpp",
            LanguageFamily::None => "none",
        }
    }
}

impl fmt::Display for LanguageFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageFamily {
    type Err = StdrevError;

    /// Anything other than C, C++ or "none" is a caller bug, not an
    /// environment limitation, and is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" => Ok(LanguageFamily::C),
            "cpp" | "c++" | "cxx" => Ok(LanguageFamily::Cpp),
            "none" => Ok(LanguageFamily::None),
            _ => Err(StdrevError::InvalidFamily(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for LanguageFamily {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

// =============================================================================
// SIGNAL NAMES
// =============================================================================

/// Name of a boolean indicator the toolchain defines (e.g. `__STDC__`).
///
/// Presence flags and dialect flags share this type so that new dialects can
/// be described entirely in the quirks table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Indicator(pub String);

impl Indicator {
    /// Create a new indicator from a macro name.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the indicator as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a compiler vendor, supplied by an external detector.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorId(pub String);

impl VendorId {
    /// Create a new vendor identifier.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VendorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// CAPABILITIES
// =============================================================================

/// A language feature that a dialect may exclude from an otherwise
/// resolved revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Exceptions,
    MultipleInheritance,
    Rtti,
    Templates,
    Namespaces,
}

impl Capability {
    /// Every capability, in declaration order.
    pub const ALL: [Capability; 5] = [
        Capability::Exceptions,
        Capability::MultipleInheritance,
        Capability::Rtti,
        Capability::Templates,
        Capability::Namespaces,
    ];

    /// Get a short description of this capability.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Capability::Exceptions => "Exception handling",
            Capability::MultipleInheritance => "Multiple inheritance",
            Capability::Rtti => "Run-time type information",
            Capability::Templates => "Templates",
            Capability::Namespaces => "Namespaces",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur at the edges of the classifier.
///
/// Classification itself is total and never returns one of these. They arise
/// only when text is parsed into core types or a quirks table is validated.
#[derive(Debug, Error)]
pub enum StdrevError {
    /// A language family other than C, C++ or "none" was requested.
    #[error("Invalid language family: {0:?}")]
    InvalidFamily(String),

    /// A revision name did not match any ladder entry or alias.
    #[error("Unknown revision: {0:?}")]
    UnknownRevision(String),

    /// The quirks table is inconsistent.
    #[error("Invalid quirks table: {reason}")]
    InvalidQuirk { reason: String },

    /// A snapshot could not be built from its textual form.
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// A configuration or snapshot document could not be parsed.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl StdrevError {
    /// Shorthand for [`StdrevError::InvalidQuirk`].
    pub(crate) fn quirk(reason: impl Into<String>) -> Self {
        Self::InvalidQuirk {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_parses_common_spellings() {
        assert_eq!("c".parse::<LanguageFamily>().ok(), Some(LanguageFamily::C));
        assert_eq!("C++".parse::<LanguageFamily>().ok(), Some(LanguageFamily::Cpp));
        assert_eq!(" cpp ".parse::<LanguageFamily>().ok(), Some(LanguageFamily::Cpp));
        assert_eq!("none".parse::<LanguageFamily>().ok(), Some(LanguageFamily::None));
    }

    #[test]
    fn family_rejects_other_languages() {
        let result = "fortran".parse::<LanguageFamily>();
        assert!(matches!(result, Err(StdrevError::InvalidFamily(ref s)) if s == "fortran"));
    }

    #[test]
    fn family_serde_uses_lowercase() {
        let json = serde_json::to_string(&LanguageFamily::Cpp).expect("serialize");
        assert_eq!(json, "\"cpp\"");
        let parsed: LanguageFamily = serde_json::from_str("\"c++\"").expect("deserialize");
        assert_eq!(parsed, LanguageFamily::Cpp);
    }

    #[test]
    fn family_serde_and_from_str_agree() {
        for spelling in ["c", "C", "cpp", "CPP", "c++", "cxx", "CXX", "none", "fortran", ""] {
            let parsed = spelling.parse::<LanguageFamily>().ok();
            let json = serde_json::to_string(spelling).expect("serialize");
            let deserialized = serde_json::from_str::<LanguageFamily>(&json).ok();
            assert_eq!(parsed, deserialized, "spelling {spelling:?}");
        }
    }

    #[test]
    fn indicator_is_transparent_in_json() {
        let json = serde_json::to_string(&Indicator::new("__STDC__")).expect("serialize");
        assert_eq!(json, "\"__STDC__\"");
    }

    #[test]
    fn capability_ordering_is_declaration_order() {
        let mut sorted = Capability::ALL;
        sorted.sort();
        assert_eq!(sorted, Capability::ALL);
    }
}
