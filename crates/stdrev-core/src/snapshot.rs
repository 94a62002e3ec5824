//! # Signal Snapshot
//!
//! The immutable input of the classifier: what an external signal provider
//! observed about the toolchain. The CORE consumes snapshots, it never
//! produces them.

use crate::{Indicator, VendorId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Raw conformance signals gathered from a toolchain.
///
/// - `presence`: indicators the toolchain defines (`__STDC__`, `__STDC_HOSTED__`, `__cplusplus`)
/// - `version_token`: value of the family's version macro, when present
/// - `dialects`: indicators of non-ladder dialects (`__cplusplus_cli`, ...)
/// - `vendor`: identifier used to select quirk overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalSnapshot {
    pub presence: BTreeSet<Indicator>,
    pub version_token: Option<u32>,
    pub dialects: BTreeSet<Indicator>,
    pub vendor: Option<VendorId>,
}

impl SignalSnapshot {
    /// Create an empty snapshot (no evidence of anything).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a presence flag.
    #[must_use]
    pub fn with_presence(mut self, name: impl Into<String>) -> Self {
        self.presence.insert(Indicator::new(name));
        self
    }

    /// Set the version token.
    #[must_use]
    pub fn with_version_token(mut self, token: u32) -> Self {
        self.version_token = Some(token);
        self
    }

    /// Add a dialect flag.
    #[must_use]
    pub fn with_dialect(mut self, name: impl Into<String>) -> Self {
        self.dialects.insert(Indicator::new(name));
        self
    }

    /// Set the vendor identifier.
    #[must_use]
    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(VendorId::new(vendor));
        self
    }

    #[must_use]
    pub fn has_presence(&self, name: &str) -> bool {
        self.presence.iter().any(|i| i.as_str() == name)
    }

    #[must_use]
    pub fn has_dialect(&self, name: &str) -> bool {
        self.dialects.iter().any(|i| i.as_str() == name)
    }

    /// Check whether `other` carries every signal this snapshot carries.
    ///
    /// A token or vendor this snapshot lacks may appear in `other`, but one
    /// it has must be identical there.
    #[must_use]
    pub fn is_refined_by(&self, other: &SignalSnapshot) -> bool {
        self.presence.is_subset(&other.presence)
            && self.dialects.is_subset(&other.dialects)
            && (self.version_token.is_none() || self.version_token == other.version_token)
            && (self.vendor.is_none() || self.vendor == other.vendor)
    }
}

// =============================================================================
// TESTS
// =============================================================================
