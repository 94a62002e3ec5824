//! # Quirks & Dialect Table
//!
//! Static, data-driven corrections consulted by the normalizer and resolver:
//!
//! - **Vendor quirks** rewrite a non-standard version token to the value the
//!   standard mandates (e.g. HP aC++ reporting one below the C++98 token).
//! - **Dialect records** recognize non-ladder dialects by indicator and may
//!   pin the resolved revision to a fixed floor, optionally withholding
//!   language capabilities.
//!
//! The table is plain serde data so callers can load it from a file and
//! merge it over [`QuirksTable::builtin`] without touching the resolver.
//! Dialect records are held in priority order: the first active record for
//! the classified family wins.

use crate::primitives::{
    CPLUSPLUS_CLI, CPLUSPLUS_WINRT, CPP98_TOKEN, DIALECT_CLI, DIALECT_EMBEDDED, DIALECT_WINRT,
    EMBEDDED_CPLUSPLUS, HP_ACC_CPP98_TOKEN, HP_ACC_VENDOR,
};
use crate::{
    Capability, Indicator, LanguageFamily, Revision, SignalSnapshot, StdrevError, VendorId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// VENDOR QUIRKS
// =============================================================================

/// Replace a reported version token with its standard equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRewrite {
    /// Family whose version token is affected.
    pub family: LanguageFamily,
    /// Token value the vendor reports.
    pub from: u32,
    /// Token value the standard mandates.
    pub to: u32,
}

/// All token rewrites known for one vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorQuirk {
    pub id: VendorId,
    #[serde(default, rename = "rewrite")]
    pub rewrites: Vec<TokenRewrite>,
}

impl VendorQuirk {
    /// Standard token for `token` under this vendor, if a rewrite applies.
    #[must_use]
    pub fn rewrite(&self, family: LanguageFamily, token: u32) -> Option<u32> {
        self.rewrites
            .iter()
            .find(|r| r.family == family && r.from == token)
            .map(|r| r.to)
    }
}

// =============================================================================
// DIALECT RECORDS
// =============================================================================

/// Recognition rule for a dialect that does not occupy a ladder position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialectRecord {
    /// Name reported in the classification result.
    pub name: String,
    /// Dialect flag that activates this record.
    pub indicator: Indicator,
    /// Family the dialect extends. Records for other families are ignored.
    pub family: LanguageFamily,
    /// Revision the dialect pins classification to. `None` reports the
    /// dialect without short-circuiting the ladder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<Revision>,
    /// Capabilities the dialect withholds from its revision.
    #[serde(default)]
    pub excludes: BTreeSet<Capability>,
}

impl DialectRecord {
    /// Check whether this record fires for `snapshot` classified as `family`.
    #[must_use]
    pub fn is_active(&self, snapshot: &SignalSnapshot, family: LanguageFamily) -> bool {
        self.family == family && snapshot.dialects.contains(&self.indicator)
    }
}

// =============================================================================
// QUIRKS TABLE
// =============================================================================

/// Vendor quirks plus dialect records in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuirksTable {
    #[serde(default, rename = "vendor")]
    pub vendors: Vec<VendorQuirk>,
    #[serde(default, rename = "dialect")]
    pub dialects: Vec<DialectRecord>,
}

impl QuirksTable {
    /// A table with no quirks and no dialects.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table.
    ///
    /// Dialect priority: C++/CLI, then C++/CX, then Embedded C++.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            vendors: vec![VendorQuirk {
                id: VendorId::new(HP_ACC_VENDOR),
                rewrites: vec![TokenRewrite {
                    family: LanguageFamily::Cpp,
                    from: HP_ACC_CPP98_TOKEN,
                    to: CPP98_TOKEN,
                }],
            }],
            dialects: vec![
                DialectRecord {
                    name: DIALECT_CLI.to_string(),
                    indicator: Indicator::new(CPLUSPLUS_CLI),
                    family: LanguageFamily::Cpp,
                    revision: Some(Revision::Cpp98),
                    excludes: BTreeSet::new(),
                },
                DialectRecord {
                    name: DIALECT_WINRT.to_string(),
                    indicator: Indicator::new(CPLUSPLUS_WINRT),
                    family: LanguageFamily::Cpp,
                    revision: Some(Revision::Cpp98),
                    excludes: BTreeSet::new(),
                },
                DialectRecord {
                    name: DIALECT_EMBEDDED.to_string(),
                    indicator: Indicator::new(EMBEDDED_CPLUSPLUS),
                    family: LanguageFamily::Cpp,
                    revision: Some(Revision::Cpp98),
                    excludes: Capability::ALL.into_iter().collect(),
                },
            ],
        }
    }

    /// Look up a vendor's quirks.
    #[must_use]
    pub fn vendor(&self, id: &VendorId) -> Option<&VendorQuirk> {
        self.vendors.iter().find(|v| &v.id == id)
    }

    /// Look up a dialect record by name.
    #[must_use]
    pub fn dialect(&self, name: &str) -> Option<&DialectRecord> {
        self.dialects.iter().find(|d| d.name == name)
    }

    /// Active dialect records for `snapshot`, highest priority first.
    pub fn active_dialects<'a, 's>(
        &'a self,
        snapshot: &'s SignalSnapshot,
        family: LanguageFamily,
    ) -> impl Iterator<Item = &'a DialectRecord> {
        self.dialects
            .iter()
            .filter(move |d| d.is_active(snapshot, family))
    }

    /// Layer `overrides` on top of this table.
    ///
    /// - Vendors with the same id are replaced; new vendors are appended.
    /// - Dialects with the same name are replaced in place, keeping their
    ///   priority slot; new dialects are appended at lowest priority.
    #[must_use]
    pub fn merge(mut self, overrides: QuirksTable) -> Self {
        for vendor in overrides.vendors {
            match self.vendors.iter_mut().find(|v| v.id == vendor.id) {
                Some(slot) => *slot = vendor,
                None => self.vendors.push(vendor),
            }
        }
        for dialect in overrides.dialects {
            match self.dialects.iter_mut().find(|d| d.name == dialect.name) {
                Some(slot) => *slot = dialect,
                None => self.dialects.push(dialect),
            }
        }
        self
    }

    /// Check the table for internal consistency.
    ///
    /// Rewrites must raise the token: a lowering rewrite could retract a
    /// revision when a vendor id is learned later.
    pub fn validate(&self) -> Result<(), StdrevError> {
        let mut vendor_ids = BTreeSet::new();
        for vendor in &self.vendors {
            if vendor.id.as_str().trim().is_empty() {
                return Err(StdrevError::quirk("vendor id must not be empty"));
            }
            if !vendor_ids.insert(&vendor.id) {
                return Err(StdrevError::quirk(format!(
                    "duplicate vendor id {:?}",
                    vendor.id.as_str()
                )));
            }
            for rewrite in &vendor.rewrites {
                if rewrite.family == LanguageFamily::None {
                    return Err(StdrevError::quirk(format!(
                        "vendor {:?}: rewrite family must be c or cpp",
                        vendor.id.as_str()
                    )));
                }
                if rewrite.to <= rewrite.from {
                    return Err(StdrevError::quirk(format!(
                        "vendor {:?}: rewrite {} -> {} does not raise the token",
                        vendor.id.as_str(),
                        rewrite.from,
                        rewrite.to
                    )));
                }
            }
        }

        let mut dialect_names = BTreeSet::new();
        for dialect in &self.dialects {
            if dialect.name.trim().is_empty() {
                return Err(StdrevError::quirk("dialect name must not be empty"));
            }
            if dialect.indicator.as_str().trim().is_empty() {
                return Err(StdrevError::quirk(format!(
                    "dialect {:?}: indicator must not be empty",
                    dialect.name
                )));
            }
            if dialect.family == LanguageFamily::None {
                return Err(StdrevError::quirk(format!(
                    "dialect {:?}: family must be c or cpp",
                    dialect.name
                )));
            }
            if !dialect_names.insert(dialect.name.as_str()) {
                return Err(StdrevError::quirk(format!(
                    "duplicate dialect name {:?}",
                    dialect.name
                )));
            }
            if let Some(revision) = dialect.revision {
                if revision.family() != dialect.family {
                    return Err(StdrevError::quirk(format!(
                        "dialect {:?}: revision {} is not a {} revision",
                        dialect.name, revision, dialect.family
                    )));
                }
            }
        }

        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_valid() {
        assert!(QuirksTable::builtin().validate().is_ok());
    }

    #[test]
    fn builtin_dialect_priority() {
        let table = QuirksTable::builtin();
        let names: Vec<_> = table.dialects.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec![DIALECT_CLI, DIALECT_WINRT, DIALECT_EMBEDDED]);
    }

    #[test]
    fn embedded_excludes_all_capabilities() {
        let table = QuirksTable::builtin();
        let embedded = table.dialect(DIALECT_EMBEDDED).expect("embedded");
        assert_eq!(embedded.excludes.len(), 5);
        assert!(embedded.excludes.contains(&Capability::Templates));
    }

    #[test]
    fn hp_rewrite_only_matches_cpp_and_exact_token() {
        let table = QuirksTable::builtin();
        let hp = table.vendor(&VendorId::new(HP_ACC_VENDOR)).expect("hp");

        assert_eq!(hp.rewrite(LanguageFamily::Cpp, 199_710), Some(199_711));
        assert_eq!(hp.rewrite(LanguageFamily::Cpp, 201_103), None);
        assert_eq!(hp.rewrite(LanguageFamily::C, 199_710), None);
    }

    #[test]
    fn active_dialects_filters_by_family_and_priority() {
        let table = QuirksTable::builtin();
        let snapshot = SignalSnapshot::new()
            .with_dialect(EMBEDDED_CPLUSPLUS)
            .with_dialect(CPLUSPLUS_CLI);

        let active: Vec<_> = table
            .active_dialects(&snapshot, LanguageFamily::Cpp)
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(active, vec![DIALECT_CLI, DIALECT_EMBEDDED]);

        assert_eq!(table.active_dialects(&snapshot, LanguageFamily::C).count(), 0);
    }

    #[test]
    fn merge_replaces_in_place_and_appends() {
        let overrides = QuirksTable {
            vendors: vec![VendorQuirk {
                id: VendorId::new("acme"),
                rewrites: vec![TokenRewrite {
                    family: LanguageFamily::C,
                    from: 199_900,
                    to: 199_901,
                }],
            }],
            dialects: vec![
                DialectRecord {
                    name: DIALECT_WINRT.to_string(),
                    indicator: Indicator::new(CPLUSPLUS_WINRT),
                    family: LanguageFamily::Cpp,
                    revision: Some(Revision::Cpp11),
                    excludes: BTreeSet::new(),
                },
                DialectRecord {
                    name: "openmp-target".to_string(),
                    indicator: Indicator::new("__OPENMP_TARGET__"),
                    family: LanguageFamily::C,
                    revision: None,
                    excludes: BTreeSet::new(),
                },
            ],
        };

        let merged = QuirksTable::builtin().merge(overrides);

        assert_eq!(merged.vendors.len(), 2);
        let names: Vec<_> = merged.dialects.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec![DIALECT_CLI, DIALECT_WINRT, DIALECT_EMBEDDED, "openmp-target"]
        );
        assert_eq!(
            merged.dialect(DIALECT_WINRT).and_then(|d| d.revision),
            Some(Revision::Cpp11)
        );
        assert!(merged.validate().is_ok());
    }

    #[test]
    fn validate_rejects_lowering_rewrite() {
        let table = QuirksTable {
            vendors: vec![VendorQuirk {
                id: VendorId::new("broken"),
                rewrites: vec![TokenRewrite {
                    family: LanguageFamily::Cpp,
                    from: 201_103,
                    to: 199_711,
                }],
            }],
            dialects: Vec::new(),
        };
        assert!(matches!(
            table.validate(),
            Err(StdrevError::InvalidQuirk { .. })
        ));
    }

    #[test]
    fn validate_rejects_cross_family_revision() {
        let mut table = QuirksTable::builtin();
        table.dialects[0].revision = Some(Revision::C99);
        assert!(table.validate().is_err());
    }

    #[test]
    fn validate_rejects_duplicate_dialect_names() {
        let mut table = QuirksTable::builtin();
        let duplicate = table.dialects[0].clone();
        table.dialects.push(duplicate);
        assert!(table.validate().is_err());
    }

    #[test]
    fn validate_rejects_familyless_dialect() {
        let mut table = QuirksTable::builtin();
        table.dialects[2].family = LanguageFamily::None;
        table.dialects[2].revision = None;
        assert!(matches!(
            table.validate(),
            Err(StdrevError::InvalidQuirk { .. })
        ));
    }
}
