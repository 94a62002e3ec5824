//! # Classifier
//!
//! The single entry point of the CORE: Signal Normalizer, then Ladder
//! Resolver, then a [`ClassificationResult`].
//!
//! A result is a pure function of its snapshot, family and quirks table.
//! It has no identity of its own and is recomputed whenever the input
//! changes.

use crate::normalizer::Normalizer;
use crate::quirks::QuirksTable;
use crate::resolver::{LadderResolver, Resolution};
use crate::revision::Ladder;
use crate::{Capability, LanguageFamily, Revision, SignalSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::LazyLock;
use tracing::debug;

static BUILTIN_CLASSIFIER: LazyLock<Classifier> = LazyLock::new(Classifier::default);

// =============================================================================
// CLASSIFICATION RESULT
// =============================================================================

/// What a snapshot says about standard conformance.
///
/// Invariants:
/// - `at_least` is a gap-free prefix of the family's ladder ending at
///   `resolved`, and is empty exactly when `resolved` is `None`
/// - `dialects` holds at most one name, the dialect that fired
/// - `excluded_capabilities` is non-empty only when a dialect fired
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub family: LanguageFamily,
    pub resolved: Option<Revision>,
    pub at_least: Vec<Revision>,
    pub dialects: BTreeSet<String>,
    pub excluded_capabilities: BTreeSet<Capability>,
    pub resolution: Resolution,
}

impl ClassificationResult {
    /// Result for a snapshot nothing can be said about.
    #[must_use]
    pub fn unknown(family: LanguageFamily) -> Self {
        Self {
            family,
            resolved: None,
            at_least: Vec::new(),
            dialects: BTreeSet::new(),
            excluded_capabilities: BTreeSet::new(),
            resolution: Resolution::Unknown,
        }
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.resolved.is_none()
    }

    /// Check whether code may target at least `revision`.
    ///
    /// Revisions of the other family are never satisfied.
    #[must_use]
    pub fn at_least(&self, revision: Revision) -> bool {
        self.at_least.contains(&revision)
    }

    #[must_use]
    pub fn has_dialect(&self, name: &str) -> bool {
        self.dialects.contains(name)
    }

    /// Check whether a C++ language capability is available.
    #[must_use]
    pub fn supports(&self, capability: Capability) -> bool {
        self.family == LanguageFamily::Cpp
            && self.resolved.is_some()
            && !self.excluded_capabilities.contains(&capability)
    }

    /// Check whether the revision came straight from a version token with
    /// no dialect involved.
    #[must_use]
    pub fn is_precise(&self) -> bool {
        self.resolution == Resolution::VersionToken && self.dialects.is_empty()
    }
}

// =============================================================================
// CLASSIFIER
// =============================================================================

/// A classifier bound to one quirks table.
#[derive(Debug, Clone)]
pub struct Classifier {
    quirks: QuirksTable,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(QuirksTable::builtin())
    }
}

impl Classifier {
    /// Create a classifier using `quirks`.
    #[must_use]
    pub fn new(quirks: QuirksTable) -> Self {
        Self { quirks }
    }

    /// Get the quirks table in use.
    #[must_use]
    pub fn quirks(&self) -> &QuirksTable {
        &self.quirks
    }

    /// Classify `snapshot` as `family`. Never fails.
    #[must_use]
    pub fn classify(&self, snapshot: &SignalSnapshot, family: LanguageFamily) -> ClassificationResult {
        let normalized = Normalizer::normalize(snapshot, family, &self.quirks);
        let resolved = LadderResolver::resolve(&normalized, &self.quirks);

        let (Some(revision), Some(ladder)) = (resolved.revision, Ladder::for_family(family)) else {
            debug!(family = %family, "classified as unknown");
            return ClassificationResult::unknown(family);
        };

        let mut dialects = BTreeSet::new();
        let mut excluded_capabilities = BTreeSet::new();
        if let Some(record) = resolved.dialect {
            dialects.insert(record.name.clone());
            excluded_capabilities.extend(record.excludes.iter().copied());
        }

        debug!(
            family = %family,
            revision = %revision,
            resolution = %resolved.resolution,
            token_rewritten = normalized.was_rewritten(),
            "classified"
        );

        ClassificationResult {
            family,
            resolved: Some(revision),
            at_least: ladder.prefix_through(revision).to_vec(),
            dialects,
            excluded_capabilities,
            resolution: resolved.resolution,
        }
    }
}

/// Classify `snapshot` as `family` with the built-in quirks table.
#[must_use]
pub fn classify(snapshot: &SignalSnapshot, family: LanguageFamily) -> ClassificationResult {
    BUILTIN_CLASSIFIER.classify(snapshot, family)
}

// =============================================================================
// TESTS
// =============================================================================
