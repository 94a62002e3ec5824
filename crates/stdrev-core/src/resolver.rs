//! # Ladder Resolver
//!
//! Walks a family's ladder to find the highest revision a normalized
//! snapshot qualifies for.
//!
//! 1. No base indicator and no pinning dialect: unknown.
//! 2. No version token: the ladder's oldest revision.
//! 3. A version token: the newest revision whose threshold it meets, else
//!    the ladder's token floor.
//! 4. An active dialect with a fixed revision overrides the ladder result,
//!    but only downwards: the pin is capped at what steps 2-3 support.
//!
//! A pinning dialect counts as base evidence on its own (`__embedded_cplusplus`
//! identifies C++ without `__cplusplus`).
//!
//! Resolution never fails; "unknown" stands in for "cannot determine".

use crate::normalizer::NormalizedSnapshot;
use crate::quirks::{DialectRecord, QuirksTable};
use crate::Revision;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// How a classification was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Family undetected or base indicator missing.
    Unknown,
    /// Only the base indicator was present.
    BaseIndicator,
    /// A version token met a revision threshold.
    VersionToken,
    /// A version token was present but met no threshold.
    TokenFloor,
    /// An active dialect pinned the revision.
    Dialect,
}

impl Resolution {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Unknown => "unknown",
            Resolution::BaseIndicator => "base_indicator",
            Resolution::VersionToken => "version_token",
            Resolution::TokenFloor => "token_floor",
            Resolution::Dialect => "dialect",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of walking the ladder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<'q> {
    pub revision: Option<Revision>,
    pub resolution: Resolution,
    /// The dialect record that fired, if any.
    pub dialect: Option<&'q DialectRecord>,
}

impl Resolved<'_> {
    fn unknown() -> Self {
        Self {
            revision: None,
            resolution: Resolution::Unknown,
            dialect: None,
        }
    }
}

/// Resolver for normalized snapshots.
pub struct LadderResolver;

impl LadderResolver {
    /// Resolve `snapshot` against its family's ladder.
    #[must_use]
    pub fn resolve<'q>(snapshot: &NormalizedSnapshot<'_>, quirks: &'q QuirksTable) -> Resolved<'q> {
        let Some(ladder) = snapshot.ladder else {
            return Resolved::unknown();
        };

        let mut active = quirks.active_dialects(snapshot.source, snapshot.family);
        let dialect = active.next();
        for ignored in active {
            warn!(
                dialect = %ignored.name,
                winner = dialect.map(|d| d.name.as_str()).unwrap_or_default(),
                "conflicting dialect flag ignored"
            );
        }

        // Pins off this ladder (unvalidated tables) are ignored.
        let pin = dialect
            .and_then(|d| d.revision)
            .filter(|r| ladder.position(*r).is_some());

        if !snapshot.base_present && pin.is_none() {
            return Resolved::unknown();
        }

        let (revision, resolution) = match snapshot.token {
            None => (ladder.oldest(), Resolution::BaseIndicator),
            Some(token) => match ladder.highest_for_token(token) {
                Some(revision) => (Some(revision), Resolution::VersionToken),
                None => match ladder.token_floor() {
                    Some(floor) => (Some(floor), Resolution::TokenFloor),
                    None => (ladder.oldest(), Resolution::TokenFloor),
                },
            },
        };

        if let (Some(record), Some(pinned)) = (dialect, pin) {
            let capped = revision.map_or(pinned, |supported| supported.min(pinned));
            debug!(
                dialect = %record.name,
                pinned = %pinned,
                revision = %capped,
                "dialect pinned revision"
            );
            return Resolved {
                revision: Some(capped),
                resolution: Resolution::Dialect,
                dialect: Some(record),
            };
        }

        Resolved {
            revision,
            resolution,
            dialect,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
