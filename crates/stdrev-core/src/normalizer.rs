//! # Normalizer Module
//!
//! Rewrites a raw [`SignalSnapshot`] into the few facts the resolver needs.
//!
//! - Checks the family's base conformance indicator
//! - Applies vendor token rewrites from the quirks table
//! - Applies presence flags that imply a minimum token (`__STDC_HOSTED__`)
//! - Never fails: unknown vendors and unknown indicators are ignored

use crate::quirks::QuirksTable;
use crate::revision::Ladder;
use crate::{LanguageFamily, SignalSnapshot};
use tracing::debug;

/// A snapshot with vendor irregularities rewritten to standard form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSnapshot<'a> {
    /// The family being classified.
    pub family: LanguageFamily,
    /// Ladder of the family, `None` when the family is undetected.
    pub ladder: Option<&'static Ladder>,
    /// Whether the family's base conformance indicator is defined.
    pub base_present: bool,
    /// Version token after every rewrite.
    pub token: Option<u32>,
    /// Version token exactly as reported.
    pub raw_token: Option<u32>,
    /// The snapshot this was derived from (dialect flags are read from it).
    pub source: &'a SignalSnapshot,
}

impl NormalizedSnapshot<'_> {
    /// Check whether any rewrite changed the version token.
    #[must_use]
    pub fn was_rewritten(&self) -> bool {
        self.token != self.raw_token
    }
}

/// The Normalizer turns raw signals into a [`NormalizedSnapshot`].
pub struct Normalizer;

impl Normalizer {
    /// Normalize `snapshot` for `family` using `quirks`.
    #[must_use]
    pub fn normalize<'a>(
        snapshot: &'a SignalSnapshot,
        family: LanguageFamily,
        quirks: &QuirksTable,
    ) -> NormalizedSnapshot<'a> {
        let raw_token = snapshot.version_token;

        let Some(ladder) = Ladder::for_family(family) else {
            return NormalizedSnapshot {
                family,
                ladder: None,
                base_present: false,
                token: None,
                raw_token,
                source: snapshot,
            };
        };

        let base_present = snapshot.has_presence(ladder.base_indicator())
            || (ladder.token_implies_base() && raw_token.is_some());

        let mut token = raw_token;

        if let (Some(value), Some(vendor)) = (token, snapshot.vendor.as_ref()) {
            if let Some(rewritten) = quirks.vendor(vendor).and_then(|q| q.rewrite(family, value)) {
                debug!(
                    vendor = %vendor,
                    from = value,
                    to = rewritten,
                    "vendor quirk rewrote version token"
                );
                token = Some(rewritten);
            }
        }

        if let Some(value) = token {
            let implied = ladder
                .implied_tokens()
                .iter()
                .filter(|(indicator, _)| snapshot.has_presence(indicator))
                .map(|(_, minimum)| *minimum)
                .max();
            if let Some(minimum) = implied.filter(|m| *m > value) {
                debug!(from = value, to = minimum, "presence flag raised version token");
                token = Some(minimum);
            }
        }

        NormalizedSnapshot {
            family,
            ladder: Some(ladder),
            base_present,
            token,
            raw_token,
            source: snapshot,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
