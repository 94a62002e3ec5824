//! # Revision Ladders
//!
//! The totally ordered list of known standard revisions for each language
//! family, oldest to newest.
//!
//! ## C Ladder
//!
//! | Revision | Document | Token |
//! |----------|----------|-------|
//! | C89 | ANSI X3.159-1989 | (base indicator only) |
//! | C90 | ISO/IEC 9899:1990 | (none) |
//! | C94 | ISO/IEC 9899-1:1994 | 199409 |
//! | C99 | ISO/IEC 9899:1999 | 199901 |
//! | C11 | ISO/IEC 9899:2011 | 201112 |
//! | C17 | ISO/IEC 9899:2018 | 201710 |
//! | C23 | ISO/IEC 9899:2024 | 202311 |
//!
//! ## C++ Ladder
//!
//! | Revision | Document | Token |
//! |----------|----------|-------|
//! | C++98 | ISO/IEC 14882:1998 | 199711 |
//! | C++11 | ISO/IEC 14882:2011 | 201103 |
//! | C++14 | ISO/IEC 14882:2014 | 201402 |
//! | C++17 | ISO/IEC 14882:2017 | 201703 |
//! | C++20 | ISO/IEC 14882:2020 | 202002 |
//! | C++23 | ISO/IEC 14882:2024 | 202302 |
//!
//! C++03 kept the C++98 token value and cannot be told apart from it, so it
//! is an alias of C++98 rather than a rung of its own.

use crate::primitives::{
    C11_TOKEN, C17_TOKEN, C23_TOKEN, C94_TOKEN, C99_TOKEN, CPLUSPLUS, CPP11_TOKEN, CPP14_TOKEN,
    CPP17_TOKEN, CPP20_TOKEN, CPP23_TOKEN, CPP98_TOKEN, STDC, STDC_HOSTED,
};
use crate::{LanguageFamily, StdrevError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// REVISION ENUM
// =============================================================================

/// A named entry on one family's ladder.
///
/// The derived ordering is only meaningful between revisions of the same
/// family; use [`Revision::family`] before comparing across ladders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Revision {
    #[serde(rename = "C89")]
    C89,
    #[serde(rename = "C90")]
    C90,
    #[serde(rename = "C94")]
    C94,
    #[serde(rename = "C99")]
    C99,
    #[serde(rename = "C11")]
    C11,
    #[serde(rename = "C17", alias = "C18")]
    C17,
    #[serde(rename = "C23")]
    C23,
    #[serde(rename = "C++98", alias = "C++97", alias = "C++03")]
    Cpp98,
    #[serde(rename = "C++11")]
    Cpp11,
    #[serde(rename = "C++14")]
    Cpp14,
    #[serde(rename = "C++17")]
    Cpp17,
    #[serde(rename = "C++20")]
    Cpp20,
    #[serde(rename = "C++23")]
    Cpp23,
}

impl Revision {
    /// Get the canonical name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Revision::C89 => "C89",
            Revision::C90 => "C90",
            Revision::C94 => "C94",
            Revision::C99 => "C99",
            Revision::C11 => "C11",
            Revision::C17 => "C17",
            Revision::C23 => "C23",
            Revision::Cpp98 => "C++98",
            Revision::Cpp11 => "C++11",
            Revision::Cpp14 => "C++14",
            Revision::Cpp17 => "C++17",
            Revision::Cpp20 => "C++20",
            Revision::Cpp23 => "C++23",
        }
    }

    /// Alternative names that resolve to this revision.
    #[must_use]
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Revision::C17 => &["C18"],
            Revision::Cpp98 => &["C++97", "C++03"],
            _ => &[],
        }
    }

    /// Get the standard document that defines this revision.
    #[must_use]
    pub fn document(&self) -> &'static str {
        match self {
            Revision::C89 => "ANSI X3.159-1989",
            Revision::C90 => "ISO/IEC 9899:1990",
            Revision::C94 => "ISO/IEC 9899-1:1994",
            Revision::C99 => "ISO/IEC 9899:1999",
            Revision::C11 => "ISO/IEC 9899:2011",
            Revision::C17 => "ISO/IEC 9899:2018",
            Revision::C23 => "ISO/IEC 9899:2024",
            Revision::Cpp98 => "ISO/IEC 14882:1998",
            Revision::Cpp11 => "ISO/IEC 14882:2011",
            Revision::Cpp14 => "ISO/IEC 14882:2014",
            Revision::Cpp17 => "ISO/IEC 14882:2017",
            Revision::Cpp20 => "ISO/IEC 14882:2020",
            Revision::Cpp23 => "ISO/IEC 14882:2024",
        }
    }

    /// Get the year the revision is conventionally named after.
    #[must_use]
    pub fn year(&self) -> u16 {
        match self {
            Revision::C89 => 1989,
            Revision::C90 => 1990,
            Revision::C94 => 1994,
            Revision::C99 => 1999,
            Revision::C11 => 2011,
            Revision::C17 => 2017,
            Revision::C23 => 2023,
            Revision::Cpp98 => 1998,
            Revision::Cpp11 => 2011,
            Revision::Cpp14 => 2014,
            Revision::Cpp17 => 2017,
            Revision::Cpp20 => 2020,
            Revision::Cpp23 => 2023,
        }
    }

    /// Get the family whose ladder this revision belongs to.
    #[must_use]
    pub fn family(&self) -> LanguageFamily {
        match self {
            Revision::C89
            | Revision::C90
            | Revision::C94
            | Revision::C99
            | Revision::C11
            | Revision::C17
            | Revision::C23 => LanguageFamily::C,
            Revision::Cpp98
            | Revision::Cpp11
            | Revision::Cpp14
            | Revision::Cpp17
            | Revision::Cpp20
            | Revision::Cpp23 => LanguageFamily::Cpp,
        }
    }

    /// Minimum version token required to claim this revision.
    ///
    /// `None` for revisions that predate the family's version macro.
    #[must_use]
    pub fn threshold(&self) -> Option<u32> {
        match self {
            Revision::C89 | Revision::C90 => None,
            Revision::C94 => Some(C94_TOKEN),
            Revision::C99 => Some(C99_TOKEN),
            Revision::C11 => Some(C11_TOKEN),
            Revision::C17 => Some(C17_TOKEN),
            Revision::C23 => Some(C23_TOKEN),
            Revision::Cpp98 => Some(CPP98_TOKEN),
            Revision::Cpp11 => Some(CPP11_TOKEN),
            Revision::Cpp14 => Some(CPP14_TOKEN),
            Revision::Cpp17 => Some(CPP17_TOKEN),
            Revision::Cpp20 => Some(CPP20_TOKEN),
            Revision::Cpp23 => Some(CPP23_TOKEN),
        }
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Revision {
    type Err = StdrevError;

    /// Accepts canonical names and aliases, case-insensitively, with or
    /// without the "++" spelled as "pp" (`cpp17`, `C++17`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace("PP", "++");
        ALL_REVISIONS
            .iter()
            .copied()
            .find(|rev| {
                rev.name() == wanted || rev.aliases().iter().any(|alias| *alias == wanted)
            })
            .ok_or_else(|| StdrevError::UnknownRevision(s.to_string()))
    }
}

/// Every revision of every family, each ladder oldest to newest.
pub const ALL_REVISIONS: [Revision; 13] = [
    Revision::C89,
    Revision::C90,
    Revision::C94,
    Revision::C99,
    Revision::C11,
    Revision::C17,
    Revision::C23,
    Revision::Cpp98,
    Revision::Cpp11,
    Revision::Cpp14,
    Revision::Cpp17,
    Revision::Cpp20,
    Revision::Cpp23,
];

// =============================================================================
// LADDER
// =============================================================================

/// A family's ordered revisions plus the facts needed to walk them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ladder {
    family: LanguageFamily,
    revisions: &'static [Revision],
    base_indicator: &'static str,
    token_implies_base: bool,
    implied_tokens: &'static [(&'static str, u32)],
    token_floor: Option<Revision>,
}

/// C: `__STDC__` alone implies C89. Any `__STDC_VERSION__` implies at least
/// C94, the revision that introduced the macro, and `__STDC_HOSTED__` next to
/// a version token implies C99, the revision that introduced the hosted macro.
pub const C_LADDER: Ladder = Ladder {
    family: LanguageFamily::C,
    revisions: &[
        Revision::C89,
        Revision::C90,
        Revision::C94,
        Revision::C99,
        Revision::C11,
        Revision::C17,
        Revision::C23,
    ],
    base_indicator: STDC,
    token_implies_base: false,
    implied_tokens: &[(STDC_HOSTED, C99_TOKEN)],
    token_floor: Some(Revision::C94),
};

/// C++: `__cplusplus` doubles as base indicator and version token. A defined
/// `__cplusplus` already proves the oldest rung, so pre-standard values (e.g.
/// `1`) floor at C++98 rather than retracting to unknown.
pub const CPP_LADDER: Ladder = Ladder {
    family: LanguageFamily::Cpp,
    revisions: &[
        Revision::Cpp98,
        Revision::Cpp11,
        Revision::Cpp14,
        Revision::Cpp17,
        Revision::Cpp20,
        Revision::Cpp23,
    ],
    base_indicator: CPLUSPLUS,
    token_implies_base: true,
    implied_tokens: &[],
    token_floor: Some(Revision::Cpp98),
};

impl Ladder {
    /// Get the ladder for a family. `None` has no ladder.
    #[must_use]
    pub fn for_family(family: LanguageFamily) -> Option<&'static Ladder> {
        match family {
            LanguageFamily::C => Some(&C_LADDER),
            LanguageFamily::Cpp => Some(&CPP_LADDER),
            LanguageFamily::None => None,
        }
    }

    #[must_use]
    pub fn family(&self) -> LanguageFamily {
        self.family
    }

    /// Revisions oldest to newest.
    #[must_use]
    pub fn revisions(&self) -> &'static [Revision] {
        self.revisions
    }

    /// Name of the presence flag without which nothing can be claimed.
    #[must_use]
    pub fn base_indicator(&self) -> &'static str {
        self.base_indicator
    }

    /// Whether a version token on its own proves the base indicator
    /// (true when the version macro is the base indicator itself).
    #[must_use]
    pub fn token_implies_base(&self) -> bool {
        self.token_implies_base
    }

    /// Presence flags that, next to a version token, imply a minimum token.
    #[must_use]
    pub fn implied_tokens(&self) -> &'static [(&'static str, u32)] {
        self.implied_tokens
    }

    /// Revision implied by a version token that satisfies no threshold.
    #[must_use]
    pub fn token_floor(&self) -> Option<Revision> {
        self.token_floor
    }

    /// The oldest revision on the ladder.
    #[must_use]
    pub fn oldest(&self) -> Option<Revision> {
        self.revisions.first().copied()
    }

    /// The newest revision on the ladder.
    #[must_use]
    pub fn newest(&self) -> Option<Revision> {
        self.revisions.last().copied()
    }

    /// Index of `revision` on this ladder, `None` if it belongs elsewhere.
    #[must_use]
    pub fn position(&self, revision: Revision) -> Option<usize> {
        self.revisions.iter().position(|r| *r == revision)
    }

    /// Newest revision whose threshold is `<= token`.
    ///
    /// Scans newest first so a token satisfying several thresholds lands on
    /// the newest of them.
    #[must_use]
    pub fn highest_for_token(&self, token: u32) -> Option<Revision> {
        self.revisions
            .iter()
            .rev()
            .copied()
            .find(|rev| rev.threshold().is_some_and(|t| token >= t))
    }

    /// Every revision at or below `revision`, oldest first.
    ///
    /// Built by slicing the ladder, so the result is always a gap-free prefix.
    #[must_use]
    pub fn prefix_through(&self, revision: Revision) -> &'static [Revision] {
        match self.position(revision) {
            Some(i) => &self.revisions[..=i],
            None => &[],
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
    fn revision_ordering_within_ladders() {
        for ladder in [&C_LADDER, &CPP_LADDER] {
            assert!(ladder.revisions().windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn every_revision_sits_on_its_family_ladder() {
        for rev in ALL_REVISIONS {
            let ladder = Ladder::for_family(rev.family()).expect("ladder");
            assert!(ladder.position(rev).is_some(), "{rev} missing");
        }
    }

    #[test]
    fn highest_for_token_prefers_newest() {
        assert_eq!(C_LADDER.highest_for_token(C11_TOKEN), Some(Revision::C11));
        assert_eq!(C_LADDER.highest_for_token(C11_TOKEN - 1), Some(Revision::C99));
        assert_eq!(C_LADDER.highest_for_token(u32::MAX), Some(Revision::C23));
        assert_eq!(CPP_LADDER.highest_for_token(201_402), Some(Revision::Cpp14));
    }

    #[test]
    fn highest_for_token_below_all_thresholds() {
        assert_eq!(C_LADDER.highest_for_token(1), None);
        assert_eq!(CPP_LADDER.highest_for_token(1), None);
    }

    #[test]
    fn prefix_through_is_gap_free() {
        let prefix = C_LADDER.prefix_through(Revision::C99);
        assert_eq!(
            prefix,
            &[Revision::C89, Revision::C90, Revision::C94, Revision::C99]
        );
        assert!(C_LADDER.prefix_through(Revision::Cpp11).is_empty());
    }

    #[test]
    fn parse_names_and_aliases() {
        assert_eq!("C99".parse::<Revision>().ok(), Some(Revision::C99));
        assert_eq!("c18".parse::<Revision>().ok(), Some(Revision::C17));
        assert_eq!("C++03".parse::<Revision>().ok(), Some(Revision::Cpp98));
        assert_eq!("cpp17".parse::<Revision>().ok(), Some(Revision::Cpp17));
        assert!(matches!(
            "C42".parse::<Revision>(),
            Err(StdrevError::UnknownRevision(_))
        ));
    }

    #[test]
    fn serde_uses_canonical_names() {
        let json = serde_json::to_string(&Revision::Cpp11).expect("serialize");
        assert_eq!(json, "\"C++11\"");
        let parsed: Revision = serde_json::from_str("\"C18\"").expect("deserialize");
        assert_eq!(parsed, Revision::C17);
    }

    #[test]
    fn ladder_floors() {
        assert_eq!(C_LADDER.oldest(), Some(Revision::C89));
        assert_eq!(C_LADDER.token_floor(), Some(Revision::C94));
        assert_eq!(CPP_LADDER.oldest(), Some(Revision::Cpp98));
        assert_eq!(CPP_LADDER.token_floor(), Some(Revision::Cpp98));
        assert!(Ladder::for_family(LanguageFamily::None).is_none());
    }
}
