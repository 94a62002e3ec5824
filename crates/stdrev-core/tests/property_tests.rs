//! # Property-Based Tests
//!
//! These tests ensure determinism and correctness invariants of the
//! classifier over arbitrary snapshots.

use proptest::option;
use proptest::prelude::*;
use proptest::sample::subsequence;
use stdrev_core::primitives::{
    CPLUSPLUS, CPLUSPLUS_CLI, CPLUSPLUS_WINRT, EMBEDDED_CPLUSPLUS, STDC, STDC_HOSTED,
};
use stdrev_core::{ClassificationResult, Ladder, LanguageFamily, SignalSnapshot, classify};

const PRESENCE: [&str; 4] = [STDC, STDC_HOSTED, CPLUSPLUS, "__GNUC__"];
const DIALECTS: [&str; 3] = [CPLUSPLUS_CLI, CPLUSPLUS_WINRT, EMBEDDED_CPLUSPLUS];
const VENDORS: [&str; 3] = ["hp-acc", "gcc", "msvc"];

// =============================================================================
// STRATEGIES
// =============================================================================

fn family() -> impl Strategy<Value = LanguageFamily> {
    prop_oneof![
        Just(LanguageFamily::C),
        Just(LanguageFamily::Cpp),
        Just(LanguageFamily::None),
    ]
}

/// Tokens clustered around real thresholds plus arbitrary values.
fn token() -> impl Strategy<Value = u32> {
    prop_oneof![
        prop::sample::select(vec![
            1u32, 199_409, 199_710, 199_711, 199_901, 201_103, 201_112, 201_402, 201_703,
            201_710, 202_002, 202_302, 202_311,
        ]),
        199_000u32..203_000,
        any::<u32>(),
    ]
}

fn snapshot_without_dialects() -> impl Strategy<Value = SignalSnapshot> {
    (
        subsequence(PRESENCE.to_vec(), 0..=PRESENCE.len()),
        option::of(token()),
        option::of(prop::sample::select(VENDORS.to_vec())),
    )
        .prop_map(|(presence, token, vendor)| {
            let mut snapshot = SignalSnapshot::new();
            for name in presence {
                snapshot = snapshot.with_presence(name);
            }
            snapshot.version_token = token;
            if let Some(vendor) = vendor {
                snapshot = snapshot.with_vendor(vendor);
            }
            snapshot
        })
}

fn snapshot() -> impl Strategy<Value = SignalSnapshot> {
    (
        snapshot_without_dialects(),
        subsequence(DIALECTS.to_vec(), 0..=DIALECTS.len()),
    )
        .prop_map(|(mut snapshot, dialects)| {
            for name in dialects {
                snapshot = snapshot.with_dialect(name);
            }
            snapshot
        })
}

/// A snapshot and a refinement of it (same or more signals, no dialects).
fn refinement_pair() -> impl Strategy<Value = (SignalSnapshot, SignalSnapshot)> {
    (
        snapshot_without_dialects(),
        subsequence(PRESENCE.to_vec(), 0..=PRESENCE.len()),
        any::<bool>(),
        option::of(token()),
        any::<bool>(),
    )
        .prop_map(|(richer, keep_presence, drop_token, token, drop_vendor)| {
            let mut poorer = SignalSnapshot::new();
            for name in keep_presence {
                if richer.has_presence(name) {
                    poorer = poorer.with_presence(name);
                }
            }
            let mut richer = richer;
            if richer.version_token.is_none() {
                richer.version_token = token;
            }
            if !drop_token {
                poorer.version_token = richer.version_token;
            }
            if !drop_vendor {
                poorer.vendor = richer.vendor.clone();
            }
            (poorer, richer)
        })
}

fn assert_prefix(result: &ClassificationResult) -> Result<(), TestCaseError> {
    match (result.resolved, Ladder::for_family(result.family)) {
        (Some(resolved), Some(ladder)) => {
            let end = ladder.position(resolved).map(|i| i + 1).unwrap_or(0);
            prop_assert!(end > 0, "resolved revision must sit on the family ladder");
            prop_assert_eq!(result.at_least.as_slice(), &ladder.revisions()[..end]);
        }
        _ => prop_assert!(result.at_least.is_empty()),
    }
    Ok(())
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// at_least is always a gap-free ladder prefix ending at the resolved revision.
    #[test]
    fn at_least_is_ladder_prefix(snapshot in snapshot(), family in family()) {
        let result = classify(&snapshot, family);
        assert_prefix(&result)?;
    }

    /// Identical input produces identical output.
    #[test]
    fn classification_is_idempotent(snapshot in snapshot(), family in family()) {
        let first = classify(&snapshot, family);
        let second = classify(&snapshot.clone(), family);
        prop_assert_eq!(first, second);
    }

    /// More signals never retract a resolved revision.
    #[test]
    fn refinement_is_monotonic((poorer, richer) in refinement_pair(), family in family()) {
        prop_assume!(poorer.is_refined_by(&richer));

        let before = classify(&poorer, family);
        let after = classify(&richer, family);

        if let Some(old) = before.resolved {
            let new = after.resolved;
            prop_assert!(new.is_some(), "{:?} retracted to unknown", old);
            prop_assert!(new >= Some(old));
        }
        for revision in &before.at_least {
            prop_assert!(after.at_least(*revision));
        }
    }

    /// A token meeting several thresholds resolves to the newest of them.
    #[test]
    fn newest_threshold_wins(token in token(), family in prop_oneof![Just(LanguageFamily::C), Just(LanguageFamily::Cpp)]) {
        let ladder = Ladder::for_family(family).expect("ladder");
        let base = ladder.base_indicator();
        let result = classify(
            &SignalSnapshot::new().with_presence(base).with_version_token(token),
            family,
        );

        let newest_met = ladder
            .revisions()
            .iter()
            .filter(|r| r.threshold().is_some_and(|t| token >= t))
            .max()
            .copied();
        if let Some(expected) = newest_met {
            prop_assert_eq!(result.resolved, Some(expected));
        }
    }

    /// The HP rewrite makes 199710 indistinguishable from 199711.
    #[test]
    fn hp_quirk_equivalence(extra in subsequence(PRESENCE.to_vec(), 0..=PRESENCE.len())) {
        let mut quirky = SignalSnapshot::new().with_version_token(199_710).with_vendor("hp-acc");
        let mut standard = SignalSnapshot::new().with_version_token(199_711);
        for name in extra {
            quirky = quirky.with_presence(name);
            standard = standard.with_presence(name);
        }

        let a = classify(&quirky, LanguageFamily::Cpp);
        let b = classify(&standard, LanguageFamily::Cpp);
        prop_assert_eq!(a, b);
    }

    /// At most one dialect is ever reported, and exclusions need a dialect.
    #[test]
    fn at_most_one_dialect(snapshot in snapshot(), family in family()) {
        let result = classify(&snapshot, family);
        prop_assert!(result.dialects.len() <= 1);
        if result.dialects.is_empty() {
            prop_assert!(result.excluded_capabilities.is_empty());
        }
    }
}
