//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::{Outcome, SnapshotArgs};
use crate::config::{read_input, to_toml};
use crate::macros::MacroDump;
use serde::{Deserialize, Serialize};
use std::path::Path;
use stdrev_core::{
    ClassificationResult, Classifier, Ladder, LanguageFamily, QuirksTable, Revision,
    SignalSnapshot, StdrevError, VendorId,
};
use tracing::{debug, info};

/// Placeholder for empty lists in text output.
const NONE: &str = "(none)";

// =============================================================================
// SNAPSHOT INPUT
// =============================================================================

/// On-disk form of a snapshot: the family plus the snapshot fields.
///
/// ```json
/// { "family": "cpp", "presence": ["__cplusplus"], "version_token": 201703 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub family: LanguageFamily,
    #[serde(flatten)]
    pub snapshot: SignalSnapshot,
}

impl SnapshotFile {
    pub fn from_json_str(text: &str) -> Result<Self, StdrevError> {
        serde_json::from_str(text).map_err(|e| StdrevError::ParseError(e.to_string()))
    }
}

/// Build the family and snapshot described by `args`.
pub fn build_snapshot(
    args: &SnapshotArgs,
    quirks: &QuirksTable,
) -> Result<(LanguageFamily, SignalSnapshot), StdrevError> {
    let (family, mut snapshot) = if let Some(path) = &args.snapshot {
        let file = SnapshotFile::from_json_str(&read_input(path)?)?;
        debug!(path = %path.display(), family = %file.family, "loaded snapshot file");
        (args.family.unwrap_or(file.family), file.snapshot)
    } else if let Some(path) = &args.macros {
        snapshot_from_macros(path, args.family, quirks)?
    } else {
        let family = args.family.ok_or_else(|| {
            StdrevError::InvalidSnapshot(
                "--family is required unless --snapshot or --macros is given".to_string(),
            )
        })?;
        let mut snapshot = SignalSnapshot::new();
        for name in &args.defines {
            snapshot = snapshot.with_presence(name.as_str());
        }
        for name in &args.dialects {
            snapshot = snapshot.with_dialect(name.as_str());
        }
        snapshot.version_token = args.token;
        (family, snapshot)
    };

    if let Some(vendor) = &args.vendor {
        snapshot.vendor = Some(VendorId::new(vendor.as_str()));
    }

    Ok((family, snapshot))
}

fn snapshot_from_macros(
    path: &Path,
    family: Option<LanguageFamily>,
    quirks: &QuirksTable,
) -> Result<(LanguageFamily, SignalSnapshot), StdrevError> {
    let dump = MacroDump::parse(&read_input(path)?);
    let family = family.unwrap_or_else(|| dump.family(quirks));
    info!(path = %path.display(), family = %family, "read macro dump");
    Ok((family, dump.to_snapshot(family, quirks)?))
}

// =============================================================================
// RENDERING
// =============================================================================

fn join<T: ToString>(items: impl IntoIterator<Item = T>) -> String {
    let joined = items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        NONE.to_string()
    } else {
        joined
    }
}

/// JSON form of a classification result.
#[must_use]
pub fn result_json(result: &ClassificationResult) -> serde_json::Value {
    serde_json::json!({
        "family": result.family,
        "resolved": result.resolved,
        "at_least": result.at_least,
        "dialects": result.dialects,
        "excluded_capabilities": result.excluded_capabilities,
        "resolution": result.resolution,
        "precise": result.is_precise()
    })
}

fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn print_snapshot(snapshot: &SignalSnapshot) {
    println!();
    println!("Snapshot:");
    println!("  Presence: {}", join(&snapshot.presence));
    println!(
        "  Token:    {}",
        snapshot
            .version_token
            .map(|t| t.to_string())
            .unwrap_or_else(|| NONE.to_string())
    );
    println!("  Dialects: {}", join(&snapshot.dialects));
    println!(
        "  Vendor:   {}",
        snapshot
            .vendor
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| NONE.to_string())
    );
}

// =============================================================================
// CLASSIFY COMMAND
// =============================================================================

/// Classify a snapshot and print the result.
pub fn cmd_classify(
    quirks: &QuirksTable,
    args: &SnapshotArgs,
    json_mode: bool,
    verbose: bool,
) -> Result<(), StdrevError> {
    let (family, snapshot) = build_snapshot(args, quirks)?;
    let result = Classifier::new(quirks.clone()).classify(&snapshot, family);

    if json_mode {
        let mut output = result_json(&result);
        if verbose && let Some(map) = output.as_object_mut() {
            let value = serde_json::to_value(&snapshot)
                .map_err(|e| StdrevError::ParseError(e.to_string()))?;
            map.insert("snapshot".to_string(), value);
        }
        print_json(&output);
        return Ok(());
    }

    println!("Standard Classification");
    println!("=======================");
    println!("Family:     {}", result.family);
    match result.resolved {
        Some(revision) => println!("Revision:   {} ({})", revision, revision.document()),
        None => println!("Revision:   unknown"),
    }
    println!("Resolution: {}", result.resolution);
    println!("Precise:    {}", if result.is_precise() { "yes" } else { "no" });
    println!();
    println!("At least:   {}", join(&result.at_least));
    println!("Dialect:    {}", join(&result.dialects));
    println!("Excluded:   {}", join(&result.excluded_capabilities));

    if verbose {
        print_snapshot(&snapshot);
    }

    Ok(())
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Report whether a snapshot reaches `required`.
pub fn cmd_check(
    quirks: &QuirksTable,
    args: &SnapshotArgs,
    required: Revision,
    json_mode: bool,
) -> Result<Outcome, StdrevError> {
    let (family, snapshot) = build_snapshot(args, quirks)?;
    let result = Classifier::new(quirks.clone()).classify(&snapshot, family);
    let satisfied = result.at_least(required);

    info!(required = %required, satisfied, "checked revision requirement");

    if json_mode {
        print_json(&serde_json::json!({
            "required": required,
            "satisfied": satisfied,
            "result": result_json(&result)
        }));
    } else {
        let resolved = result
            .resolved
            .map(|r| r.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        if satisfied {
            println!("OK: {} satisfies {}", resolved, required);
        } else {
            println!("FAIL: {} does not satisfy {}", resolved, required);
        }
    }

    Ok(if satisfied {
        Outcome::Success
    } else {
        Outcome::Unsatisfied
    })
}

// =============================================================================
// LADDER COMMAND
// =============================================================================

/// Show a family's revision ladder.
pub fn cmd_ladder(family: LanguageFamily, json_mode: bool) -> Result<(), StdrevError> {
    let ladder = Ladder::for_family(family).ok_or_else(|| {
        StdrevError::InvalidFamily(format!("{} has no revision ladder", family))
    })?;

    if json_mode {
        let revisions: Vec<_> = ladder
            .revisions()
            .iter()
            .map(|r| {
                serde_json::json!({
                    "name": r.name(),
                    "aliases": r.aliases(),
                    "document": r.document(),
                    "year": r.year(),
                    "threshold": r.threshold()
                })
            })
            .collect();
        print_json(&serde_json::json!({
            "family": family,
            "base_indicator": ladder.base_indicator(),
            "token_floor": ladder.token_floor(),
            "revisions": revisions
        }));
        return Ok(());
    }

    println!("{} Revision Ladder", family);
    println!("====================");
    println!("Base indicator: {}", ladder.base_indicator());
    println!(
        "Token floor:    {}",
        ladder
            .token_floor()
            .map(|r| r.to_string())
            .unwrap_or_else(|| NONE.to_string())
    );
    println!();
    println!("{:<8} {:<10} {:<6} Document", "Name", "Token", "Year");
    for revision in ladder.revisions() {
        let token = revision
            .threshold()
            .map(|t| t.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<8} {:<10} {:<6} {}",
            revision.name(),
            token,
            revision.year(),
            revision.document()
        );
    }

    Ok(())
}

// =============================================================================
// QUIRKS COMMAND
// =============================================================================

/// Show the effective quirks table.
pub fn cmd_quirks(quirks: &QuirksTable, json_mode: bool) -> Result<(), StdrevError> {
    if json_mode {
        let value =
            serde_json::to_value(quirks).map_err(|e| StdrevError::ParseError(e.to_string()))?;
        print_json(&value);
        return Ok(());
    }

    print!("{}", to_toml(quirks)?);
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
