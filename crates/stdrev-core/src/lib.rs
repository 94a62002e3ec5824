//! # stdrev-core
//!
//! The deterministic standard-revision classifier - THE LOGIC.
//!
//! Given a snapshot of the signals a C or C++ toolchain exposes about its
//! language-standard conformance, compute:
//! - a single resolved revision (`C11`, `C++17`, ...) or "unknown"
//! - the monotonic set of "at least revision V" predicates
//! - the non-ladder dialect that fired (C++/CLI, C++/CX, Embedded C++)
//!
//! ## Pipeline
//!
//! ```text
//! SignalSnapshot ──► Normalizer ──► LadderResolver ──► ClassificationResult
//!                        ▲               ▲
//!                        └── QuirksTable ┘
//! ```
//!
//! ## Architectural Constraints
//!
//! The CORE:
//! - Consumes signal snapshots, never produces them
//! - Is total: every snapshot yields a result, "unknown" when in doubt
//! - Is data-driven: vendor quirks and dialects live in [`QuirksTable`]
//! - Has NO async, NO I/O (pure Rust)
//!
//! ```
//! use stdrev_core::{classify, LanguageFamily, Revision, SignalSnapshot};
//!
//! let snapshot = SignalSnapshot::new()
//!     .with_presence("__STDC__")
//!     .with_version_token(201_112);
//! let result = classify(&snapshot, LanguageFamily::C);
//!
//! assert_eq!(result.resolved, Some(Revision::C11));
//! assert!(result.at_least(Revision::C99));
//! assert!(!result.at_least(Revision::C17));
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod classifier;
pub mod normalizer;
pub mod primitives;
pub mod quirks;
pub mod resolver;
pub mod revision;
pub mod snapshot;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Capability, Indicator, LanguageFamily, StdrevError, VendorId};

// =============================================================================
// RE-EXPORTS: Classification Pipeline
// =============================================================================

pub use classifier::{ClassificationResult, Classifier, classify};
pub use normalizer::{NormalizedSnapshot, Normalizer};
pub use quirks::{DialectRecord, QuirksTable, TokenRewrite, VendorQuirk};
pub use resolver::{LadderResolver, Resolution, Resolved};
pub use revision::{ALL_REVISIONS, C_LADDER, CPP_LADDER, Ladder, Revision};
pub use snapshot::SignalSnapshot;
