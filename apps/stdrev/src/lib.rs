//! # stdrev Library
//!
//! Exposes the CLI, quirks configuration and macro-dump reader for
//! integration testing.

pub mod cli;
pub mod config;
pub mod macros;
