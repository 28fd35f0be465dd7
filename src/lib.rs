//! # Kirigami
//!
//! Token stream shaping filters for full-text search analysis.
//!
//! Kirigami re-shapes an already-tokenized word stream before it is indexed
//! or queried: compound tokens are split into subwords, runs of subwords are
//! recombined, and multi-word phrases are merged into single tokens, all
//! while keeping the position-increment bookkeeping that phrase and
//! proximity queries depend on.
//!
//! ## Features
//!
//! - Pull-based, single-pass token transducers
//! - Word-delimiter splitting with configurable catenation policies
//! - Greedy dictionary-driven phrase aggregation
//! - Base-form expansion from an in-memory dictionary
//! - Composable analysis pipelines

pub mod analysis;
pub mod error;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
