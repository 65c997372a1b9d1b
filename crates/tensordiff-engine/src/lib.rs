//! Diff engine for tensordiff.
//!
//! Compares two canonical value trees in lock-step and produces an ordered
//! list of change records. The comparison is a pure function: no I/O, no
//! shared state, deterministic output order.
//!
//! # Key Types
//!
//! - [`DiffEntry`] -- One reported change (added/removed/modified/type-changed)
//! - [`DiffOptions`] -- Numeric tolerance, path filter, key ignore rules
//! - [`diff`] -- The comparison entry point

pub mod compare;
pub mod entry;
pub mod options;

pub use compare::diff;
pub use entry::DiffEntry;
pub use options::DiffOptions;
