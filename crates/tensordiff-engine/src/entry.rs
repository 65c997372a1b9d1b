//! Change records produced by the diff engine.

use serde::{Deserialize, Serialize};
use tensordiff_types::{Path, PathSegment, Value};

/// A single reported change at one path.
///
/// `Added` carries only the new subtree, `Removed` only the old one;
/// `Modified` and `TypeChanged` carry both sides. Removals and additions are
/// whole-subtree events: the engine does not recurse into a subtree that
/// exists on only one side.
///
/// The JSON form is the wire contract: an object tagged by `diffType` with
/// camelCase value fields, e.g.
/// `{"diffType":"Modified","path":"a.b","oldValue":1.0,"newValue":2.0}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "diffType")]
pub enum DiffEntry {
    /// A node exists in the new tree only.
    #[serde(rename_all = "camelCase")]
    Added { path: Path, new_value: Value },

    /// A node exists in the old tree only.
    #[serde(rename_all = "camelCase")]
    Removed { path: Path, old_value: Value },

    /// Both nodes carry the same tag but different content.
    #[serde(rename_all = "camelCase")]
    Modified {
        path: Path,
        old_value: Value,
        new_value: Value,
    },

    /// The node's tag differs between the trees; both whole subtrees are
    /// reported and neither is recursed into.
    #[serde(rename_all = "camelCase")]
    TypeChanged {
        path: Path,
        old_value: Value,
        new_value: Value,
    },
}

impl DiffEntry {
    /// The path this change was reported at.
    pub fn path(&self) -> &Path {
        match self {
            DiffEntry::Added { path, .. }
            | DiffEntry::Removed { path, .. }
            | DiffEntry::Modified { path, .. }
            | DiffEntry::TypeChanged { path, .. } => path,
        }
    }

    /// The change kind as its wire name.
    pub fn diff_type(&self) -> &'static str {
        match self {
            DiffEntry::Added { .. } => "Added",
            DiffEntry::Removed { .. } => "Removed",
            DiffEntry::Modified { .. } => "Modified",
            DiffEntry::TypeChanged { .. } => "TypeChanged",
        }
    }

    /// Prefix the entry's path with one segment.
    ///
    /// Used when merging per-file results into a directory-level report,
    /// where each file's entries sit under its relative path.
    pub fn re_root(&mut self, segment: impl Into<PathSegment>) {
        match self {
            DiffEntry::Added { path, .. }
            | DiffEntry::Removed { path, .. }
            | DiffEntry::Modified { path, .. }
            | DiffEntry::TypeChanged { path, .. } => path.prepend(segment),
        }
    }

    /// The old-side value, for kinds that carry one.
    pub fn old_value(&self) -> Option<&Value> {
        match self {
            DiffEntry::Removed { old_value, .. }
            | DiffEntry::Modified { old_value, .. }
            | DiffEntry::TypeChanged { old_value, .. } => Some(old_value),
            DiffEntry::Added { .. } => None,
        }
    }

    /// The new-side value, for kinds that carry one.
    pub fn new_value(&self) -> Option<&Value> {
        match self {
            DiffEntry::Added { new_value, .. }
            | DiffEntry::Modified { new_value, .. }
            | DiffEntry::TypeChanged { new_value, .. } => Some(new_value),
            DiffEntry::Removed { .. } => None,
        }
    }
}
