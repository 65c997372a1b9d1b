//! Node addressing inside a value tree.
//!
//! A [`Path`] is an ordered list of segments, rendered in the dotted/bracketed
//! notation diff consumers expect: `layers[0].weight[2]`. The root of a tree
//! renders as the empty string.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PathParseError;

/// One step from a node to a child: a mapping key or a sequence index.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Address of a node in a value tree.
///
/// Paths are only comparable across two trees insofar as the trees share
/// structure; the diff engine guarantees every emitted path addresses a node
/// in at least one of the compared trees.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<PathSegment>);

impl Path {
    /// The root path (no segments).
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from segments.
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }

    /// Returns `true` if this is the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The segment list.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// A new path with one more segment appended.
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Append a segment in place.
    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.0.push(segment.into());
    }

    /// Remove and return the last segment.
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.0.pop()
    }

    /// Prepend a segment, shifting the existing ones down one level.
    ///
    /// Used by directory orchestration to re-root per-file results under the
    /// file's relative path.
    pub fn prepend(&mut self, segment: impl Into<PathSegment>) {
        self.0.insert(0, segment.into());
    }

    /// Prefix-at-segment-boundary match against a rendered filter string.
    ///
    /// Matches when the rendered path equals `filter`, or starts with
    /// `filter + "."` or `filter + "["`. The empty filter matches every path.
    pub fn matches_filter(&self, filter: &str) -> bool {
        if filter.is_empty() {
            return true;
        }
        let rendered = self.to_string();
        if rendered == filter {
            return true;
        }
        match rendered.as_bytes().get(filter.len()) {
            Some(b'.') | Some(b'[') => rendered.starts_with(filter),
            _ => false,
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = PathParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let err = |reason: &str| PathParseError {
            path: text.to_string(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        let mut rest = text;
        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix('[') {
                let close = after
                    .find(']')
                    .ok_or_else(|| err("unterminated index bracket"))?;
                let index: usize = after[..close]
                    .parse()
                    .map_err(|_| err("index is not an unsigned integer"))?;
                segments.push(PathSegment::Index(index));
                rest = &after[close + 1..];
            } else {
                let rest_stripped = rest.strip_prefix('.').unwrap_or(rest);
                if rest_stripped.is_empty() {
                    return Err(err("empty key segment"));
                }
                let end = rest_stripped
                    .find(['.', '['])
                    .unwrap_or(rest_stripped.len());
                if end == 0 {
                    return Err(err("empty key segment"));
                }
                segments.push(PathSegment::Key(rest_stripped[..end].to_string()));
                rest = &rest_stripped[end..];
            }
        }
        Ok(Self(segments))
    }
}

/// Paths serialize as their rendered text form.
impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}
