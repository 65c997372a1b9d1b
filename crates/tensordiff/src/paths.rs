//! File and directory comparison.
//!
//! Thin orchestration over the loaders and the engine: load, compare, merge.
//! Directory comparison matches files by relative path, runs one engine call
//! per matched pair on parallel workers, and merges results in lexicographic
//! relative-path order, so output never depends on completion order.

use std::collections::BTreeMap;
use std::path::{Path as FsPath, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use tensordiff_engine::{diff, DiffEntry, DiffOptions};
use tensordiff_loaders::{is_loadable, load_path, LoadError};
use tensordiff_types::Path;

use crate::error::Result;

/// Compare two files or two directories.
///
/// For files, both are loaded and compared directly. For directories, files
/// are matched by relative path; a file present on only one side becomes a
/// single whole-file `Added`/`Removed` entry at the top level. Mixing a file
/// with a directory is an error.
pub fn diff_paths(
    old_path: impl AsRef<FsPath>,
    new_path: impl AsRef<FsPath>,
    options: &DiffOptions,
) -> Result<Vec<DiffEntry>> {
    let old_path = old_path.as_ref();
    let new_path = new_path.as_ref();

    match (old_path.is_dir(), new_path.is_dir()) {
        (false, false) => {
            let old = load_path(old_path)?;
            let new = load_path(new_path)?;
            Ok(diff(&old, &new, options))
        }
        (true, true) => diff_directories(old_path, new_path, options),
        _ => Err(LoadError::MixedRoots {
            old_path: old_path.to_path_buf(),
            new_path: new_path.to_path_buf(),
        }
        .into()),
    }
}

fn diff_directories(
    old_root: &FsPath,
    new_root: &FsPath,
    options: &DiffOptions,
) -> Result<Vec<DiffEntry>> {
    let old_files = collect_files(old_root)?;
    let new_files = collect_files(new_root)?;

    // Union of relative paths; BTreeMap keys are already sorted.
    let mut pairs: BTreeMap<&str, (Option<&PathBuf>, Option<&PathBuf>)> = BTreeMap::new();
    for (rel, path) in &old_files {
        pairs.entry(rel.as_str()).or_default().0 = Some(path);
    }
    for (rel, path) in &new_files {
        pairs.entry(rel.as_str()).or_default().1 = Some(path);
    }
    tracing::debug!(
        old = old_files.len(),
        new = new_files.len(),
        pairs = pairs.len(),
        "comparing directories"
    );

    // Per-pair comparisons share nothing; the filter runs once at the end
    // over the merged, re-rooted paths.
    let pair_options = options.without_path_filter();
    let jobs: Vec<(&str, Option<&PathBuf>, Option<&PathBuf>)> = pairs
        .into_iter()
        .map(|(rel, (old, new))| (rel, old, new))
        .collect();
    let per_pair: Vec<Vec<DiffEntry>> = jobs
        .into_par_iter()
        .map(|(rel, old, new)| diff_pair(rel, old, new, &pair_options))
        .collect::<Result<Vec<_>>>()?;

    let mut entries: Vec<DiffEntry> = per_pair.into_iter().flatten().collect();
    if let Some(filter) = options.path_filter() {
        entries.retain(|entry| entry.path().matches_filter(filter));
    }
    Ok(entries)
}

fn diff_pair(
    rel: &str,
    old: Option<&PathBuf>,
    new: Option<&PathBuf>,
    options: &DiffOptions,
) -> Result<Vec<DiffEntry>> {
    match (old, new) {
        (Some(old), Some(new)) => {
            let old_value = load_path(old)?;
            let new_value = load_path(new)?;
            let mut entries = diff(&old_value, &new_value, options);
            for entry in &mut entries {
                entry.re_root(rel);
            }
            Ok(entries)
        }
        (Some(old), None) => Ok(vec![DiffEntry::Removed {
            path: Path::root().child(rel),
            old_value: load_path(old)?,
        }]),
        (None, Some(new)) => Ok(vec![DiffEntry::Added {
            path: Path::root().child(rel),
            new_value: load_path(new)?,
        }]),
        (None, None) => Ok(Vec::new()),
    }
}

/// Enumerate loadable files under a root, keyed by relative path.
fn collect_files(root: &FsPath) -> Result<BTreeMap<String, PathBuf>> {
    let mut files = BTreeMap::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(walk_error)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if !is_loadable(&path) {
            tracing::debug!(path = %path.display(), "skipping unsupported file");
            continue;
        }
        let rel = path
            .strip_prefix(root)
            .unwrap_or(&path)
            .to_string_lossy()
            .into_owned();
        files.insert(rel, path);
    }
    Ok(files)
}

fn walk_error(err: walkdir::Error) -> crate::error::Error {
    let path = err
        .path()
        .map(FsPath::to_path_buf)
        .unwrap_or_default();
    match err.into_io_error() {
        Some(source) => LoadError::Io { path, source }.into(),
        None => LoadError::Parse {
            path,
            reason: "filesystem loop detected".into(),
        }
        .into(),
    }
}
