//! Merges per-mode source files into one flat command mapping.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

/// A key that appeared in more than one source. The earlier value is
/// overwritten; `source` names the mapping that won.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCollision {
    pub key: String,
    pub source: String,
}

/// A source file dropped from the combine pass, with the reason. The rest of
/// the pass continues without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSource {
    pub source: String,
    pub reason: String,
}

/// Outcome of a combine pass: the merged mapping plus the figures the caller
/// reports separately. `keys_read` counts every key seen, including ones a
/// later source overwrote, so `keys_read - merged.len()` equals the number
/// of collisions.
#[derive(Debug, Clone, Default)]
pub struct CombineReport {
    pub merged: Map<String, Value>,
    pub keys_read: usize,
    pub collisions: Vec<KeyCollision>,
    pub skipped_sources: Vec<SkippedSource>,
}

#[derive(Debug)]
pub enum CombineError {
    SourceDirMissing(PathBuf),
    NoEligibleFiles(PathBuf),
    ListDir(PathBuf, std::io::Error),
}

impl fmt::Display for CombineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceDirMissing(dir) => {
                write!(f, "source directory not found: {}", dir.display())
            }
            Self::NoEligibleFiles(dir) => {
                write!(f, "no .json source files in {}", dir.display())
            }
            Self::ListDir(dir, err) => {
                write!(f, "failed to list {}: {err}", dir.display())
            }
        }
    }
}

impl std::error::Error for CombineError {}

/// Merge an ordered sequence of `(label, mapping)` pairs left to right.
/// Last write wins; each overwrite is recorded with the winning label.
pub fn combine_mappings(sources: &[(String, Map<String, Value>)]) -> CombineReport {
    let mut report = CombineReport::default();
    for (label, mapping) in sources {
        for (key, value) in mapping {
            report.keys_read += 1;
            if report.merged.insert(key.clone(), value.clone()).is_some() {
                report.collisions.push(KeyCollision {
                    key: key.clone(),
                    source: label.clone(),
                });
            }
        }
    }
    report
}

/// Combine every `*.json` file directly under `dir`, in lexicographic
/// filename order. A file that fails to read or parse is recorded in
/// `skipped_sources` and the pass continues; a missing directory or an empty
/// eligible set aborts the pass.
pub fn combine_source_dir(dir: &Path) -> Result<CombineReport, CombineError> {
    if !dir.is_dir() {
        return Err(CombineError::SourceDirMissing(dir.to_path_buf()));
    }

    let entries =
        fs::read_dir(dir).map_err(|err| CombineError::ListDir(dir.to_path_buf(), err))?;
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| CombineError::ListDir(dir.to_path_buf(), err))?;
        let path = entry.path();
        if path.is_file() && path.extension().map_or(false, |e| e == "json") {
            paths.push(path);
        }
    }
    if paths.is_empty() {
        return Err(CombineError::NoEligibleFiles(dir.to_path_buf()));
    }
    paths.sort();

    let mut sources: Vec<(String, Map<String, Value>)> = Vec::new();
    let mut skipped: Vec<SkippedSource> = Vec::new();
    for path in &paths {
        let label = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                skipped.push(SkippedSource {
                    source: label,
                    reason: format!("read failed: {err}"),
                });
                continue;
            }
        };
        match serde_json::from_str::<Map<String, Value>>(&raw) {
            Ok(mapping) => sources.push((label, mapping)),
            Err(err) => skipped.push(SkippedSource {
                source: label,
                reason: format!("invalid JSON: {err}"),
            }),
        }
    }

    let mut report = combine_mappings(&sources);
    report.skipped_sources = skipped;
    Ok(report)
}
