//! Literal-marker text splicing for generated source files.
//!
//! Markers are plain substrings, never patterns, and the first occurrence is
//! the one acted upon. The in-memory primitives never touch disk; [`Splicer`]
//! wraps them in a full read, transform, full write cycle.

use std::path::Path;
use tracing::{debug, warn};

use crate::config::SpliceConfig;
use crate::error::{SpliceError, SpliceResult};
use crate::utils::fs::{read_file_to_string, write_file};

/// Insert `payload` right after the first occurrence of `marker`
pub fn insert_after(content: &str, marker: &str, payload: &str) -> SpliceResult<String> {
    let idx = content
        .find(marker)
        .ok_or_else(|| SpliceError::marker_not_found(marker))?;
    let split = idx + marker.len();

    let mut out = String::with_capacity(content.len() + payload.len());
    out.push_str(&content[..split]);
    out.push_str(payload);
    out.push_str(&content[split..]);
    Ok(out)
}

/// Strip `prefix` from every line of the first occurrence of `marker`.
///
/// Returns `None` when `marker` does not occur. Each de-commented line gets
/// exactly one trailing `'\n'`, so a marker ending without a newline grows one
/// and a marker ending with one gains an extra blank line.
pub fn uncomment(content: &str, marker: &str, prefix: &str) -> Option<String> {
    let idx = content.find(marker)?;

    let mut out = String::with_capacity(content.len() + marker.len());
    out.push_str(&content[..idx]);
    for line in marker.split('\n') {
        out.push_str(line.strip_prefix(prefix).unwrap_or(line));
        out.push('\n');
    }
    out.push_str(&content[idx + marker.len()..]);
    Some(out)
}

/// Replace every occurrence of `target`, failing if there is none
pub fn ensure_exist_and_replace(
    content: &str,
    target: &str,
    replacement: &str,
) -> SpliceResult<String> {
    if !content.contains(target) {
        return Err(SpliceError::marker_not_found(target));
    }
    Ok(content.replace(target, replacement))
}

/// One guarded substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub target: String,
    pub replacement: String,
}

impl Replacement {
    pub fn new(target: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            replacement: replacement.into(),
        }
    }
}

/// Apply guarded substitutions in order, stopping at the first missing target
pub fn apply_replacements(content: &str, replacements: &[Replacement]) -> SpliceResult<String> {
    replacements.iter().try_fold(content.to_string(), |acc, r| {
        ensure_exist_and_replace(&acc, &r.target, &r.replacement)
    })
}

/// File-level splicing with a fixed write policy
#[derive(Debug, Clone, Default)]
pub struct Splicer {
    config: SpliceConfig,
}

impl Splicer {
    pub fn new(config: SpliceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SpliceConfig {
        &self.config
    }

    /// Insert `code` after the first occurrence of `target` in the file
    pub fn insert_code(&self, path: impl AsRef<Path>, target: &str, code: &str) -> SpliceResult<()> {
        let path = path.as_ref();
        debug!(
            "Inserting {} bytes after marker in {}",
            code.len(),
            path.display()
        );

        let content = read_file_to_string(path)?;
        let out = insert_after(&content, target, code).map_err(|e| {
            warn!("Insert marker not found in {}", path.display());
            e.in_file(path)
        })?;
        write_file(path, &out, &self.config)
    }

    /// Remove the comment `prefix` from each line of `target` in the file.
    /// A missing `target` leaves the file untouched and is not an error.
    pub fn uncomment_code(
        &self,
        path: impl AsRef<Path>,
        target: &str,
        prefix: &str,
    ) -> SpliceResult<()> {
        let path = path.as_ref();
        let content = read_file_to_string(path)?;

        match uncomment(&content, target, prefix) {
            Some(out) => {
                debug!(
                    "Uncommenting {} lines in {}",
                    target.split('\n').count(),
                    path.display()
                );
                write_file(path, &out, &self.config)
            }
            None => {
                debug!("Uncomment target not present in {}, skipping", path.display());
                Ok(())
            }
        }
    }

    /// Read once, apply every replacement, write once
    pub fn replace_in_file(
        &self,
        path: impl AsRef<Path>,
        replacements: &[Replacement],
    ) -> SpliceResult<()> {
        let path = path.as_ref();
        debug!(
            "Applying {} replacements to {}",
            replacements.len(),
            path.display()
        );

        let content = read_file_to_string(path)?;
        let out = apply_replacements(&content, replacements).map_err(|e| {
            warn!("Replacement target missing in {}: {}", path.display(), e);
            e.in_file(path)
        })?;
        write_file(path, &out, &self.config)
    }
}

/// [`Splicer::insert_code`] with the default config
pub fn insert_code(path: impl AsRef<Path>, target: &str, code: &str) -> SpliceResult<()> {
    Splicer::default().insert_code(path, target, code)
}

/// [`Splicer::uncomment_code`] with the default config
pub fn uncomment_code(path: impl AsRef<Path>, target: &str, prefix: &str) -> SpliceResult<()> {
    Splicer::default().uncomment_code(path, target, prefix)
}
