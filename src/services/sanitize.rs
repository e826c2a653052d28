//! Path sanitization: lexical normalization, traversal guard, absolute resolution

use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Rejection raised by the sanitizer before any filesystem access
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Any `..` segment is refused, even one that stays inside its root
    #[error("Path traversal detectado em ({path}): segmentos '..' não são permitidos")]
    Traversal { path: String },
}

/// A raw path string that passed the traversal guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// The string exactly as the caller supplied it
    pub original: String,
    /// Lexically normalized form (`.` and repeated separators collapsed)
    pub normalized: PathBuf,
    /// Absolute form, with symlinks resolved when the path exists
    pub absolute: PathBuf,
}

impl ResolvedPath {
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.absolute
    }

    #[must_use]
    pub fn absolute_str(&self) -> String {
        normalize_path(&self.absolute)
    }

    /// Final component of the absolute path, empty for roots
    #[must_use]
    pub fn name(&self) -> String {
        self.absolute
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Parent of the absolute path, empty for roots
    #[must_use]
    pub fn parent_str(&self) -> String {
        self.absolute.parent().map(normalize_path).unwrap_or_default()
    }
}

/// Sanitizer resolving relative inputs against a base directory
#[derive(Debug, Clone, Default)]
pub struct PathSanitizer {
    base_dir: Option<PathBuf>,
}

impl PathSanitizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative inputs against `base_dir` instead of the working directory
    #[must_use]
    pub fn with_base_dir<P: Into<PathBuf>>(mut self, base_dir: P) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Normalize `raw`, reject it if any segment is `..`, then make it absolute
    ///
    /// Malformed or empty input is not an error: it yields a path that
    /// classifies as not found downstream.
    pub fn sanitize(&self, raw: &str) -> Result<ResolvedPath, PathError> {
        let normalized = normalize_lexically(raw);

        if has_parent_segment(&normalized) {
            log::debug!("Rejected traversal attempt: {raw}");
            return Err(PathError::Traversal {
                path: raw.to_string(),
            });
        }

        let absolute = if normalized.as_os_str().is_empty() {
            PathBuf::new()
        } else {
            self.make_absolute(&normalized)
        };

        log::trace!("Sanitized {raw:?} -> {}", absolute.display());

        Ok(ResolvedPath {
            original: raw.to_string(),
            normalized,
            absolute,
        })
    }

    fn make_absolute(&self, normalized: &Path) -> PathBuf {
        let joined = match &self.base_dir {
            Some(base) if normalized.is_relative() => base.join(normalized),
            _ => normalized.to_path_buf(),
        };

        match fs::canonicalize(&joined) {
            Ok(canonical) => canonical,
            // Missing paths and broken links stay lexical
            Err(_) => std::path::absolute(&joined).unwrap_or(joined),
        }
    }
}

/// Sanitize against the current working directory
pub fn sanitize(raw: &str) -> Result<ResolvedPath, PathError> {
    PathSanitizer::new().sanitize(raw)
}

/// Collapse `.` components and redundant separators without touching the filesystem
#[must_use]
pub fn normalize_lexically(raw: &str) -> PathBuf {
    Path::new(raw).components().collect()
}

#[must_use]
pub fn has_parent_segment(path: &Path) -> bool {
    path.components()
        .any(|component| matches!(component, Component::ParentDir))
}

/// Normalize path for cross-platform reporting
/// On Windows: Convert backslashes to forward slashes for consistency
/// On Unix: Use path as-is (backslash is a valid filename character)
#[cfg(windows)]
#[must_use]
pub fn normalize_path(path: &Path) -> String {
    let path_str = path.to_string_lossy();
    if path_str.contains('\\') {
        path_str.replace('\\', "/")
    } else {
        path_str.into_owned()
    }
}

#[cfg(not(windows))]
#[must_use]
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
