//! "Climb `../` until found" resolution for relative inputs
//!
//! An input such as `../Downloads/Chrome/` that does not exist from the base
//! directory is retried with one more `../` prefix per attempt, up to a fixed
//! bound. The first candidate that exists wins. This is a heuristic: it can
//! land on an unrelated directory with the same relative layout.

use crate::DEFAULT_MAX_ATTEMPTS;
use crate::services::sanitize::{has_parent_segment, normalize_lexically};
use std::fs;
use std::path::{Path, PathBuf};

const UPWARD_PREFIX: &str = "../";

/// Outcome of a successful climb
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeResolution {
    /// Candidate string that matched, e.g. `../../../Downloads/Chrome/`
    pub candidate: String,
    /// Canonical absolute path of the match
    pub absolute: PathBuf,
    /// Number of extra `../` prefixes added (0 if the input existed as is)
    pub attempts: u32,
}

#[derive(Debug, Clone)]
pub struct RelativePathResolver {
    max_attempts: u32,
    base_dir: Option<PathBuf>,
}

impl Default for RelativePathResolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl RelativePathResolver {
    #[must_use]
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_dir: None,
        }
    }

    #[must_use]
    pub fn with_base_dir<P: Into<PathBuf>>(mut self, base_dir: P) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Whether `raw` is eligible for the climb
    ///
    /// Only a leading run of `../` is allowed; a `..` anywhere after it makes
    /// the input ineligible, so it falls through to the traversal guard.
    #[must_use]
    pub fn applies_to(raw: &str) -> bool {
        if !raw.starts_with(UPWARD_PREFIX) {
            return false;
        }
        !has_parent_segment(&normalize_lexically(strip_upward(raw)))
    }

    /// Resolve `raw`, returning `None` when no candidate exists within the bound
    #[must_use]
    pub fn resolve(&self, raw: &str) -> Option<RelativeResolution> {
        if !Self::applies_to(raw) {
            return None;
        }

        let mut candidate = raw.to_string();
        let mut attempts = 0;
        loop {
            let joined = self.join(&candidate);
            if fs::metadata(&joined).is_ok() {
                let absolute = fs::canonicalize(&joined).unwrap_or(joined);
                log::debug!(
                    "Resolved {raw} as {} after {attempts} extra prefix(es)",
                    absolute.display()
                );
                return Some(RelativeResolution {
                    candidate,
                    absolute,
                    attempts,
                });
            }

            if attempts >= self.max_attempts {
                log::debug!("Gave up resolving {raw} after {attempts} attempts");
                return None;
            }

            attempts += 1;
            candidate.insert_str(0, UPWARD_PREFIX);
        }
    }

    fn join(&self, candidate: &str) -> PathBuf {
        match &self.base_dir {
            Some(base) => base.join(candidate),
            None => Path::new(candidate).to_path_buf(),
        }
    }
}

/// Remainder of `raw` after its leading run of `../` prefixes
fn strip_upward(raw: &str) -> &str {
    let mut rest = raw;
    while let Some(tail) = rest.strip_prefix(UPWARD_PREFIX) {
        rest = tail;
    }
    rest
}
