//! Path Inspection Library
//!
//! This library inspects user-supplied path strings: it rejects traversal
//! attempts, classifies each path as file, directory, missing or special,
//! collects size and timestamp metadata, lists directory contents with an
//! optional extension filter, and renders everything as JSON reports.

pub mod cli;
pub mod models;
pub mod services;

pub use models::{DirectoryEntry, EntityKind, ListedItem, Report, ReportInfo, Stats, StatsFailure};
pub use services::listing::{ExtensionFilter, ListingDepth};
pub use services::report::PathAnalyzer;

use std::path::PathBuf;
use std::result;
use thiserror::Error;

/// Custom error type for the library
///
/// Per-path failures never surface here; they become fields of a [`Report`].
/// Only call-shape problems (unreadable request, malformed JSON) do.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidJson(err.to_string())
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Default number of extra `../` prefixes tried for unresolved relative paths
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Options for analyzing a batch of paths
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub extensions: Option<ExtensionFilter>,
    pub depth: ListingDepth,
    pub basis: SizeBasis,
    pub climb_relative: bool,
    pub max_attempts: u32,
    pub base_dir: Option<PathBuf>,
    pub json_indent: usize,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            extensions: None,
            depth: ListingDepth::Shallow,
            basis: SizeBasis::Logical,
            climb_relative: false,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_dir: None,
            json_indent: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeBasis {
    #[default]
    Logical,
    Physical,
}

impl std::str::FromStr for SizeBasis {
    type Err = String;

    fn from_str(s: &str) -> result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "logical" => Ok(SizeBasis::Logical),
            "physical" => Ok(SizeBasis::Physical),
            _ => Err(format!("Invalid basis: {s}. Use 'physical' or 'logical'")),
        }
    }
}

/// Analyze a batch of paths and return one report per input, in input order
///
/// # Arguments
/// * `paths` - Raw path strings as supplied by the caller
/// * `opts` - Analysis options
pub fn analyze_paths<S: AsRef<str>>(paths: &[S], opts: &AnalyzeOptions) -> Vec<Report> {
    PathAnalyzer::new(opts.clone()).process(paths)
}

/// Analyze a JSON batch request (`{"caminhos": [...], "extensoes": [...]}`)
/// and return the JSON-encoded reports
///
/// Invalid extension arguments produce a JSON validation object instead of
/// reports; malformed JSON is returned as an error.
pub fn analyze_request(json: &str, opts: &AnalyzeOptions) -> Result<String> {
    let request = match services::request::AnalysisRequest::parse(json) {
        Ok(request) => request,
        Err(Error::InvalidArgument(message)) => {
            log::debug!("Rejected request before filesystem access: {message}");
            return services::request::validation_failure_json(&message, opts.json_indent);
        }
        Err(err) => return Err(err),
    };

    let mut opts = opts.clone();
    if request.extensions.is_some() {
        opts.extensions = request.extensions.clone();
    }

    let analyzer = PathAnalyzer::new(opts);
    let reports = analyzer.process_request(&request);
    analyzer.to_json(&reports)
}
