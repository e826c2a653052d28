//! Report assembly: runs the per-path pipeline and renders the batch as JSON
//!
//! For each input: sanitize (or climb, for eligible relative inputs),
//! classify, collect statistics, and list directories. Every failure is
//! folded into the report for that input, so a batch of N paths always
//! yields N reports in input order.

use crate::models::{EntityInfo, EntityKind, ErrorKind, Report, ReportInfo};
use crate::services::classify::{classify, describe_special};
use crate::services::listing::DirectoryLister;
use crate::services::relative::RelativePathResolver;
use crate::services::request::{AnalysisRequest, PathInput};
use crate::services::sanitize::{PathSanitizer, ResolvedPath};
use crate::services::stats::StatsCollector;
use crate::{AnalyzeOptions, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Stateless analyzer; each call to [`PathAnalyzer::process`] reads the
/// filesystem afresh and holds nothing open between calls.
#[derive(Debug, Clone)]
pub struct PathAnalyzer {
    options: AnalyzeOptions,
    sanitizer: PathSanitizer,
    resolver: RelativePathResolver,
    stats: StatsCollector,
    lister: DirectoryLister,
}

impl Default for PathAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzeOptions::default())
    }
}

impl PathAnalyzer {
    #[must_use]
    pub fn new(options: AnalyzeOptions) -> Self {
        let mut sanitizer = PathSanitizer::new();
        let mut resolver = RelativePathResolver::new(options.max_attempts);
        if let Some(base) = &options.base_dir {
            sanitizer = sanitizer.with_base_dir(base.clone());
            resolver = resolver.with_base_dir(base.clone());
        }

        Self {
            sanitizer,
            resolver,
            stats: StatsCollector::new(options.basis),
            lister: DirectoryLister::new(options.extensions.clone(), options.depth)
                .with_basis(options.basis),
            options,
        }
    }

    #[must_use]
    pub fn options(&self) -> &AnalyzeOptions {
        &self.options
    }

    /// Analyze every path independently, preserving input order
    pub fn process<S: AsRef<str>>(&self, paths: &[S]) -> Vec<Report> {
        paths.iter().map(|raw| self.analyze(raw.as_ref())).collect()
    }

    /// Analyze a validated batch request, one report per entry
    #[must_use]
    pub fn process_request(&self, request: &AnalysisRequest) -> Vec<Report> {
        request
            .paths
            .iter()
            .map(|input| match input {
                PathInput::Path(raw) => self.analyze(raw),
                PathInput::Invalid { shown, type_name } => Report::failure(
                    shown.clone(),
                    ErrorKind::InvalidArgument,
                    format!("O valor '{shown}' (tipo: {type_name}) é inválido."),
                ),
            })
            .collect()
    }

    /// Analyze a single raw path string
    #[must_use]
    pub fn analyze(&self, raw: &str) -> Report {
        if self.options.climb_relative && RelativePathResolver::applies_to(raw) {
            return self.analyze_relative(raw);
        }

        match self.sanitizer.sanitize(raw) {
            Ok(resolved) => self.report_for(resolved, None),
            Err(err) => Report::failure(raw, ErrorKind::Traversal, err.to_string()),
        }
    }

    fn analyze_relative(&self, raw: &str) -> Report {
        match self.resolver.resolve(raw) {
            Some(resolution) => {
                let resolved = ResolvedPath {
                    original: raw.to_string(),
                    normalized: resolution.absolute.clone(),
                    absolute: resolution.absolute,
                };
                self.report_for(resolved, Some(resolution.attempts))
            }
            None => not_found(raw),
        }
    }

    fn report_for(&self, resolved: ResolvedPath, climb_attempts: Option<u32>) -> Report {
        let kind = classify(resolved.as_path());
        log::debug!("{} classified as {kind}", resolved.original);

        let mut report = match kind {
            EntityKind::NotFound => not_found(&resolved.original),
            EntityKind::Unknown => Report::failure(
                resolved.original.clone(),
                ErrorKind::Unknown,
                format!(
                    "O caminho ({}) não é arquivo nem diretório: {}",
                    resolved.original,
                    describe_special(resolved.as_path())
                ),
            ),
            EntityKind::File | EntityKind::Directory => {
                let children = (kind == EntityKind::Directory)
                    .then(|| self.lister.list(resolved.as_path()));
                Report {
                    input: resolved.original.clone(),
                    climb_attempts: None,
                    infos: ReportInfo::Entity(EntityInfo {
                        kind,
                        parent_dir: resolved.parent_str(),
                        name: resolved.name(),
                        absolute_path: resolved.absolute_str(),
                        stats: self.stats.collect(resolved.as_path()).into(),
                        children,
                    }),
                }
            }
        };

        report.climb_attempts = climb_attempts;
        report
    }

    /// Serialize reports as pretty-printed JSON with non-ASCII kept literal
    pub fn to_json(&self, reports: &[Report]) -> Result<String> {
        to_json_with_indent(reports, self.options.json_indent)
    }
}

fn not_found(raw: &str) -> Report {
    Report::failure(
        raw,
        ErrorKind::NotFound,
        format!("O caminho ({raw}) especificado não existe"),
    )
}

/// Pretty-print any serializable value with the given indent width
pub fn to_json_with_indent<T: Serialize + ?Sized>(value: &T, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buffer).map_err(|err| crate::Error::InvalidInput(err.to_string()))
}
