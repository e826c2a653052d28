//! Output formatting for CLI

use crate::Result;
use crate::models::{DirectoryEntry, Report, ReportInfo, StatsOutcome};
use crate::services::report::to_json_with_indent;
use std::fmt::Write;

/// Format reports as JSON
pub fn format_json(reports: &[Report], indent: usize) -> Result<String> {
    to_json_with_indent(reports, indent)
}

/// Format reports as a human-readable summary
#[must_use]
pub fn format_text(reports: &[Report]) -> String {
    let mut out = String::new();

    for report in reports {
        let _ = writeln!(out, "{}", report.input);
        match &report.infos {
            ReportInfo::Failure(failure) => {
                let _ = writeln!(out, "  erro: {}", failure.message);
            }
            ReportInfo::Entity(info) => {
                let _ = writeln!(out, "  tipo: {}", info.kind);
                let _ = writeln!(out, "  caminho: {}", info.absolute_path);
                if let Some(attempts) = report.climb_attempts {
                    let _ = writeln!(out, "  tentativas: {attempts}");
                }
                match &info.stats {
                    StatsOutcome::Collected(stats) => {
                        let _ = writeln!(out, "  tamanho: {:.2} kB", stats.size_kb);
                        let _ = writeln!(out, "  modificado em: {}", stats.modified_at);
                        let _ = writeln!(out, "  criado em: {}", stats.created_at);
                    }
                    StatsOutcome::Failed(failure) => {
                        let _ = writeln!(out, "  estatísticas: {}", failure.message);
                    }
                }
                if let Some(children) = &info.children {
                    let _ = writeln!(out, "  subitens: {}", children.len());
                    write_entries(&mut out, children, 2);
                }
            }
        }
        out.push('\n');
    }

    out
}

fn write_entries(out: &mut String, entries: &[DirectoryEntry], indent_level: usize) {
    let indent = "  ".repeat(indent_level);
    for entry in entries {
        match entry {
            DirectoryEntry::Path(path) => {
                let _ = writeln!(out, "{indent}{path}");
            }
            DirectoryEntry::Inaccessible(path) => {
                let _ = writeln!(out, "{indent}{}{path}", crate::models::INACCESSIBLE_PREFIX);
            }
            DirectoryEntry::Item(item) => {
                match item.size_kb {
                    Some(size_kb) => {
                        let _ = writeln!(
                            out,
                            "{indent}{} [{}] {size_kb:.2} kB",
                            item.name, item.kind
                        );
                    }
                    None => {
                        let _ = writeln!(out, "{indent}{} [{}]", item.name, item.kind);
                    }
                }
                if let Some(children) = &item.children {
                    write_entries(out, children, indent_level + 1);
                }
            }
        }
    }
}
