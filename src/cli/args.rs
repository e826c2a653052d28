//! CLI argument parsing

use crate::{AnalyzeOptions, ExtensionFilter, ListingDepth, SizeBasis};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub paths: Vec<String>,
    pub extensions: Vec<String>,
    pub depth: Option<u32>,
    pub recursive: bool,
    pub climb: bool,
    pub max_attempts: Option<u32>,
    pub basis: String,
    pub base_dir: Option<String>,
    pub request: Option<String>,
    pub text: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            extensions: Vec::new(),
            depth: None,
            recursive: false,
            climb: false,
            max_attempts: None,
            basis: "logical".to_string(),
            base_dir: None,
            request: None,
            text: false,
        }
    }
}

impl CliArgs {
    /// Map parsed flags onto analysis options
    pub fn to_options(&self) -> Result<AnalyzeOptions, String> {
        let basis: SizeBasis = self.basis.parse()?;

        let depth = match (self.depth, self.recursive) {
            (Some(_), true) => {
                return Err("--depth and --recursive cannot be combined".to_string());
            }
            (Some(n), false) => ListingDepth::Levels(n),
            (None, true) => ListingDepth::Unbounded,
            (None, false) => ListingDepth::Shallow,
        };

        let mut opts = AnalyzeOptions {
            depth,
            basis,
            climb_relative: self.climb,
            base_dir: self.base_dir.as_ref().map(PathBuf::from),
            ..AnalyzeOptions::default()
        };

        if !self.extensions.is_empty() {
            opts.extensions = Some(ExtensionFilter::new(self.extensions.iter().cloned()));
        }
        if let Some(max_attempts) = self.max_attempts {
            opts.max_attempts = max_attempts;
        }

        Ok(opts)
    }
}

/// Parse command line arguments (`args[0]` is the program name)
pub fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut cli_args = CliArgs::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--ext" => {
                i += 1;
                if i >= args.len() {
                    return Err("--ext requires a value".to_string());
                }
                for extension in args[i].split(',').filter(|e| !e.is_empty()) {
                    if !extension.starts_with('.') {
                        return Err(format!("Extension must start with '.': {extension}"));
                    }
                    cli_args.extensions.push(extension.to_string());
                }
            }
            "--depth" => {
                i += 1;
                if i >= args.len() {
                    return Err("--depth requires a value".to_string());
                }
                cli_args.depth = Some(
                    args[i]
                        .parse()
                        .map_err(|_| "--depth must be a number".to_string())?,
                );
            }
            "--recursive" | "-r" => {
                cli_args.recursive = true;
            }
            "--climb" => {
                cli_args.climb = true;
            }
            "--max-attempts" => {
                i += 1;
                if i >= args.len() {
                    return Err("--max-attempts requires a value".to_string());
                }
                cli_args.max_attempts = Some(
                    args[i]
                        .parse()
                        .map_err(|_| "--max-attempts must be a number".to_string())?,
                );
            }
            "--basis" => {
                i += 1;
                if i >= args.len() {
                    return Err("--basis requires a value".to_string());
                }
                cli_args.basis.clone_from(&args[i]);
            }
            "--base" => {
                i += 1;
                if i >= args.len() {
                    return Err("--base requires a directory".to_string());
                }
                cli_args.base_dir = Some(args[i].clone());
            }
            "--request" => {
                i += 1;
                if i >= args.len() {
                    return Err("--request requires a file path or '-'".to_string());
                }
                cli_args.request = Some(args[i].clone());
            }
            "--text" => {
                cli_args.text = true;
            }
            // Everything after `--` is a path, even if it looks like a flag
            "--" => {
                cli_args.paths.extend(args[i + 1..].iter().cloned());
                break;
            }
            arg if !arg.starts_with("--") => {
                cli_args.paths.push(arg.to_string());
            }
            _ => return Err(format!("Unknown option: {}", args[i])),
        }
        i += 1;
    }

    match (&cli_args.request, cli_args.paths.is_empty()) {
        (Some(_), false) => Err("PATH arguments cannot be combined with --request".to_string()),
        (None, true) => Err("Missing required argument: PATH".to_string()),
        _ => Ok(cli_args),
    }
}
