//! JSON batch requests: `{"caminhos": [...], "extensoes": [...]}`
//!
//! Argument types are validated here, before any filesystem access.

use crate::models::{ErrorKind, FailureInfo, Status};
use crate::services::listing::ExtensionFilter;
use crate::services::report::to_json_with_indent;
use crate::{Error, Result};
use serde_json::Value;

const PATHS_KEY: &str = "caminhos";
const PATHS_ALIAS: &str = "jsonEntrada";
const EXTENSIONS_KEY: &str = "extensoes";

/// One position of the request's path list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathInput {
    Path(String),
    /// A non-string value; still gets its own report
    Invalid { shown: String, type_name: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub paths: Vec<PathInput>,
    pub extensions: Option<ExtensionFilter>,
}

impl AnalysisRequest {
    /// Parse and validate a request document
    ///
    /// Malformed JSON and a missing path list are call-shape errors
    /// (`InvalidJson` / `InvalidInput`); bad extension arguments are
    /// `InvalidArgument`.
    pub fn parse(json: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(json)?;
        let Value::Object(fields) = document else {
            return Err(Error::InvalidInput(
                "A requisição deve ser um objeto JSON.".to_string(),
            ));
        };

        let paths = match fields.get(PATHS_KEY).or_else(|| fields.get(PATHS_ALIAS)) {
            Some(Value::Array(items)) => items.iter().map(path_input).collect(),
            _ => {
                return Err(Error::InvalidInput(format!(
                    "'{PATHS_KEY}' deve ser uma lista de strings representando caminhos."
                )));
            }
        };

        let extensions = match fields.get(EXTENSIONS_KEY) {
            None | Some(Value::Null) => None,
            Some(value) => Some(parse_extensions(value)?),
        };

        Ok(Self { paths, extensions })
    }
}

fn path_input(value: &Value) -> PathInput {
    match value {
        Value::String(raw) => PathInput::Path(raw.clone()),
        other => PathInput::Invalid {
            shown: other.to_string(),
            type_name: json_type_name(other),
        },
    }
}

fn parse_extensions(value: &Value) -> Result<ExtensionFilter> {
    let Value::Array(items) = value else {
        return Err(Error::InvalidArgument(format!(
            "'{EXTENSIONS_KEY}' deve ser uma lista de strings representando extensões."
        )));
    };

    let mut extensions = Vec::with_capacity(items.len());
    for item in items {
        let Value::String(extension) = item else {
            return Err(Error::InvalidArgument(format!(
                "Todos os itens em '{EXTENSIONS_KEY}' devem ser do tipo string."
            )));
        };
        if !extension.starts_with('.') {
            return Err(Error::InvalidArgument(format!(
                "A extensão '{extension}' deve começar com '.'."
            )));
        }
        extensions.push(extension.clone());
    }
    Ok(ExtensionFilter::new(extensions))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// JSON object returned instead of reports when arguments fail validation
pub fn validation_failure_json(message: &str, indent: usize) -> Result<String> {
    let failure = FailureInfo {
        status: Status::Failed,
        message: message.to_string(),
        kind: ErrorKind::InvalidArgument,
    };
    to_json_with_indent(&failure, indent)
}
