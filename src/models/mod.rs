//! Data models for path reports, statistics and directory entries

use serde::{Serialize, Serializer};

/// Prefix of the sentinel entry substituted for unreadable directories
pub const INACCESSIBLE_PREFIX: &str = "Inacessível: ";

/// Classification of a filesystem path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    #[serde(rename = "arquivo")]
    File,
    #[serde(rename = "diretório")]
    Directory,
    #[serde(rename = "inexistente")]
    NotFound,
    #[serde(rename = "desconhecido")]
    Unknown,
}

impl EntityKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::File => "arquivo",
            EntityKind::Directory => "diretório",
            EntityKind::NotFound => "inexistente",
            EntityKind::Unknown => "desconhecido",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marker serialized as `"falha"` in every failure payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    #[serde(rename = "falha")]
    Failed,
}

/// Size and timestamps of an existing path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    #[serde(rename = "tamanho_em_kB")]
    pub size_kb: f64,
    #[serde(rename = "modificado_em")]
    pub modified_at: String,
    #[serde(rename = "criado_em")]
    pub created_at: String,
}

/// Degraded result when a path cannot be stat'ed (vanished or invalid)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsFailure {
    pub status: Status,
    #[serde(rename = "erro")]
    pub message: String,
}

impl StatsFailure {
    #[must_use]
    pub fn not_found(path: &str) -> Self {
        Self {
            status: Status::Failed,
            message: format!("{path} não encontrado"),
        }
    }

    #[must_use]
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            status: Status::Failed,
            message: message.into(),
        }
    }
}

/// Either collected statistics or the failure payload that replaces them
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatsOutcome {
    Collected(Stats),
    Failed(StatsFailure),
}

impl From<Result<Stats, StatsFailure>> for StatsOutcome {
    fn from(result: Result<Stats, StatsFailure>) -> Self {
        match result {
            Ok(stats) => StatsOutcome::Collected(stats),
            Err(failure) => StatsOutcome::Failed(failure),
        }
    }
}

/// One child in a directory listing
///
/// Shallow listings hold bare path strings, recursive listings hold nested
/// items. Unreadable directories are replaced by an `Inacessível: <path>`
/// sentinel string.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryEntry {
    Path(String),
    Item(ListedItem),
    Inaccessible(String),
}

impl DirectoryEntry {
    #[must_use]
    pub fn is_inaccessible(&self) -> bool {
        matches!(self, DirectoryEntry::Inaccessible(_))
    }

    /// Path of the entry, or of the unreadable directory for sentinels
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            DirectoryEntry::Path(path) | DirectoryEntry::Inaccessible(path) => path,
            DirectoryEntry::Item(item) => &item.path,
        }
    }
}

impl Serialize for DirectoryEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DirectoryEntry::Path(path) => serializer.serialize_str(path),
            DirectoryEntry::Item(item) => item.serialize(serializer),
            DirectoryEntry::Inaccessible(path) => {
                serializer.serialize_str(&format!("{INACCESSIBLE_PREFIX}{path}"))
            }
        }
    }
}

/// Nested entry produced by recursive listings
///
/// Files also carry their extension (empty when there is none) and size;
/// directories carry `subitens` instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListedItem {
    #[serde(rename = "tipo")]
    pub kind: EntityKind,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "caminho")]
    pub path: String,
    #[serde(rename = "extensao", skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(rename = "tamanho_em_kB", skip_serializing_if = "Option::is_none")]
    pub size_kb: Option<f64>,
    #[serde(rename = "subitens", skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DirectoryEntry>>,
}

/// Category of a per-path failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    #[serde(rename = "traversal")]
    Traversal,
    #[serde(rename = "nao_encontrado")]
    NotFound,
    #[serde(rename = "desconhecido")]
    Unknown,
    #[serde(rename = "argumento_invalido")]
    InvalidArgument,
}

/// Success payload for files and directories
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityInfo {
    #[serde(rename = "tipo")]
    pub kind: EntityKind,
    #[serde(rename = "diretorio_pai")]
    pub parent_dir: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "caminho_absoluto")]
    pub absolute_path: String,
    #[serde(rename = "estatisticas")]
    pub stats: StatsOutcome,
    #[serde(rename = "subitens", skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DirectoryEntry>>,
}

/// Error payload for a path that could not be analyzed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureInfo {
    pub status: Status,
    #[serde(rename = "erro")]
    pub message: String,
    #[serde(rename = "tipo_erro")]
    pub kind: ErrorKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportInfo {
    Entity(EntityInfo),
    Failure(FailureInfo),
}

/// Terminal output unit: one per input path
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    #[serde(rename = "caminhoEntrada")]
    pub input: String,
    #[serde(rename = "tentativas", skip_serializing_if = "Option::is_none")]
    pub climb_attempts: Option<u32>,
    pub infos: ReportInfo,
}

impl Report {
    #[must_use]
    pub fn failure(input: impl Into<String>, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            climb_attempts: None,
            infos: ReportInfo::Failure(FailureInfo {
                status: Status::Failed,
                message: message.into(),
                kind,
            }),
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self.infos, ReportInfo::Failure(_))
    }

    /// Entity kind for success reports
    #[must_use]
    pub fn kind(&self) -> Option<EntityKind> {
        match &self.infos {
            ReportInfo::Entity(info) => Some(info.kind),
            ReportInfo::Failure(_) => None,
        }
    }

    /// Error message for failure reports
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.infos {
            ReportInfo::Entity(_) => None,
            ReportInfo::Failure(info) => Some(&info.message),
        }
    }

    #[must_use]
    pub fn children(&self) -> Option<&[DirectoryEntry]> {
        match &self.infos {
            ReportInfo::Entity(info) => info.children.as_deref(),
            ReportInfo::Failure(_) => None,
        }
    }
}
