//! Entity classification for sanitized paths

use crate::models::EntityKind;
use std::fs;
use std::path::Path;

/// Classify a path, following symlinks
///
/// Paths that exist only as a dangling link, or whose target is neither a
/// regular file nor a directory, are `Unknown` rather than `NotFound`.
#[must_use]
pub fn classify<P: AsRef<Path>>(path: P) -> EntityKind {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return EntityKind::NotFound;
    }

    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => EntityKind::File,
        Ok(metadata) if metadata.is_dir() => EntityKind::Directory,
        Ok(_) => EntityKind::Unknown,
        Err(err) => {
            // The link itself may exist even when its target does not
            if fs::symlink_metadata(path).is_ok() {
                log::trace!("{} exists but cannot be followed: {err}", path.display());
                EntityKind::Unknown
            } else {
                EntityKind::NotFound
            }
        }
    }
}

/// Human-readable description of a special (non file, non directory) path
#[cfg(unix)]
#[must_use]
pub fn describe_special(path: &Path) -> &'static str {
    use rustix::fs::FileType;

    let Ok(stat) = rustix::fs::lstat(path) else {
        return "tipo indeterminado";
    };

    match FileType::from_raw_mode(stat.st_mode as _) {
        FileType::Socket => "socket",
        FileType::Fifo => "pipe nomeado (FIFO)",
        FileType::CharacterDevice => "dispositivo de caractere",
        FileType::BlockDevice => "dispositivo de bloco",
        FileType::Symlink => "link simbólico quebrado",
        _ => "tipo indeterminado",
    }
}

#[cfg(not(unix))]
#[must_use]
pub fn describe_special(path: &Path) -> &'static str {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_symlink() => "link simbólico quebrado",
        _ => "tipo indeterminado",
    }
}
