//! Directory listing with optional recursion and extension filtering

use crate::SizeBasis;
use crate::models::{DirectoryEntry, EntityKind, ListedItem};
use crate::services::classify::classify;
use crate::services::format::bytes_to_kb;
use crate::services::sanitize::normalize_path;
use crate::services::size;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

#[cfg(windows)]
use std::fs::OpenOptions;
#[cfg(windows)]
use std::mem::MaybeUninit;
#[cfg(windows)]
use std::os::windows::fs::OpenOptionsExt;
#[cfg(windows)]
use std::os::windows::io::AsRawHandle;
#[cfg(windows)]
use windows_sys::Win32::Foundation::HANDLE;
#[cfg(windows)]
use windows_sys::Win32::Storage::FileSystem::{
    BY_HANDLE_FILE_INFORMATION, FILE_FLAG_BACKUP_SEMANTICS, FILE_SHARE_DELETE, FILE_SHARE_READ,
    FILE_SHARE_WRITE, GetFileInformationByHandle,
};

/// How far a listing descends below the listed directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingDepth {
    /// Immediate children as bare path strings
    #[default]
    Shallow,
    /// Nested items, descending `n` levels below the immediate children
    Levels(u32),
    /// Nested items with no depth limit
    Unbounded,
}

impl ListingDepth {
    /// Remaining levels for a nested walk, `None` when the listing is shallow
    fn nested_budget(self) -> Option<Option<u32>> {
        match self {
            ListingDepth::Shallow | ListingDepth::Levels(0) => None,
            ListingDepth::Levels(n) => Some(Some(n)),
            ListingDepth::Unbounded => Some(None),
        }
    }

    #[must_use]
    pub fn is_recursive(self) -> bool {
        self.nested_budget().is_some()
    }
}

/// Case-sensitive allow-list of file extensions (each including the dot)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtensionFilter {
    extensions: HashSet<String>,
}

impl ExtensionFilter {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Whether the final extension of `path` (e.g. `.gz` for `a.tar.gz`) is allowed
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| {
            let suffix = format!(".{}", ext.to_string_lossy());
            self.extensions.contains(&suffix)
        })
    }
}

/// File identifier for cycle detection (device, inode)
#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy)]
pub struct FileId {
    dev: u64,
    ino: u64,
}

#[cfg(unix)]
fn file_id(path: &Path) -> Option<FileId> {
    let metadata = fs::metadata(path).ok()?;
    Some(FileId {
        dev: metadata.dev(),
        ino: metadata.ino(),
    })
}

#[cfg(windows)]
fn file_id(path: &Path) -> Option<FileId> {
    use std::io;

    let file = match OpenOptions::new()
        .read(true)
        .share_mode(FILE_SHARE_READ | FILE_SHARE_WRITE | FILE_SHARE_DELETE)
        .custom_flags(FILE_FLAG_BACKUP_SEMANTICS)
        .open(path)
    {
        Ok(f) => f,
        Err(err) => {
            log::warn!(
                "Failed to open handle for {} to determine file id: {err}",
                path.display()
            );
            return None;
        }
    };

    let handle = file.as_raw_handle() as HANDLE;
    let mut info = MaybeUninit::<BY_HANDLE_FILE_INFORMATION>::uninit();

    let status = unsafe { GetFileInformationByHandle(handle, info.as_mut_ptr()) };
    if status == 0 {
        let err = io::Error::last_os_error();
        log::warn!(
            "GetFileInformationByHandle failed for {}: {err}",
            path.display()
        );
        return None;
    }

    let info = unsafe { info.assume_init() };
    let ino = (u64::from(info.nFileIndexHigh) << 32) | u64::from(info.nFileIndexLow);
    let dev = u64::from(info.dwVolumeSerialNumber);

    Some(FileId { dev, ino })
}

#[cfg(not(any(unix, windows)))]
fn file_id(_path: &Path) -> Option<FileId> {
    None
}

/// Lists directory children, tolerating unreadable subdirectories
#[derive(Debug, Clone, Default)]
pub struct DirectoryLister {
    extensions: Option<ExtensionFilter>,
    depth: ListingDepth,
    basis: SizeBasis,
}

impl DirectoryLister {
    #[must_use]
    pub fn new(extensions: Option<ExtensionFilter>, depth: ListingDepth) -> Self {
        // An empty filter set means "no filter"
        let extensions = extensions.filter(|filter| !filter.is_empty());
        Self {
            extensions,
            depth,
            basis: SizeBasis::Logical,
        }
    }

    /// Size basis for the `tamanho_em_kB` of nested file items
    #[must_use]
    pub fn with_basis(mut self, basis: SizeBasis) -> Self {
        self.basis = basis;
        self
    }

    /// List `dir` in enumeration order
    ///
    /// An unreadable directory contributes a single `Inacessível` sentinel
    /// instead of its children.
    pub fn list<P: AsRef<Path>>(&self, dir: P) -> Vec<DirectoryEntry> {
        let dir = dir.as_ref();
        match self.depth.nested_budget() {
            None => self.list_shallow(dir),
            Some(budget) => {
                let mut ancestors = HashSet::new();
                if let Some(id) = file_id(dir) {
                    ancestors.insert(id);
                }
                self.list_nested(dir, budget, &mut ancestors)
            }
        }
    }

    fn list_shallow(&self, dir: &Path) -> Vec<DirectoryEntry> {
        let Some(children) = read_children(dir) else {
            return vec![DirectoryEntry::Inaccessible(normalize_path(dir))];
        };

        children
            .into_iter()
            .filter(|(path, kind)| self.retains_leaf(path, *kind))
            .map(|(path, _)| DirectoryEntry::Path(normalize_path(&path)))
            .collect()
    }

    fn list_nested(
        &self,
        dir: &Path,
        remaining: Option<u32>,
        ancestors: &mut HashSet<FileId>,
    ) -> Vec<DirectoryEntry> {
        let Some(children) = read_children(dir) else {
            return vec![DirectoryEntry::Inaccessible(normalize_path(dir))];
        };

        let mut entries = Vec::with_capacity(children.len());
        for (path, kind) in children {
            let grandchildren = if kind == EntityKind::Directory {
                self.descend(&path, remaining, ancestors)
            } else {
                None
            };

            let retained = match (&self.extensions, kind) {
                (None, _) => true,
                (Some(_), EntityKind::Directory) => {
                    grandchildren.as_ref().is_some_and(|items| !items.is_empty())
                }
                (Some(_), _) => self.retains_leaf(&path, kind),
            };
            if !retained {
                continue;
            }

            let (extension, size_kb) = if kind == EntityKind::File {
                (Some(extension_of(&path)), self.file_size_kb(&path))
            } else {
                (None, None)
            };

            entries.push(DirectoryEntry::Item(ListedItem {
                kind,
                name: path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                path: normalize_path(&path),
                extension,
                size_kb,
                children: grandchildren,
            }));
        }
        entries
    }

    fn descend(
        &self,
        path: &Path,
        remaining: Option<u32>,
        ancestors: &mut HashSet<FileId>,
    ) -> Option<Vec<DirectoryEntry>> {
        let next = match remaining {
            Some(0) => return None,
            Some(n) => Some(n - 1),
            None => None,
        };

        let id = file_id(path);
        if let Some(id) = id {
            if !ancestors.insert(id) {
                log::warn!("Symlink cycle at {}; not descending", path.display());
                return None;
            }
        }

        let children = self.list_nested(path, next, ancestors);

        if let Some(id) = id {
            ancestors.remove(&id);
        }
        Some(children)
    }

    fn file_size_kb(&self, path: &Path) -> Option<f64> {
        match fs::metadata(path) {
            Ok(metadata) => Some(bytes_to_kb(size::size_for(path, &metadata, self.basis))),
            Err(err) => {
                log::warn!("Cannot size {}: {err}", path.display());
                None
            }
        }
    }

    /// Filter rule for non-directory entries and for every shallow entry
    fn retains_leaf(&self, path: &Path, kind: EntityKind) -> bool {
        match &self.extensions {
            None => true,
            Some(filter) => kind == EntityKind::File && filter.matches(path),
        }
    }
}

/// Final extension including the dot, empty when there is none
fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Read and classify the children of `dir`, `None` if it cannot be read
fn read_children(dir: &Path) -> Option<Vec<(std::path::PathBuf, EntityKind)>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            log::warn!("Cannot list {}: {err}", dir.display());
            return None;
        }
    };

    let mut children = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("Skipping unreadable entry in {}: {err}", dir.display());
                continue;
            }
        };
        let path = entry.path();
        let kind = classify(&path);
        log::trace!("Listed {} ({kind})", path.display());
        children.push((path, kind));
    }
    Some(children)
}
