//! Size computation (logical and physical) with platform-specific implementations

use crate::SizeBasis;
use std::fs::Metadata;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

/// Compute logical size from metadata
#[must_use]
pub fn logical_size(metadata: &Metadata) -> u64 {
    metadata.len()
}

/// Compute physical size from metadata (Unix platform)
/// Uses the number of 512-byte blocks allocated to the file
#[cfg(unix)]
#[must_use]
pub fn physical_size_from_metadata(metadata: &Metadata) -> u64 {
    metadata.blocks() * 512
}

/// Compute physical size from path (Windows platform)
/// Uses GetCompressedFileSizeW to get actual disk usage
#[cfg(windows)]
pub fn physical_size_from_path(path: &Path) -> std::io::Result<u64> {
    use std::os::windows::ffi::OsStrExt;
    use windows_sys::Win32::Storage::FileSystem::GetCompressedFileSizeW;

    const INVALID_FILE_SIZE: u32 = 0xFFFF_FFFF;

    let wide: Vec<u16> = path
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();

    let mut high: u32 = 0;
    let low = unsafe { GetCompressedFileSizeW(wide.as_ptr(), &mut high) };

    if low == INVALID_FILE_SIZE {
        let metadata = std::fs::metadata(path)?;
        Ok(metadata.len())
    } else {
        Ok(u64::from(high) << 32 | u64::from(low))
    }
}

/// Compute physical size (non-Unix, non-Windows fallback)
#[cfg(not(any(unix, windows)))]
#[must_use]
pub fn physical_size_from_metadata(metadata: &Metadata) -> u64 {
    logical_size(metadata)
}

/// Size in bytes for the configured basis
#[must_use]
pub fn size_for(path: &Path, metadata: &Metadata, basis: SizeBasis) -> u64 {
    match basis {
        SizeBasis::Logical => {
            let size = logical_size(metadata);
            log::trace!("Logical size for {}: {size}", path.display());
            size
        }
        SizeBasis::Physical => {
            #[cfg(windows)]
            {
                physical_size_from_path(path).unwrap_or_else(|err| {
                    log::warn!(
                        "Failed to get physical size for {}: {err}, falling back to logical size",
                        path.display()
                    );
                    metadata.len()
                })
            }
            #[cfg(not(windows))]
            {
                let size = physical_size_from_metadata(metadata);
                log::trace!("Physical size for {}: {size}", path.display());
                size
            }
        }
    }
}
