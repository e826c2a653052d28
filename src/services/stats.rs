//! Statistics collection: size in kB plus creation and modification times

use crate::SizeBasis;
use crate::models::{Stats, StatsFailure};
use crate::services::format::{bytes_to_kb, format_timestamp, local_offset};
use crate::services::sanitize::normalize_path;
use crate::services::size;
use std::fs;
use std::path::Path;
use std::time::SystemTime;
use time::UtcOffset;

#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

/// Collects [`Stats`] for existing paths
///
/// Holds no handles; the timezone offset is captured once at construction so
/// repeated collections format identically.
#[derive(Debug, Clone, Copy)]
pub struct StatsCollector {
    basis: SizeBasis,
    offset: UtcOffset,
}

impl Default for StatsCollector {
    fn default() -> Self {
        Self::new(SizeBasis::Logical)
    }
}

impl StatsCollector {
    #[must_use]
    pub fn new(basis: SizeBasis) -> Self {
        Self {
            basis,
            offset: local_offset(),
        }
    }

    #[must_use]
    pub fn with_offset(basis: SizeBasis, offset: UtcOffset) -> Self {
        Self { basis, offset }
    }

    /// Stat `path`; a vanished or invalid path degrades to a [`StatsFailure`]
    pub fn collect<P: AsRef<Path>>(&self, path: P) -> Result<Stats, StatsFailure> {
        let path = path.as_ref();
        let display = normalize_path(path);

        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(err) => {
                log::warn!("Stat failed for {display}: {err}");
                return Err(StatsFailure::not_found(&display));
            }
        };

        let size_bytes = size::size_for(path, &metadata, self.basis);
        let modified = metadata
            .modified()
            .map_err(|err| StatsFailure::with_message(format!("{display}: {err}")))?;
        let created = creation_time(&metadata).unwrap_or(modified);

        Ok(Stats {
            size_kb: bytes_to_kb(size_bytes),
            modified_at: self.format(modified, &display)?,
            created_at: self.format(created, &display)?,
        })
    }

    fn format(&self, time: SystemTime, display: &str) -> Result<String, StatsFailure> {
        format_timestamp(time, self.offset).map_err(|err| {
            StatsFailure::with_message(format!("{display}: falha ao formatar data ({err})"))
        })
    }
}

/// Birth time where the platform records it, else the inode change time
fn creation_time(metadata: &fs::Metadata) -> Option<SystemTime> {
    if let Ok(created) = metadata.created() {
        return Some(created);
    }

    #[cfg(unix)]
    {
        let secs = u64::try_from(metadata.ctime()).ok()?;
        let nanos = u32::try_from(metadata.ctime_nsec()).unwrap_or(0);
        SystemTime::UNIX_EPOCH.checked_add(std::time::Duration::new(secs, nanos))
    }

    #[cfg(not(unix))]
    {
        None
    }
}
