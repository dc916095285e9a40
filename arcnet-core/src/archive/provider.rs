//! Archive construction from configuration.

use std::path::PathBuf;
use std::sync::Arc;

#[cfg(feature = "network")]
use super::{NoaaArchive, NoaaArchiveConfig};
use super::{DirectoryArchive, MockArchive, SrsArchive};
#[cfg(not(feature = "network"))]
use crate::error::ArcnetError;
use crate::error::Result;

/// Configuration for creating SRS archives.
#[derive(Debug, Clone, Default)]
pub enum ArchiveConfig {
    /// NOAA/NCEI archive over HTTPS
    #[cfg(feature = "network")]
    Noaa(NoaaArchiveConfig),

    /// Local directory of `YYYYMMDDSRS.txt` files
    Directory(PathBuf),

    /// In-memory reports (testing only)
    Mock(MockArchive),

    /// NOAA when networking is available
    #[default]
    Auto,
}

/// Factory for creating SRS archives.
pub struct ArchiveFactory;

impl ArchiveFactory {
    /// Create an archive from configuration.
    pub fn create(config: ArchiveConfig) -> Result<Arc<dyn SrsArchive>> {
        match config {
            #[cfg(feature = "network")]
            ArchiveConfig::Noaa(noaa_config) => {
                let archive = NoaaArchive::with_config(noaa_config)?;
                Ok(Arc::new(archive))
            }
            ArchiveConfig::Directory(root) => {
                tracing::info!(root = %root.display(), "Using local SRS directory");
                Ok(Arc::new(DirectoryArchive::new(root)))
            }
            ArchiveConfig::Mock(archive) => Ok(Arc::new(archive)),
            ArchiveConfig::Auto => Self::create_auto(),
        }
    }

    #[cfg(feature = "network")]
    fn create_auto() -> Result<Arc<dyn SrsArchive>> {
        tracing::info!("Auto-selected NOAA SRS archive");
        Self::create(ArchiveConfig::Noaa(NoaaArchiveConfig::default()))
    }

    #[cfg(not(feature = "network"))]
    fn create_auto() -> Result<Arc<dyn SrsArchive>> {
        Err(ArcnetError::ArchiveError(
            "No remote archive available without the `network` feature; configure a directory"
                .into(),
        ))
    }
}
