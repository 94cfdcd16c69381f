use crate::api::{ApiTable, StationApi, StationResponse};
use crate::errors::{AppError, AppResult};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Offline source: API responses previously saved to disk.
///
/// The station code is ignored; the files are assumed to belong to the
/// station being reported on.
#[derive(Debug, Clone, Default)]
pub struct FileApi {
    pub station_path: Option<PathBuf>,
    pub stats_path: Option<PathBuf>,
}

impl FileApi {
    pub fn new(station_path: Option<PathBuf>, stats_path: Option<PathBuf>) -> Self {
        Self {
            station_path,
            stats_path,
        }
    }

    fn read<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
        debug!(path = %path.display(), "reading saved API response");
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

impl StationApi for FileApi {
    fn station(&self, _code: &str) -> AppResult<StationResponse> {
        let path = self
            .station_path
            .as_deref()
            .ok_or_else(|| AppError::Config("no saved station response (--station-json)".into()))?;
        Self::read(path)
    }

    fn station_stats(&self, _code: &str) -> AppResult<ApiTable> {
        let path = self
            .stats_path
            .as_deref()
            .ok_or_else(|| AppError::Config("no saved statistics response (--stats-json)".into()))?;
        Self::read(path)
    }
}
