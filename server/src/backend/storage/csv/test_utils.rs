//! Test environment for the CSV store that cleans up after itself.

use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

use super::connection::CsvConnection;
use super::sale_repository::CsvRecordStore;

/// RAII test environment: the data directory is removed when this is dropped,
/// even if the test panics
pub struct TestEnvironment {
    _temp_dir: TempDir,
    pub connection: CsvConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::with_prefix("sales_tracker_")?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = CsvConnection::new(&base_path)?;
        Ok(Self {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    /// A fresh store over this environment's data directory
    pub fn store(&self) -> CsvRecordStore {
        CsvRecordStore::new(self.connection.clone())
    }
}
