use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Header row of every collection file
pub const SALES_HEADER: [&str; 9] = [
    "id",
    "date",
    "product",
    "given_to",
    "sales_made",
    "sales_not_made",
    "target_expected",
    "total_received",
    "result",
];

/// CsvConnection manages the data directory and the per-collection files
#[derive(Clone, Debug)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("creating data directory {}", base_path.display()))?;
            info!("Created data directory {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the CSV file backing a collection
    pub fn collection_file_path(&self, collection: &str) -> Result<PathBuf> {
        let valid = !collection.is_empty()
            && collection
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            bail!("invalid collection name '{}'", collection);
        }
        Ok(self.base_directory.join(format!("{}.csv", collection)))
    }

    /// Create the collection file with just a header if it is missing
    pub fn ensure_collection_file_exists(&self, collection: &str) -> Result<PathBuf> {
        let path = self.collection_file_path(collection)?;
        if !path.exists() {
            let mut writer = csv::Writer::from_path(&path)
                .with_context(|| format!("creating {}", path.display()))?;
            writer.write_record(SALES_HEADER)?;
            writer.flush()?;
            info!("Created collection file {}", path.display());
        }
        Ok(path)
    }
}
