//! # Configuration
//!
//! Application settings loaded from a YAML file. The path comes from the
//! `SALES_TRACKER_CONFIG` environment variable, falling back to
//! `sales_tracker.yaml` in the working directory. A missing file is not an
//! error: every key has a default.
//!
//! ```yaml
//! bind_address: "127.0.0.1:3000"
//! collection: "sales"
//! storage: csv
//! data_directory: "/srv/sales-tracker"
//! numeric_input_policy: reject   # or coerce_to_zero
//! date_format: day_month_year    # month_day_year or iso
//! log_level: "info"
//! cors_origin: "http://localhost:8080"
//! static_directory: "web/dist"  # optional, served at /
//! staff:
//!   - email: "clerk@shop.test"
//!     password_hash: "$argon2id$v=19$..."
//!     display_name: "Clerk"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::backend::domain::models::NumericInputPolicy;
use crate::backend::domain::DateFormat;

pub const CONFIG_ENV_VAR: &str = "SALES_TRACKER_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "sales_tracker.yaml";

/// Which record store backs the sales collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    Memory,
    #[default]
    Csv,
}

/// A staff login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffAccount {
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_address: String,
    /// Name of the sales collection in the record store
    pub collection: String,
    pub storage: StorageKind,
    /// Data directory for the CSV store; platform data dir when unset
    pub data_directory: Option<PathBuf>,
    pub numeric_input_policy: NumericInputPolicy,
    /// How the sales table shows dates
    pub date_format: DateFormat,
    /// Default tracing filter, overridden by RUST_LOG
    pub log_level: String,
    /// Browser origin allowed to call the API
    pub cors_origin: Option<String>,
    /// Built browser page to serve for any non-API path
    pub static_directory: Option<PathBuf>,
    pub staff: Vec<StaffAccount>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
            collection: "sales".to_string(),
            storage: StorageKind::default(),
            data_directory: None,
            numeric_input_policy: NumericInputPolicy::default(),
            date_format: DateFormat::default(),
            log_level: "info".to_string(),
            cors_origin: Some("http://localhost:8080".to_string()),
            static_directory: None,
            staff: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load from the path in `SALES_TRACKER_CONFIG`, or the default file
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path)
    }

    /// Load from a YAML file, using defaults when the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address
            .parse()
            .with_context(|| format!("invalid bind_address '{}'", self.bind_address))
    }

    /// Directory the CSV store writes to
    pub fn resolve_data_directory(&self) -> PathBuf {
        match &self.data_directory {
            Some(path) => path.clone(),
            None => dirs::data_dir()
                .map(|dir| dir.join("Sales Tracker"))
                .unwrap_or_else(|| PathBuf::from("data")),
        }
    }
}
