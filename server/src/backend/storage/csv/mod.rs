//! # CSV Record Store
//!
//! File-backed record store. Each collection lives in one CSV file at the
//! root of the data directory:
//!
//! ```text
//! data/
//! ├── sales.csv
//! └── archive.csv
//! ```
//!
//! Writes go to a temp file that is renamed over the original, so a crash
//! never leaves a half-written collection behind.

pub mod connection;
pub mod sale_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::CsvConnection;
pub use sale_repository::CsvRecordStore;
