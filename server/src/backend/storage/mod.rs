//! # Storage Module
//!
//! Everything behind the record store and auth provider contracts.
//!
//! The domain layer only sees the traits in `traits`. Two local record stores
//! implement them here: `MemoryRecordStore` keeps collections in process and
//! `CsvRecordStore` keeps one CSV file per collection. Both push a complete
//! snapshot on subscribe and after every write, the way a hosted document
//! database with realtime listeners would.

pub mod csv;
pub mod memory;
pub mod snapshot_hub;
pub mod staff_accounts;
pub mod traits;

pub use self::csv::{CsvConnection, CsvRecordStore};
pub use memory::MemoryRecordStore;
pub use snapshot_hub::SnapshotHub;
pub use staff_accounts::StaffAccountProvider;
pub use traits::{AuthError, AuthProvider, RecordStore, SnapshotReceiver, StaffIdentity, StoreError};
