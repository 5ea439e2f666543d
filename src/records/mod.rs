//! Persistence of the best score and the best survival time.
//!
//! The game only relies on the [`RecordStore`] contract: loads never fail
//! (absent or unreadable records read as zero), saves report errors for
//! the caller to log.

pub mod store;

pub use store::{FileRecordStore, MemoryRecordStore, RecordStore};
