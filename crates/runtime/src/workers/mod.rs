//! Worker tasks that back the runtime orchestration.
//!
//! The enumeration worker owns the command channel and offloads each request
//! to the blocking pool.

mod enumeration;

pub use enumeration::{Command, EnumerationWorker};
