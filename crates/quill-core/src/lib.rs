//! Foundational low-level utilities shared across Quill crates.
//!
//! Provides the persisted key-value store backing session credentials and
//! feature flags, plus atomic file-write and time helpers used by it.

pub mod atomic_io;
pub mod kv;
pub mod time_utils;

pub use atomic_io::write_text_atomic;
pub use kv::KvStorage;
pub use time_utils::{current_unix_timestamp, current_unix_timestamp_ms};
