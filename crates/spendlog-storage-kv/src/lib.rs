//! spendlog-storage-kv
//!
//! Durable key-value backends for the ledger persistence codec: an
//! in-memory store for tests and quota simulation, and an atomic
//! JSON-file-backed store for real sessions.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
