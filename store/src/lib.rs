//! Storage for Shentu keepers.
//!
//! Every backend implements [`KvStore`]. Keepers never touch a backend
//! directly: each gets a [`PrefixStore`] namespaced under its module name
//! over one shared backend, and stores bincode-encoded values through it.

pub mod error;
pub mod kv;
pub mod memory;
pub mod prefix;

pub use error::StoreError;
pub use kv::KvStore;
pub use memory::{Checkpoint, MemoryStore};
pub use prefix::PrefixStore;
