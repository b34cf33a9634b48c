//! Cache store implementations.

mod atomic_file;
mod file_cache_store;
mod memory_cache_store;

pub use atomic_file::AtomicFile;
pub use file_cache_store::FileCacheStore;
pub use memory_cache_store::InMemoryCacheStore;
