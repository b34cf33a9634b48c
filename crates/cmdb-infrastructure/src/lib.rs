pub mod config_service;
pub mod logging;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::paths::CmdbPaths;
pub use crate::storage::{FileCacheStore, InMemoryCacheStore};
