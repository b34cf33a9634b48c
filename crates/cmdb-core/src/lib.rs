pub mod api;
pub mod cache;
pub mod chat;
pub mod config;
pub mod diagram;
pub mod error;
pub mod faq;
pub mod inventory;
pub mod view;

// Re-export common error type
pub use error::{CmdbError, Result};
