pub mod cache;
pub mod chat;
pub mod dashboard;
pub mod faq;

pub use cache::CacheScope;
pub use chat::{ChatEvent, ChatSession};
pub use dashboard::DashboardState;
pub use faq::{FaqService, FaqSource};
