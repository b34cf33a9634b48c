pub mod cache;
pub mod chat;
pub mod diagram;
pub mod faq;
pub mod health;
pub mod inventory;
