//! Presentation models derived from domain data.
//!
//! Views here are renderer-agnostic; the CLI turns them into terminal
//! output.

mod faq;
mod inventory;
mod table;

pub use faq::{FaqItem, FaqList};
pub use inventory::{DashboardHeader, InventoryTab, format_date, format_timestamp, render_tab};
pub use table::{BadgeTone, Cell, CellStyle, PLACEHOLDER, TableView};
