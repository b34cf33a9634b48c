//! Chat domain module.
//!
//! # Module Structure
//!
//! - `message`: transcript entry types (`Sender`, `ChatEntry`)
//! - `mode`: chat state machine (`ChatMode`)
//! - `transcript`: ordered history (`Transcript`)

mod message;
mod mode;
mod transcript;

pub use message::{ChatEntry, Sender};
pub use mode::ChatMode;
pub use transcript::{GREETING, Transcript};
