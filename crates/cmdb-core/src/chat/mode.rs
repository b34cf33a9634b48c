//! Chat interaction mode.

use serde::{Deserialize, Serialize};

/// Represents the current state of the chat view.
///
/// Input is never locked, so several questions may be in flight at once;
/// `pending` counts them and the mode returns to `Idle` when the last one
/// settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ChatMode {
    /// No question is outstanding.
    #[default]
    Idle,
    /// At least one question is waiting for its answer.
    AwaitingResponse {
        /// Number of questions still in flight.
        pending: usize,
    },
}

impl ChatMode {
    /// Transition taken when a question is submitted.
    pub fn submitted(self) -> Self {
        match self {
            ChatMode::Idle => ChatMode::AwaitingResponse { pending: 1 },
            ChatMode::AwaitingResponse { pending } => ChatMode::AwaitingResponse {
                pending: pending + 1,
            },
        }
    }

    /// Transition taken when a question settles, successfully or not.
    pub fn settled(self) -> Self {
        match self {
            ChatMode::AwaitingResponse { pending } if pending > 1 => {
                ChatMode::AwaitingResponse {
                    pending: pending - 1,
                }
            }
            _ => ChatMode::Idle,
        }
    }

    /// Whether the loading indicator should be shown.
    pub fn is_awaiting(&self) -> bool {
        matches!(self, ChatMode::AwaitingResponse { .. })
    }

    pub fn pending(&self) -> usize {
        match self {
            ChatMode::Idle => 0,
            ChatMode::AwaitingResponse { pending } => *pending,
        }
    }
}
