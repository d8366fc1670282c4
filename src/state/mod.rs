//! Application state modules
//!
//! Grouped state structs owned by AffairsApp. Each struct owns its related
//! fields and poll methods.

mod news;
mod ui;

pub use news::{NewsState, perform};
pub use ui::UiState;

/// Events that state poll methods can return.
/// These communicate results back to AffairsApp without direct mutation.
#[derive(Debug, PartialEq, Eq)]
pub enum StateEvent {
    /// Update the status message
    StatusMessage(String),

    /// Log an error message
    LogError(String),

    /// Log an info message
    LogInfo(String),
}
