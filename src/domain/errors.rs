//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Transport failure or non-success status from the AI provider.
    #[error("AI provider error: {0}")]
    Ai(String),

    /// Provider answered, but the payload could not be interpreted.
    #[error("Malformed AI response: {0}")]
    Parse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A chat turn is already in flight.
    #[error("Another request is still in progress")]
    Busy,

    #[error("Report export failed: {0}")]
    Export(String),

    #[error("UI error: {0}")]
    Ui(String),
}
