//! Application-wide error types.
//!
//! Each module keeps its own `thiserror` enum; `AppError` gathers them for
//! code that crosses module boundaries. The binary reports through `anyhow`.

pub use crate::config::ConfigError;
pub use crate::modal::ModalError;
pub use crate::state::StateError;

/// Main application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Modal requests that could not be answered
    #[error("Modal error: {0}")]
    Modal(#[from] ModalError),

    /// State management errors
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Logger initialization errors
    #[error("Logger error: {0}")]
    Logger(String),

    /// Runtime creation errors
    #[error("Failed to create runtime: {0}")]
    RuntimeCreation(String),

    #[error("{0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
