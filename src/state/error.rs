//! State management-specific error types.

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Habit not found in state
    #[error("Habit not found: {id}")]
    HabitNotFound { id: u64 },

    /// Task not found in state
    #[error("Task not found: {id}")]
    TaskNotFound { id: u64 },

    /// Action worker no longer listening
    #[error("Action channel closed")]
    ActionChannelClosed,
}
