//! Modal orchestration error types.

/// Errors surfaced at the future boundary of a modal request.
///
/// A declined confirmation is not an error: it resolves to `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModalError {
    /// A request was issued through the bridge before any modal host mounted.
    #[error("Modal orchestrator not initialized: no modal host has been mounted")]
    NotInitialized,

    /// The user dismissed a form without submitting it.
    #[error("Form cancelled")]
    Cancelled,

    /// The request was replaced by a newer one before it settled.
    #[error("Request superseded by a newer request")]
    Superseded,

    /// A form produced a payload of a different type than was requested.
    #[error("Form payload did not match the requested type")]
    PayloadMismatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_error_display() {
        let error = ModalError::NotInitialized;
        assert!(error.to_string().contains("not initialized"));

        let error = ModalError::Cancelled;
        assert_eq!(error.to_string(), "Form cancelled");

        let error = ModalError::Superseded;
        assert!(error.to_string().contains("superseded"));

        let error = ModalError::PayloadMismatch;
        assert!(error.to_string().contains("payload"));
    }
}
