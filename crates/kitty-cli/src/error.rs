use thiserror::Error;

/// Failures reported back to the editor or the command line
#[derive(Error, Debug)]
pub enum AccessControlError {
    #[error("Access Kitty only works on Swift code.")]
    UnsupportedContentType(String),

    #[error("Access Kitty needs a selection to work on.")]
    NoSelection,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid extension manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AccessControlError {
    /// Whether the host should surface the error rather than complete
    /// silently
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            AccessControlError::UnsupportedContentType(_) | AccessControlError::NoSelection
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            AccessControlError::UnsupportedContentType("public.plain-text".into()).to_string(),
            "Access Kitty only works on Swift code."
        );
        assert_eq!(
            AccessControlError::NoSelection.to_string(),
            "Access Kitty needs a selection to work on."
        );
        assert!(AccessControlError::NoSelection.is_user_facing());
        assert!(!AccessControlError::UnknownCommand("x".into()).is_user_facing());
    }
}
