//! Error types for the conversational intake.

use staffdesk_core::error::StaffdeskError;

/// Errors from the chat engine and its session store.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("session store error: {0}")]
    SessionStore(String),
}

impl From<ChatError> for StaffdeskError {
    fn from(err: ChatError) -> Self {
        StaffdeskError::Chat(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        assert_eq!(ChatError::EmptyMessage.to_string(), "message cannot be empty");
        assert_eq!(
            ChatError::MessageTooLong(2000).to_string(),
            "message exceeds maximum length of 2000 characters"
        );
        assert_eq!(
            ChatError::SessionStore("lock poisoned".to_string()).to_string(),
            "session store error: lock poisoned"
        );
    }

    #[test]
    fn test_chat_error_into_staffdesk_error() {
        let err: StaffdeskError = ChatError::SessionStore("poisoned".to_string()).into();
        assert!(matches!(err, StaffdeskError::Chat(_)));
        assert!(err.to_string().contains("poisoned"));
    }
}
