//! Error types for the RAG client.

use thiserror::Error;

/// Errors that can occur when querying the RAG service.
///
/// Categories are kept distinct so the web layer can show the user a message
/// matching what actually went wrong.
#[derive(Debug, Error)]
pub enum RagError {
    /// Request timed out.
    #[error("RAG request timed out")]
    Timeout,

    /// Connection to the service failed.
    #[error("RAG connection failed: {0}")]
    Connection(String),

    /// The service answered with a non-success status.
    #[error("RAG service returned status {status}")]
    Http {
        /// HTTP status code.
        status: u16,
    },

    /// The response body could not be decoded.
    #[error("Failed to parse RAG response: {0}")]
    Parse(String),

    /// Anything the other categories don't cover.
    #[error("RAG request failed: {0}")]
    Unknown(String),
}

impl RagError {
    /// Localized user-facing message for this error category.
    ///
    /// Wording follows the chat surface of the source product.
    pub fn user_message(&self) -> &'static str {
        match self {
            RagError::Timeout => "Сервіс відповідає надто довго. Спробуйте трохи пізніше.",
            RagError::Connection(_) => {
                "Не вдалося зʼєднатися з сервісом. Спробуйте трохи пізніше."
            }
            RagError::Http { .. } | RagError::Parse(_) | RagError::Unknown(_) => {
                "Вибачте, зараз я не можу відповісти. Спробуйте трохи пізніше."
            }
        }
    }
}

impl From<reqwest::Error> for RagError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RagError::Timeout
        } else if err.is_connect() {
            RagError::Connection(err.to_string())
        } else if err.is_decode() {
            RagError::Parse(err.to_string())
        } else {
            RagError::Unknown(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_are_localized() {
        assert!(RagError::Timeout.user_message().contains("надто довго"));
        assert!(RagError::Connection("refused".into())
            .user_message()
            .contains("зʼєднатися"));
        assert_eq!(
            RagError::Http { status: 500 }.user_message(),
            RagError::Unknown("x".into()).user_message()
        );
    }

    #[test]
    fn display_includes_status() {
        let err = RagError::Http { status: 503 };
        assert!(err.to_string().contains("503"));
    }
}
