use thiserror::Error;

/// Errors surfaced by the graph core.
///
/// Validation failures carry the full message list so callers can report
/// them joined or individually; everything else is an internal failure.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("graph not found: {0}")]
    NotFound(String),

    #[error("unsupported operation: {0}")]
    Unsupported(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    pub fn validation(message: impl Into<String>) -> Self {
        GraphError::Validation(vec![message.into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_are_joined() {
        let err = GraphError::Validation(vec![
            "text is required".to_string(),
            "text must be at most 10000 characters".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "validation failed: text is required; text must be at most 10000 characters"
        );
    }
}
