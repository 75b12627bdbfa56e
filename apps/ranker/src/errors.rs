use thiserror::Error;

/// Failure of a single ranking or health call.
/// Every variant is returned to the immediate caller; nothing is retried.
#[derive(Debug, Error)]
pub enum RankError {
    /// Local precondition failed. The network was never touched.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Transport-level failure: connection refused, DNS, timeout, aborted body.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered, but with a non-success status or a body we could not parse.
    #[error("Ranking failed: {message}")]
    Service {
        status: Option<u16>,
        message: String,
    },
}

impl RankError {
    pub fn validation(message: impl Into<String>) -> Self {
        RankError::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, RankError::Validation(_))
    }

    /// HTTP status reported by the service, when there was a response at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RankError::Service { status, .. } => *status,
            RankError::Network(e) => e.status().map(|s| s.as_u16()),
            RankError::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_message_carries_body_verbatim() {
        let err = RankError::Service {
            status: Some(500),
            message: "internal error".to_string(),
        };
        assert_eq!(err.to_string(), "Ranking failed: internal error");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_validation_has_no_status() {
        let err = RankError::validation("ZIP file is required");
        assert!(err.is_validation());
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("ZIP file is required"));
    }
}
