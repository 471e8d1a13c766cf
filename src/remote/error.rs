use thiserror::Error;

/// Transport failure while listing albums or album contents.
///
/// Any of these aborts the listing it occurred in; the remote index is then unknown,
/// which is distinct from an item being absent.
#[derive(Error, Debug)]
pub enum IndexError {
    /// API request returned a non-success status
    #[error("Photo library API error (status {status}): {message}")]
    Http { status: u16, message: String },

    /// Request could not be sent or the response could not be read
    #[error("Network error: {0}")]
    Network(String),

    /// Response body did not decode into the expected shape
    #[error("Failed to parse API response: {0}")]
    Parse(String),

    /// Request could not be constructed
    #[error("Failed to build request: {0}")]
    Request(String),
}

impl From<reqwest::Error> for IndexError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = IndexError::Http {
            status: 403,
            message: "insufficient scopes".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Photo library API error (status 403): insufficient scopes"
        );
    }
}
