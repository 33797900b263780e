use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    InvalidRequest(String),
    NotFound(String),
    Database(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidRequest(msg) => write!(f, "{}", msg),
            AppError::NotFound(msg) => write!(f, "{}", msg),
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_passes_client_messages_through() {
        let err = AppError::NotFound("User not found".into());
        assert_eq!(err.to_string(), "User not found");

        let err = AppError::InvalidRequest("Invalid user id".into());
        assert_eq!(err.to_string(), "Invalid user id");
    }

    #[test]
    fn display_prefixes_database_errors() {
        let err = AppError::Database("connection refused".into());
        assert_eq!(err.to_string(), "Database error: connection refused");
    }
}
