// Error types for store and query operations

use thiserror::Error;

/// Recoverable, per-call failures reported by the store and the query engine
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// No record with the given id exists
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The requested sort field does not name a resource attribute
    #[error("Invalid sort field: {0}")]
    InvalidSortField(String),

    /// A draft or patch failed validation
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A check-out asked for more units than are available
    #[error("Insufficient stock for {id}: requested {requested}, available {available}")]
    InsufficientStock { id: String, requested: u32, available: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(Error::NotFound("abc".to_string()).to_string(), "Resource not found: abc");
        assert_eq!(
            Error::InvalidSortField("color".to_string()).to_string(),
            "Invalid sort field: color"
        );
        let err = Error::InsufficientStock {
            id: "bus-1".to_string(),
            requested: 4,
            available: 2,
        };
        assert_eq!(err.to_string(), "Insufficient stock for bus-1: requested 4, available 2");
    }
}
