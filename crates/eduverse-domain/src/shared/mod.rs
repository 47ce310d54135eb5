use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn from_string(s: &str) -> Self {
                Self(s.to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

define_id!(UserId);
define_id!(GameResultId);

/// Error codes for structured error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Resource Not Found (2xxx)
    LearnerNotFound = 2001,
    BadgeNotFound = 2002,

    // Data & Persistence (4xxx)
    StoreUnavailable = 4001,
    DataIntegrityError = 4003,

    // Infrastructure (5xxx)
    InfrastructureError = 5001,

    // Validation (6xxx)
    ValidationError = 6001,
    InvalidInput = 6002,
}

impl ErrorCode {
    /// Get error code as integer
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ErrorCode::LearnerNotFound
            | ErrorCode::BadgeNotFound
            | ErrorCode::ValidationError
            | ErrorCode::InvalidInput => ErrorSeverity::Info,

            ErrorCode::StoreUnavailable => ErrorSeverity::Warning,

            ErrorCode::DataIntegrityError | ErrorCode::InfrastructureError => {
                ErrorSeverity::Error
            }
        }
    }

    /// Whether the caller may retry the failed operation as-is
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ErrorCode::StoreUnavailable)
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Learner not found: {0}")]
    LearnerNotFound(String),

    #[error("Badge not found: {0}")]
    BadgeNotFound(String),

    /// Any persistence failure (connection, I/O, lock timeout). Not retried
    /// internally.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DomainError {
    /// Get error code
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::LearnerNotFound(_) => ErrorCode::LearnerNotFound,
            DomainError::BadgeNotFound(_) => ErrorCode::BadgeNotFound,
            DomainError::StoreUnavailable(_) => ErrorCode::StoreUnavailable,
            DomainError::DataIntegrity(_) => ErrorCode::DataIntegrityError,
            DomainError::Infrastructure(_) => ErrorCode::InfrastructureError,
            DomainError::Validation(_) => ErrorCode::ValidationError,
            DomainError::InvalidInput(_) => ErrorCode::InvalidInput,
        }
    }

    /// Get error message
    pub fn message(&self) -> &str {
        match self {
            DomainError::LearnerNotFound(msg)
            | DomainError::BadgeNotFound(msg)
            | DomainError::StoreUnavailable(msg)
            | DomainError::DataIntegrity(msg)
            | DomainError::Infrastructure(msg)
            | DomainError::Validation(msg)
            | DomainError::InvalidInput(msg) => msg,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        self.code().severity()
    }

    pub fn is_recoverable(&self) -> bool {
        self.code().is_recoverable()
    }

    /// Format error with code
    pub fn format_with_code(&self) -> String {
        format!("[{}] {}", self.code().code(), self)
    }
}
