use super::repository::RepositoryError;

// ============================================================================
// Customer Business Rule Errors
// ============================================================================

pub const MALFORMED_CPF: &str = "Does not match a valid cpf format: ###.###.###-## or 00000000000";
pub const MALFORMED_DATE: &str = "Does not correspond to a valid date format: MM/DD/YYYY";
pub const INVALID_PARAMETERS: &str = "Invalid parameters";
pub const INVALID_PAGE: &str = "Invalid page";
pub const INVALID_LIMIT: &str = "Invalid limit";
pub const CUSTOMER_NOT_FOUND: &str = "This customer was not found";
pub const NO_CUSTOMERS_FOUND: &str = "No customers were found";

#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    #[error("{0}")]
    MalformedInput(&'static str),

    #[error("Invalid CPF")]
    InvalidChecksum,

    #[error("Date invalid - date of birth greater than today's date")]
    OutOfRange,

    #[error("Customer already registered")]
    Conflict,

    #[error("{0}")]
    NotFound(&'static str),

    /// Anything the repository reports that is not a business rule.
    #[error(transparent)]
    Repository(anyhow::Error),
}

/// Classification used by the boundary to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    // Mapped at the boundary; no customer operation raises these
    #[allow(dead_code)]
    Unauthorized,
    #[allow(dead_code)]
    Forbidden,
    NotFound,
    Conflict,
    WrongSchema,
    Malformed,
    OutOfRange,
    Unclassified,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::WrongSchema => "wrong_schema",
            ErrorKind::Malformed => "malformed",
            ErrorKind::OutOfRange => "out_of_range",
            ErrorKind::Unclassified => "unclassified",
        }
    }
}

impl CustomerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CustomerError::MalformedInput(_) => ErrorKind::Malformed,
            CustomerError::InvalidChecksum => ErrorKind::WrongSchema,
            CustomerError::OutOfRange => ErrorKind::OutOfRange,
            CustomerError::Conflict => ErrorKind::Conflict,
            CustomerError::NotFound(_) => ErrorKind::NotFound,
            CustomerError::Repository(_) => ErrorKind::Unclassified,
        }
    }

    /// True for failures the caller caused and can correct.
    pub fn is_expected(&self) -> bool {
        !matches!(self, CustomerError::Repository(_))
    }
}

impl From<RepositoryError> for CustomerError {
    fn from(err: RepositoryError) -> Self {
        match err {
            // The storage constraint caught a duplicate the read-then-write check missed
            RepositoryError::UniqueViolation => CustomerError::Conflict,
            RepositoryError::Backend(e) => CustomerError::Repository(e),
        }
    }
}
