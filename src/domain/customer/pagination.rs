use super::errors::{CustomerError, INVALID_LIMIT, INVALID_PAGE, INVALID_PARAMETERS};

/// Validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    /// Rows to skip. Page 0 reads the same rows as page 1.
    pub fn offset(&self) -> i64 {
        (self.page - 1).max(0).saturating_mul(self.limit)
    }
}

pub fn validate_pagination(page: i64, limit: i64) -> Result<Page, CustomerError> {
    match (page < 0, limit < 0) {
        (true, true) => Err(CustomerError::MalformedInput(INVALID_PARAMETERS)),
        (true, false) => Err(CustomerError::MalformedInput(INVALID_PAGE)),
        (false, true) => Err(CustomerError::MalformedInput(INVALID_LIMIT)),
        (false, false) => Ok(Page { page, limit }),
    }
}
