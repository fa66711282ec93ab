use chrono::NaiveDate;
use thiserror::Error;

/// Custom error type for grant, vest, and sale operations.
#[derive(Debug, Error)]
pub enum GrantError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate identifier: {0}")]
    DuplicateId(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Sale '{sale_id}' dated {sale_date} precedes vest '{vest_id}' dated {vest_date}")]
    SaleBeforeVest {
        sale_id: String,
        sale_date: NaiveDate,
        vest_id: String,
        vest_date: NaiveDate,
    },

    #[error("Sale '{sale_id}' in grant '{grant_id}' references unknown vest '{vest_id}'")]
    DanglingVestReference {
        grant_id: String,
        sale_id: String,
        vest_id: String,
    },
}

impl From<GrantError> for String {
    fn from(error: GrantError) -> Self {
        error.to_string()
    }
}
