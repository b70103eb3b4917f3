use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    MissingId { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::MissingId { field } => write!(f, "{field} is not specified"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Reject the zero id the way the API treats it: as "not specified".
pub(crate) fn require_id(field: &'static str, value: u64) -> Result<u64, ValidationError> {
    if value == 0 {
        return Err(ValidationError::MissingId { field });
    }
    Ok(value)
}

pub(crate) fn require_text(
    field: &'static str,
    value: impl Into<String>,
) -> Result<String, ValidationError> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(value)
}
