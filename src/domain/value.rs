use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// When I Work API token, carried in the `W-Token` header.
///
/// Invariant: non-empty after trimming.
pub struct ApiToken(String);

impl ApiToken {
    /// Header name the API expects the token under (`W-Token`).
    pub const HEADER: &'static str = "W-Token";

    /// Create a validated [`ApiToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty {
                field: Self::HEADER,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
