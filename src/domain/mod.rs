//! Domain layer: validated request types and credential values (no I/O).

mod request;
mod validation;
mod value;

pub use request::{NewShift, NewUser, ShiftFilter, UserFilter, UserUpdate};
pub use validation::ValidationError;
pub(crate) use validation::{require_id, require_text};
pub use value::ApiToken;
