//! Field presence checks

use crate::core::error::{BiztimeError, ValidationError};

/// Take a `#[validate(required)]` field out of a payload that has already
/// been through `ValidatedJson`.
///
/// The extractor rejects absent fields before a handler runs, so over HTTP
/// this only unwraps. The `None` arm keeps the conversion total for payloads
/// built without the extractor. `Some(0.0)` and `Some(false)` pass.
pub fn required<T>(field: &str, value: Option<T>) -> Result<T, BiztimeError> {
    value.ok_or_else(|| {
        BiztimeError::Validation(ValidationError::MissingFields(vec![field.to_string()]))
    })
}
