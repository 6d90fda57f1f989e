//! Request validation
//!
//! Payload fields are `Option<T>` and a field counts as missing only when it
//! is absent (or `null`). `0`, `false` and `""` are present values. The
//! [`ValidatedJson`] extractor rejects payloads with missing fields before
//! they reach a handler.

pub mod extractor;
pub mod filters;
pub mod validators;

pub use extractor::ValidatedJson;
pub use filters::slugify;
pub use validators::required;
