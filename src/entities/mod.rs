//! Entities exposed by the API
//!
//! Each entity lives in its own module with the same layout:
//! `model` (rows and payloads), `handlers` (axum handlers) and
//! `descriptor` (route registration).

pub mod company;
pub mod industry;
pub mod invoice;
