//! Core module containing the domain rules shared by every backend

pub mod error;
pub mod grouping;
pub mod payment;
pub mod service;
pub mod validation;

pub use error::{BiztimeError, BiztimeResult};
pub use grouping::group_by_key;
pub use payment::{InvoiceUpdate, PaymentState, PaymentTransition, plan_update};
pub use service::{CompanyStore, IndustryStore, InvoiceStore};
pub use validation::{ValidatedJson, required, slugify};
