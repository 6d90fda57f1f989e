//! # biztime
//!
//! A REST API over companies, their invoices and the industries they belong to.
//!
//! ## Features
//!
//! - **Companies**: CRUD keyed by a short code, derived from the name when omitted
//! - **Invoices**: CRUD with a payment state machine that stamps `paid_date`
//! - **Industries**: listing with associated companies, creation and association
//! - **Pluggable storage**: in-memory (default) or PostgreSQL (`postgres` feature)
//! - **Uniform errors**: every failure answers `{"error": {"message", "status"}}`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use biztime::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     ServerBuilder::new()
//!         .with_store(InMemoryStore::new())
//!         .serve("127.0.0.1:3000")
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{BiztimeError, BiztimeResult},
        payment::{InvoiceUpdate, PaymentState, PaymentTransition, plan_update},
        service::{CompanyStore, IndustryStore, InvoiceStore},
        validation::ValidatedJson,
    };

    // === Entities ===
    pub use crate::entities::company::{Company, CompanySummary};
    pub use crate::entities::industry::{CompanyIndustry, Industry, IndustryListing};
    pub use crate::entities::invoice::{Invoice, InvoiceDetail, InvoiceSummary};

    // === Storage ===
    pub use crate::storage::InMemoryStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PgStore;

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{AppState, EntityDescriptor, EntityRegistry, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
}
