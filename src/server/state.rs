//! Shared handler state

use crate::core::service::{CompanyStore, IndustryStore, InvoiceStore};
use std::sync::Arc;

/// Repository handles shared by every handler
///
/// Cloning is cheap: only the `Arc`s are cloned.
#[derive(Clone)]
pub struct AppState {
    pub companies: Arc<dyn CompanyStore>,
    pub invoices: Arc<dyn InvoiceStore>,
    pub industries: Arc<dyn IndustryStore>,
}

impl AppState {
    /// Serve all three repositories from one backend
    pub fn from_store<S>(store: S) -> Self
    where
        S: CompanyStore + InvoiceStore + IndustryStore + 'static,
    {
        let store = Arc::new(store);
        Self {
            companies: store.clone(),
            invoices: store.clone(),
            industries: store,
        }
    }
}
