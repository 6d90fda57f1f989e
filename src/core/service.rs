//! Repository traits for companies, invoices and industries
//!
//! Each operation is a single round-trip to the backing store. Implementations
//! report absence through `Option`/`bool` and reserve `Err` for store failures
//! (connectivity, uniqueness or foreign-key violations).

use crate::core::payment::InvoiceUpdate;
use crate::entities::company::{
    Company, CompanyChanges, CompanyIndustryRow, CompanySummary, NewCompany,
};
use crate::entities::industry::{CompanyIndustry, Industry, IndustryCompanyRow};
use crate::entities::invoice::{
    CompanyInvoice, Invoice, InvoiceSummary, InvoiceWithCompany, NewInvoice,
};
use anyhow::Result;
use async_trait::async_trait;

/// Company repository
#[async_trait]
pub trait CompanyStore: Send + Sync {
    /// All companies, ordered by code
    async fn list(&self) -> Result<Vec<CompanySummary>>;

    /// The company joined with its industry associations.
    ///
    /// One row per association, or a single row with `ind_code: None` when the
    /// company has none. Empty when the code does not exist.
    async fn get_with_industries(&self, code: &str) -> Result<Vec<CompanyIndustryRow>>;

    /// Insert a company; a duplicate code is a store error
    async fn create(&self, company: NewCompany) -> Result<Company>;

    /// Update name and description, `None` when the code does not exist
    async fn update(&self, code: &str, changes: CompanyChanges) -> Result<Option<Company>>;

    /// Delete a company, `false` when the code does not exist
    async fn delete(&self, code: &str) -> Result<bool>;
}

/// Invoice repository
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// All invoices, ordered by id
    async fn list(&self) -> Result<Vec<InvoiceSummary>>;

    async fn get(&self, id: i32) -> Result<Option<Invoice>>;

    /// The invoice joined with its owning company
    async fn get_with_company(&self, id: i32) -> Result<Option<InvoiceWithCompany>>;

    /// Invoices owned by a company, ordered by id
    async fn list_for_company(&self, comp_code: &str) -> Result<Vec<CompanyInvoice>>;

    /// Insert an unpaid invoice stamped with the current time
    async fn create(&self, invoice: NewInvoice) -> Result<Invoice>;

    /// Write `amt`, `paid` and `paid_date` in one statement
    async fn update(&self, id: i32, update: InvoiceUpdate) -> Result<Option<Invoice>>;

    async fn delete(&self, id: i32) -> Result<bool>;
}

/// Industry repository
#[async_trait]
pub trait IndustryStore: Send + Sync {
    /// Industries left-joined with their associations, ordered by industry code
    async fn list_with_companies(&self) -> Result<Vec<IndustryCompanyRow>>;

    async fn create(&self, industry: Industry) -> Result<Industry>;

    /// Associate a company with an industry; both must exist
    async fn associate(&self, ind_code: &str, comp_code: &str) -> Result<CompanyIndustry>;
}
