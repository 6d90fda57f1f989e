//! In-memory implementation of the biztime stores for testing and development
//!
//! Mirrors the relational schema closely enough that handlers behave the
//! same as against PostgreSQL: serial invoice ids, unique keys, and foreign
//! keys without cascade (violations are reported as
//! [`StorageError::IntegrityError`]).

use crate::core::error::StorageError;
use crate::core::payment::InvoiceUpdate;
use crate::core::service::{CompanyStore, IndustryStore, InvoiceStore};
use crate::entities::company::{
    Company, CompanyChanges, CompanyIndustryRow, CompanySummary, NewCompany,
};
use crate::entities::industry::{CompanyIndustry, Industry, IndustryCompanyRow};
use crate::entities::invoice::{
    CompanyInvoice, Invoice, InvoiceSummary, InvoiceWithCompany, NewInvoice,
};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug)]
struct Tables {
    companies: BTreeMap<String, Company>,
    invoices: BTreeMap<i32, Invoice>,
    next_invoice_id: i32,
    industries: BTreeMap<String, Industry>,
    associations: Vec<CompanyIndustry>,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            companies: BTreeMap::new(),
            invoices: BTreeMap::new(),
            next_invoice_id: 1,
            industries: BTreeMap::new(),
            associations: Vec::new(),
        }
    }
}

fn integrity(message: String) -> anyhow::Error {
    StorageError::IntegrityError { message }.into()
}

/// In-memory store implementing every repository trait
///
/// Cloning shares the underlying tables. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))
    }
}

#[async_trait]
impl CompanyStore for InMemoryStore {
    async fn list(&self) -> Result<Vec<CompanySummary>> {
        let tables = self.read()?;
        Ok(tables
            .companies
            .values()
            .map(|c| CompanySummary {
                code: c.code.clone(),
                name: c.name.clone(),
            })
            .collect())
    }

    async fn get_with_industries(&self, code: &str) -> Result<Vec<CompanyIndustryRow>> {
        let tables = self.read()?;
        let Some(company) = tables.companies.get(code) else {
            return Ok(vec![]);
        };

        let mut ind_codes: Vec<&str> = tables
            .associations
            .iter()
            .filter(|a| a.comp_code == code)
            .map(|a| a.ind_code.as_str())
            .collect();
        ind_codes.sort_unstable();

        let row = |ind_code: Option<String>| CompanyIndustryRow {
            code: company.code.clone(),
            name: company.name.clone(),
            description: company.description.clone(),
            ind_code,
        };

        if ind_codes.is_empty() {
            return Ok(vec![row(None)]);
        }
        Ok(ind_codes
            .into_iter()
            .map(|ind| row(Some(ind.to_string())))
            .collect())
    }

    async fn create(&self, company: NewCompany) -> Result<Company> {
        let mut tables = self.write()?;
        if tables.companies.contains_key(&company.code) {
            return Err(integrity(format!(
                "duplicate key: company code '{}' already exists",
                company.code
            )));
        }

        let company = Company {
            code: company.code,
            name: company.name,
            description: company.description,
        };
        tables
            .companies
            .insert(company.code.clone(), company.clone());
        Ok(company)
    }

    async fn update(&self, code: &str, changes: CompanyChanges) -> Result<Option<Company>> {
        let mut tables = self.write()?;
        Ok(tables.companies.get_mut(code).map(|company| {
            company.name = changes.name;
            company.description = changes.description;
            company.clone()
        }))
    }

    async fn delete(&self, code: &str) -> Result<bool> {
        let mut tables = self.write()?;
        if !tables.companies.contains_key(code) {
            return Ok(false);
        }
        if tables.invoices.values().any(|i| i.comp_code == code) {
            return Err(integrity(format!(
                "company '{}' is still referenced by invoices",
                code
            )));
        }
        if tables.associations.iter().any(|a| a.comp_code == code) {
            return Err(integrity(format!(
                "company '{}' is still referenced by industries",
                code
            )));
        }
        tables.companies.remove(code);
        Ok(true)
    }
}

#[async_trait]
impl InvoiceStore for InMemoryStore {
    async fn list(&self) -> Result<Vec<InvoiceSummary>> {
        let tables = self.read()?;
        Ok(tables
            .invoices
            .values()
            .map(|i| InvoiceSummary {
                id: i.id,
                comp_code: i.comp_code.clone(),
            })
            .collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Invoice>> {
        let tables = self.read()?;
        Ok(tables.invoices.get(&id).cloned())
    }

    async fn get_with_company(&self, id: i32) -> Result<Option<InvoiceWithCompany>> {
        let tables = self.read()?;
        let Some(invoice) = tables.invoices.get(&id) else {
            return Ok(None);
        };
        Ok(tables
            .companies
            .get(&invoice.comp_code)
            .map(|company| InvoiceWithCompany {
                id: invoice.id,
                amt: invoice.amt,
                paid: invoice.paid,
                add_date: invoice.add_date,
                paid_date: invoice.paid_date,
                code: company.code.clone(),
                name: company.name.clone(),
                description: company.description.clone(),
            }))
    }

    async fn list_for_company(&self, comp_code: &str) -> Result<Vec<CompanyInvoice>> {
        let tables = self.read()?;
        Ok(tables
            .invoices
            .values()
            .filter(|i| i.comp_code == comp_code)
            .cloned()
            .map(CompanyInvoice::from)
            .collect())
    }

    async fn create(&self, invoice: NewInvoice) -> Result<Invoice> {
        let mut tables = self.write()?;
        if !tables.companies.contains_key(&invoice.comp_code) {
            return Err(integrity(format!(
                "foreign key violation: company '{}' does not exist",
                invoice.comp_code
            )));
        }

        let id = tables.next_invoice_id;
        tables.next_invoice_id += 1;

        let invoice = Invoice {
            id,
            comp_code: invoice.comp_code,
            amt: invoice.amt,
            paid: false,
            add_date: Utc::now(),
            paid_date: None,
        };
        tables.invoices.insert(id, invoice.clone());
        Ok(invoice)
    }

    async fn update(&self, id: i32, update: InvoiceUpdate) -> Result<Option<Invoice>> {
        let mut tables = self.write()?;
        Ok(tables.invoices.get_mut(&id).map(|invoice| {
            invoice.amt = update.amt;
            invoice.paid = update.paid;
            invoice.paid_date = update.paid_date;
            invoice.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let mut tables = self.write()?;
        Ok(tables.invoices.remove(&id).is_some())
    }
}

#[async_trait]
impl IndustryStore for InMemoryStore {
    async fn list_with_companies(&self) -> Result<Vec<IndustryCompanyRow>> {
        let tables = self.read()?;
        let mut rows = Vec::new();

        for industry in tables.industries.values() {
            let mut comp_codes: Vec<&str> = tables
                .associations
                .iter()
                .filter(|a| a.ind_code == industry.code)
                .map(|a| a.comp_code.as_str())
                .collect();
            comp_codes.sort_unstable();

            if comp_codes.is_empty() {
                rows.push(IndustryCompanyRow {
                    code: industry.code.clone(),
                    industry: industry.industry.clone(),
                    comp_code: None,
                });
            }
            for comp_code in comp_codes {
                rows.push(IndustryCompanyRow {
                    code: industry.code.clone(),
                    industry: industry.industry.clone(),
                    comp_code: Some(comp_code.to_string()),
                });
            }
        }

        Ok(rows)
    }

    async fn create(&self, industry: Industry) -> Result<Industry> {
        let mut tables = self.write()?;
        if tables.industries.contains_key(&industry.code) {
            return Err(integrity(format!(
                "duplicate key: industry code '{}' already exists",
                industry.code
            )));
        }
        tables
            .industries
            .insert(industry.code.clone(), industry.clone());
        Ok(industry)
    }

    async fn associate(&self, ind_code: &str, comp_code: &str) -> Result<CompanyIndustry> {
        let mut tables = self.write()?;
        if !tables.industries.contains_key(ind_code) {
            return Err(integrity(format!(
                "foreign key violation: industry '{}' does not exist",
                ind_code
            )));
        }
        if !tables.companies.contains_key(comp_code) {
            return Err(integrity(format!(
                "foreign key violation: company '{}' does not exist",
                comp_code
            )));
        }

        let association = CompanyIndustry {
            comp_code: comp_code.to_string(),
            ind_code: ind_code.to_string(),
        };
        if tables.associations.contains(&association) {
            return Err(integrity(format!(
                "duplicate key: company '{}' already in industry '{}'",
                comp_code, ind_code
            )));
        }
        tables.associations.push(association.clone());
        Ok(association)
    }
}
