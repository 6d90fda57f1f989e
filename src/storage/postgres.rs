//! PostgreSQL storage backend using sqlx.
//!
//! Provides `PgStore`, implementing every repository trait over a
//! `sqlx::PgPool`. All statements are parameterized.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! biztime-rs = { version = "0.1", features = ["postgres"] }
//! ```
//!
//! # Schema
//!
//! ```text
//! companies(code PK, name, description)
//! invoices(id SERIAL PK, comp_code FK, amt, paid, add_date, paid_date)
//! industries(code PK, industry)
//! companies_industries(comp_code FK, ind_code FK)
//! ```
//!
//! Foreign keys have no `ON DELETE CASCADE`: deleting a company that still
//! owns invoices fails with an integrity error.

use crate::config::DatabaseConfig;
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
use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

const BACKEND: &str = "PostgreSQL";

// ---------------------------------------------------------------------------
// Connection and schema management
// ---------------------------------------------------------------------------

/// Open a connection pool as described by `config`.
pub async fn connect(config: &DatabaseConfig, url: &str) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(url)
        .await
        .map_err(|e| {
            StorageError::ConnectionError {
                backend: BACKEND.to_string(),
                message: e.to_string(),
            }
            .into()
        })
}

/// Create the tables if they do not exist yet (idempotent).
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS companies (
            code TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT ''
        )",
        "CREATE TABLE IF NOT EXISTS invoices (
            id SERIAL PRIMARY KEY,
            comp_code TEXT NOT NULL REFERENCES companies (code),
            amt DOUBLE PRECISION NOT NULL,
            paid BOOLEAN NOT NULL DEFAULT false,
            add_date TIMESTAMPTZ NOT NULL DEFAULT now(),
            paid_date TIMESTAMPTZ,
            CONSTRAINT invoices_paid_date_matches_paid CHECK (paid = (paid_date IS NOT NULL))
        )",
        "CREATE TABLE IF NOT EXISTS industries (
            code TEXT PRIMARY KEY,
            industry TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS companies_industries (
            comp_code TEXT NOT NULL REFERENCES companies (code),
            ind_code TEXT NOT NULL REFERENCES industries (code),
            PRIMARY KEY (comp_code, ind_code)
        )",
    ];

    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| query_error("Failed to create schema", e))?;
    }

    Ok(())
}

/// Classify a sqlx error so constraint violations keep their category.
fn query_error(context: &str, err: sqlx::Error) -> anyhow::Error {
    let storage = match &err {
        sqlx::Error::Database(db)
            if db.is_unique_violation()
                || db.is_foreign_key_violation()
                || db.is_check_violation() =>
        {
            StorageError::IntegrityError {
                message: format!("{}: {}", context, db.message()),
            }
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StorageError::ConnectionError {
                backend: BACKEND.to_string(),
                message: format!("{}: {}", context, err),
            }
        }
        _ => StorageError::QueryError {
            backend: BACKEND.to_string(),
            message: format!("{}: {}", context, err),
        },
    };
    storage.into()
}

// ---------------------------------------------------------------------------
// PgStore
// ---------------------------------------------------------------------------

/// Repository implementation backed by PostgreSQL.
///
/// # Example
///
/// ```rust,ignore
/// let pool = PgPool::connect("postgres://localhost/biztime").await?;
/// ensure_schema(&pool).await?;
/// let store = PgStore::new(pool);
/// let companies = CompanyStore::list(&store).await?;
/// ```
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CompanyStore for PgStore {
    async fn list(&self) -> Result<Vec<CompanySummary>> {
        sqlx::query_as::<_, CompanySummary>("SELECT code, name FROM companies ORDER BY code")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error("Failed to list companies", e))
    }

    async fn get_with_industries(&self, code: &str) -> Result<Vec<CompanyIndustryRow>> {
        sqlx::query_as::<_, CompanyIndustryRow>(
            "SELECT c.code, c.name, c.description, ci.ind_code \
             FROM companies AS c \
             LEFT JOIN companies_industries AS ci ON ci.comp_code = c.code \
             WHERE c.code = $1 \
             ORDER BY ci.ind_code",
        )
        .bind(code)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_error("Failed to get company", e))
    }

    async fn create(&self, company: NewCompany) -> Result<Company> {
        sqlx::query_as::<_, Company>(
            "INSERT INTO companies (code, name, description) VALUES ($1, $2, $3) \
             RETURNING code, name, description",
        )
        .bind(&company.code)
        .bind(&company.name)
        .bind(&company.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| query_error("Failed to create company", e))
    }

    async fn update(&self, code: &str, changes: CompanyChanges) -> Result<Option<Company>> {
        sqlx::query_as::<_, Company>(
            "UPDATE companies SET name = $1, description = $2 WHERE code = $3 \
             RETURNING code, name, description",
        )
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error("Failed to update company", e))
    }

    async fn delete(&self, code: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM companies WHERE code = $1")
            .bind(code)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to delete company", e))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl InvoiceStore for PgStore {
    async fn list(&self) -> Result<Vec<InvoiceSummary>> {
        sqlx::query_as::<_, InvoiceSummary>("SELECT id, comp_code FROM invoices ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error("Failed to list invoices", e))
    }

    async fn get(&self, id: i32) -> Result<Option<Invoice>> {
        sqlx::query_as::<_, Invoice>(
            "SELECT id, comp_code, amt, paid, add_date, paid_date FROM invoices WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error("Failed to get invoice", e))
    }

    async fn get_with_company(&self, id: i32) -> Result<Option<InvoiceWithCompany>> {
        sqlx::query_as::<_, InvoiceWithCompany>(
            "SELECT i.id, i.amt, i.paid, i.add_date, i.paid_date, c.code, c.name, c.description \
             FROM invoices AS i \
             JOIN companies AS c ON i.comp_code = c.code \
             WHERE i.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error("Failed to get invoice with company", e))
    }

    async fn list_for_company(&self, comp_code: &str) -> Result<Vec<CompanyInvoice>> {
        sqlx::query_as::<_, CompanyInvoice>(
            "SELECT id, amt, paid, add_date, paid_date FROM invoices \
             WHERE comp_code = $1 ORDER BY id",
        )
        .bind(comp_code)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_error("Failed to list company invoices", e))
    }

    async fn create(&self, invoice: NewInvoice) -> Result<Invoice> {
        sqlx::query_as::<_, Invoice>(
            "INSERT INTO invoices (comp_code, amt) VALUES ($1, $2) \
             RETURNING id, comp_code, amt, paid, add_date, paid_date",
        )
        .bind(&invoice.comp_code)
        .bind(invoice.amt)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| query_error("Failed to create invoice", e))
    }

    async fn update(&self, id: i32, update: InvoiceUpdate) -> Result<Option<Invoice>> {
        sqlx::query_as::<_, Invoice>(
            "UPDATE invoices SET amt = $1, paid = $2, paid_date = $3 WHERE id = $4 \
             RETURNING id, comp_code, amt, paid, add_date, paid_date",
        )
        .bind(update.amt)
        .bind(update.paid)
        .bind(update.paid_date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error("Failed to update invoice", e))
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("Failed to delete invoice", e))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl IndustryStore for PgStore {
    async fn list_with_companies(&self) -> Result<Vec<IndustryCompanyRow>> {
        sqlx::query_as::<_, IndustryCompanyRow>(
            "SELECT i.code, i.industry, ci.comp_code \
             FROM industries AS i \
             LEFT JOIN companies_industries AS ci ON i.code = ci.ind_code \
             ORDER BY i.code, ci.comp_code",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_error("Failed to list industries", e))
    }

    async fn create(&self, industry: Industry) -> Result<Industry> {
        sqlx::query_as::<_, Industry>(
            "INSERT INTO industries (code, industry) VALUES ($1, $2) RETURNING code, industry",
        )
        .bind(&industry.code)
        .bind(&industry.industry)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| query_error("Failed to create industry", e))
    }

    async fn associate(&self, ind_code: &str, comp_code: &str) -> Result<CompanyIndustry> {
        sqlx::query_as::<_, CompanyIndustry>(
            "INSERT INTO companies_industries (comp_code, ind_code) VALUES ($1, $2) \
             RETURNING comp_code, ind_code",
        )
        .bind(comp_code)
        .bind(ind_code)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| query_error("Failed to associate company with industry", e))
    }
}
