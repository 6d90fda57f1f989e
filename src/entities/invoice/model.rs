//! Invoice entity model and request payloads

use crate::core::error::BiztimeResult;
use crate::core::payment::PaymentState;
use crate::core::validation::required;
use crate::entities::company::Company;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// An invoice row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Invoice {
    pub id: i32,
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
}

impl Invoice {
    pub fn payment_state(&self) -> PaymentState {
        PaymentState {
            paid: self.paid,
            paid_date: self.paid_date,
        }
    }
}

/// Listing shape: id and owning company code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct InvoiceSummary {
    pub id: i32,
    pub comp_code: String,
}

/// An invoice as listed under its company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct CompanyInvoice {
    pub id: i32,
    pub amt: f64,
    pub paid: bool,
    pub add_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
}

impl From<Invoice> for CompanyInvoice {
    fn from(invoice: Invoice) -> Self {
        Self {
            id: invoice.id,
            amt: invoice.amt,
            paid: invoice.paid,
            add_date: invoice.add_date,
            paid_date: invoice.paid_date,
        }
    }
}

/// One row of `invoices JOIN companies`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct InvoiceWithCompany {
    pub id: i32,
    pub amt: f64,
    pub paid: bool,
    pub add_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
    pub code: String,
    pub name: String,
    pub description: String,
}

/// `GET /invoices/{id}` shape: the invoice with its company nested
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceDetail {
    pub id: i32,
    pub amt: f64,
    pub paid: bool,
    pub add_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
    pub company: Company,
}

impl From<InvoiceWithCompany> for InvoiceDetail {
    fn from(row: InvoiceWithCompany) -> Self {
        Self {
            id: row.id,
            amt: row.amt,
            paid: row.paid,
            add_date: row.add_date,
            paid_date: row.paid_date,
            company: Company {
                code: row.code,
                name: row.name,
                description: row.description,
            },
        }
    }
}

/// Columns for an insert; `paid`, `add_date` and `paid_date` take defaults
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub comp_code: String,
    pub amt: f64,
}

/// `POST /invoices` body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInvoice {
    #[validate(required)]
    pub comp_code: Option<String>,
    #[validate(required)]
    pub amt: Option<f64>,
}

impl CreateInvoice {
    pub fn into_new_invoice(self) -> BiztimeResult<NewInvoice> {
        Ok(NewInvoice {
            comp_code: required("comp_code", self.comp_code)?,
            amt: required("amt", self.amt)?,
        })
    }
}

/// `PUT /invoices/{id}` body
///
/// `paid_date` is not accepted; it follows from `paid`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateInvoice {
    #[validate(required)]
    pub amt: Option<f64>,
    #[validate(required)]
    pub paid: Option<bool>,
}

impl UpdateInvoice {
    /// Returns `(amt, paid)`
    pub fn into_request(self) -> BiztimeResult<(f64, bool)> {
        Ok((required("amt", self.amt)?, required("paid", self.paid)?))
    }
}
