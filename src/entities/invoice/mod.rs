//! Invoice entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::InvoiceDescriptor;
pub use handlers::*;
pub use model::{
    CompanyInvoice, CreateInvoice, Invoice, InvoiceDetail, InvoiceSummary, InvoiceWithCompany,
    NewInvoice, UpdateInvoice,
};
