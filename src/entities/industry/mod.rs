//! Industry entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::IndustryDescriptor;
pub use handlers::*;
pub use model::{
    AssociateCompany, CompanyIndustry, CreateIndustry, Industry, IndustryCompanyRow,
    IndustryListing,
};
