//! Industry entity model, company association and request payloads

use crate::core::error::BiztimeResult;
use crate::core::validation::required;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// An industry row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Industry {
    pub code: String,
    pub industry: String,
}

/// A `companies_industries` association row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct CompanyIndustry {
    pub comp_code: String,
    pub ind_code: String,
}

/// One row of `industries LEFT JOIN companies_industries`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct IndustryCompanyRow {
    pub code: String,
    pub industry: String,
    pub comp_code: Option<String>,
}

/// `GET /industries` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndustryListing {
    pub code: String,
    pub industry: String,
    pub companies: Vec<String>,
}

/// `POST /industries` body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateIndustry {
    #[validate(required)]
    pub code: Option<String>,
    #[validate(required)]
    pub industry: Option<String>,
}

impl CreateIndustry {
    pub fn into_industry(self) -> BiztimeResult<Industry> {
        Ok(Industry {
            code: required("code", self.code)?,
            industry: required("industry", self.industry)?,
        })
    }
}

/// `POST /industries/{code}/companies` body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AssociateCompany {
    #[validate(required)]
    pub comp_code: Option<String>,
}

impl AssociateCompany {
    pub fn into_comp_code(self) -> BiztimeResult<String> {
        required("comp_code", self.comp_code)
    }
}
