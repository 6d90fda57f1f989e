//! Company entity model and request payloads

use crate::core::error::{BiztimeResult, ValidationError};
use crate::core::validation::{required, slugify};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A company row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Company {
    pub code: String,
    pub name: String,
    pub description: String,
}

/// Listing shape: code and name only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct CompanySummary {
    pub code: String,
    pub name: String,
}

/// One row of `companies LEFT JOIN companies_industries`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct CompanyIndustryRow {
    pub code: String,
    pub name: String,
    pub description: String,
    pub ind_code: Option<String>,
}

impl CompanyIndustryRow {
    pub fn company(&self) -> Company {
        Company {
            code: self.code.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

/// Columns for an insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompany {
    pub code: String,
    pub name: String,
    pub description: String,
}

/// Columns for an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyChanges {
    pub name: String,
    pub description: String,
}

/// `POST /companies` body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCompany {
    pub code: Option<String>,
    #[validate(required)]
    pub name: Option<String>,
    #[validate(required)]
    pub description: Option<String>,
}

impl CreateCompany {
    /// Resolve the insert columns, deriving `code` from `name` when absent
    pub fn into_new_company(self) -> BiztimeResult<NewCompany> {
        let name = required("name", self.name)?;
        let description = required("description", self.description)?;

        let code = match self.code {
            Some(code) => code,
            None => {
                let slug = slugify(&name);
                if slug.is_empty() {
                    return Err(ValidationError::FieldError {
                        field: "name".to_string(),
                        message: "cannot derive a company code from a name without letters or digits"
                            .to_string(),
                    }
                    .into());
                }
                slug
            }
        };

        Ok(NewCompany {
            code,
            name,
            description,
        })
    }
}

/// `PUT /companies/{code}` body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCompany {
    #[validate(required)]
    pub name: Option<String>,
    #[validate(required)]
    pub description: Option<String>,
}

impl UpdateCompany {
    pub fn into_changes(self) -> BiztimeResult<CompanyChanges> {
        Ok(CompanyChanges {
            name: required("name", self.name)?,
            description: required("description", self.description)?,
        })
    }
}
