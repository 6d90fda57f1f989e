//! Entity descriptor for Company

use super::{create_company, delete_company, get_company, list_companies, update_company};
use crate::server::entity_registry::EntityDescriptor;
use crate::server::state::AppState;
use axum::{Router, routing::get};

/// Descriptor for the Company entity
pub struct CompanyDescriptor {
    pub state: AppState,
}

impl CompanyDescriptor {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for CompanyDescriptor {
    fn entity_type(&self) -> &str {
        "company"
    }

    fn plural(&self) -> &str {
        "companies"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/companies", get(list_companies).post(create_company))
            .route(
                "/companies/{code}",
                get(get_company).put(update_company).delete(delete_company),
            )
            .with_state(self.state.clone())
    }
}
