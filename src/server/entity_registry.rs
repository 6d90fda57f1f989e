//! Entity registry collecting the route sets of every entity

use axum::Router;
use indexmap::IndexMap;

/// Describes how to build the routes of one entity
///
/// Each entity (company, invoice, industry) implements this trait; the
/// descriptor owns the `AppState` its handlers run against.
pub trait EntityDescriptor: Send + Sync {
    /// The entity type name (singular, e.g. "invoice")
    fn entity_type(&self) -> &str;

    /// The plural form used as the collection path (e.g. "invoices")
    fn plural(&self) -> &str;

    /// Build the routes for this entity, with state already applied
    fn build_routes(&self) -> Router;
}

/// Registry of all entities served by the API
///
/// Descriptors are kept in registration order.
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: IndexMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            descriptors: IndexMap::new(),
        }
    }

    /// Register an entity descriptor, replacing any previous one of the same type
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        tracing::debug!(%entity_type, plural = descriptor.plural(), "registered entity");
        self.descriptors.insert(entity_type, descriptor);
    }

    /// Merge the routes of every registered entity
    pub fn build_routes(&self) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                router.merge(descriptor.build_routes())
            })
    }

    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(|s| s.as_str()).collect()
    }
}
