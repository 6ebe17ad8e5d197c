//! Access rules for the product catalog.
//!
//! Reading the catalog is public; every write is reserved to admins.

use crate::{ClaimSet, DenyReason, Role, authorize_roles};

/// Write operations on the product catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogAction {
    Create,
    Update,
    Delete,
}

impl CatalogAction {
    pub const ALL: [CatalogAction; 3] = [CatalogAction::Create, CatalogAction::Update, CatalogAction::Delete];

    pub fn required_roles(&self) -> &'static [Role] {
        match self {
            CatalogAction::Create | CatalogAction::Update | CatalogAction::Delete => &[Role::Admin],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CatalogAction::Create => "create_product",
            CatalogAction::Update => "update_product",
            CatalogAction::Delete => "delete_product",
        }
    }
}

pub fn authorize_catalog(claims: &ClaimSet, action: CatalogAction) -> Result<(), DenyReason> {
    authorize_roles(claims, action.required_roles()).inspect_err(|reason| {
        tracing::info!(
            operation = action.name(),
            role = claims.role().as_str(),
            subject = %claims.subject_id(),
            reason = reason.code(),
            "catalog access denied"
        );
    })
}
