use std::sync::Arc;

use orderdesk_auth::{Hs256TokenValidator, OrderAccessController};
use orderdesk_infra::{OrderStore, ProductStore, StoreSummarySource};

/// Shared per-process services handed to every handler.
#[derive(Clone)]
pub struct AppServices {
    pub store: Arc<dyn OrderStore>,
    pub products: Arc<dyn ProductStore>,
    pub access: OrderAccessController,
}

/// Wire the access controller to read order summaries from `store`.
pub fn build_services(
    jwt_secret: String,
    store: Arc<dyn OrderStore>,
    products: Arc<dyn ProductStore>,
) -> AppServices {
    let tokens = Arc::new(Hs256TokenValidator::new(jwt_secret.into_bytes()));
    let summaries = Arc::new(StoreSummarySource::new(store.clone()));

    AppServices {
        access: OrderAccessController::new(tokens, summaries),
        store,
        products,
    }
}
