use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{post, put},
};

use orderdesk_auth::{CatalogAction, ClaimSet, authorize_catalog};
use orderdesk_core::AggregateId;
use orderdesk_infra::ProductStore;
use orderdesk_products::{NewProduct, Product, ProductChanges, ProductId};

use crate::app::dto;
use crate::app::errors;
use crate::app::services::AppServices;

/// Catalog writes. Listing is mounted separately as a public route.
pub fn router() -> Router {
    Router::new()
        .route("/products", post(create_product))
        .route("/products/:id", put(update_product).delete(delete_product))
}

fn gate(claims: &ClaimSet, action: CatalogAction) -> Result<(), axum::response::Response> {
    authorize_catalog(claims, action).map_err(errors::deny_to_response)
}

fn parse_product_id(raw: &str) -> Result<ProductId, axum::response::Response> {
    raw.parse()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"))
}

pub async fn list_products(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.products.list().await {
        Ok(items) => Json(dto::ProductListResponse { items }).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(claims): Extension<ClaimSet>,
    body: Result<Json<NewProduct>, JsonRejection>,
) -> axum::response::Response {
    if let Err(resp) = gate(&claims, CatalogAction::Create) {
        return resp;
    }
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let product = match Product::create(ProductId::new(AggregateId::new()), body) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.products.insert(product).await {
        Ok(product) => {
            tracing::info!(product_id = %product.id(), name = product.name(), "product created");
            (StatusCode::CREATED, Json(product)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(claims): Extension<ClaimSet>,
    Path(id): Path<String>,
    body: Result<Json<ProductChanges>, JsonRejection>,
) -> axum::response::Response {
    if let Err(resp) = gate(&claims, CatalogAction::Update) {
        return resp;
    }
    let id = match parse_product_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.products.update(&id, body).await {
        Ok(product) => Json(product).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(claims): Extension<ClaimSet>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = gate(&claims, CatalogAction::Delete) {
        return resp;
    }
    let id = match parse_product_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.products.delete(&id).await {
        Ok(product) => {
            tracing::info!(product_id = %product.id(), "product deleted");
            Json(dto::DeletedProductResponse {
                id: product.id(),
                deleted: true,
            })
            .into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
