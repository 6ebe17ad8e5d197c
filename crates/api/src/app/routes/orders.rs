use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
};
use chrono::Utc;

use orderdesk_auth::{
    AuthDecision, ClaimSet, OrderAction, OrderOperation, Role, check_ownership, deletable_states,
    ownership_scope,
};
use orderdesk_core::AggregateId;
use orderdesk_infra::{OrderStore, OwnerPrecondition, ProductStore, StatePrecondition, StoreError};
use orderdesk_orders::{NewOrder, Order, OrderChanges, OrderId, OrderLine};
use orderdesk_products::ProductId;

use crate::app::dto;
use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/mine", get(list_my_orders))
        .route("/:id", get(get_order).put(update_order).delete(delete_order))
        .route("/:id/status", patch(change_order_status))
}

/// Run the access controller for `operation`; anything but `Allow` becomes the response.
async fn gate(
    services: &AppServices,
    claims: &ClaimSet,
    operation: OrderOperation,
) -> Result<(), axum::response::Response> {
    match services.access.authorize(claims, operation).await {
        Ok(AuthDecision::Allow) => Ok(()),
        Ok(AuthDecision::Deny(reason)) => Err(errors::deny_to_response(reason)),
        Ok(AuthDecision::Invalid(reason)) => Err(errors::invalid_to_response(reason)),
        Err(e) => Err(errors::lookup_error_to_response(e)),
    }
}

/// Parse the path id. A caller lacking the role for `action` gets 403 even
/// when the id is malformed.
fn parse_order_id(
    services: &AppServices,
    claims: &ClaimSet,
    action: OrderAction,
    raw: &str,
) -> Result<OrderId, axum::response::Response> {
    raw.parse().map_err(|_| match services.access.authorize_action(claims, action) {
        AuthDecision::Deny(reason) => errors::deny_to_response(reason),
        AuthDecision::Invalid(reason) => errors::invalid_to_response(reason),
        AuthDecision::Allow => {
            errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id")
        }
    })
}

// Every order line must reference a product in the catalog.
async fn check_products(
    products: &dyn ProductStore,
    lines: &[OrderLine],
) -> Result<(), axum::response::Response> {
    for line in lines {
        let unknown = || {
            errors::json_error(
                StatusCode::BAD_REQUEST,
                "unknown_product",
                format!("unknown product {}", line.product_id),
            )
        };
        let id: ProductId = line.product_id.trim().parse().map_err(|_| unknown())?;
        match products.get(&id).await {
            Ok(Some(_)) => {}
            Ok(None) => return Err(unknown()),
            Err(e) => return Err(errors::store_error_to_response(e)),
        }
    }
    Ok(())
}

// Customers act on their own orders only, including the `user` they write.
fn check_owner_field(claims: &ClaimSet, user: &str) -> Result<(), axum::response::Response> {
    if claims.role() != Role::Customer {
        return Ok(());
    }
    check_ownership(claims, user.trim()).map_err(errors::deny_to_response)
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(claims): Extension<ClaimSet>,
    body: Result<Json<NewOrder>, JsonRejection>,
) -> axum::response::Response {
    if let Err(resp) = gate(&services, &claims, OrderOperation::Create).await {
        return resp;
    }
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    if let Err(resp) = check_owner_field(&claims, &body.user) {
        return resp;
    }
    if let Err(resp) = check_products(services.products.as_ref(), &body.products).await {
        return resp;
    }

    let order = match Order::create(OrderId::new(AggregateId::new()), body, Utc::now()) {
        Ok(o) => o,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store.insert(order).await {
        Ok(order) => {
            tracing::info!(order_id = %order.id(), owner = order.user(), "order created");
            (StatusCode::CREATED, Json(order)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(claims): Extension<ClaimSet>,
) -> axum::response::Response {
    if let Err(resp) = gate(&services, &claims, OrderOperation::GetAll).await {
        return resp;
    }

    match services.store.list().await {
        Ok(items) => Json(dto::OrderListResponse { items }).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn list_my_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(claims): Extension<ClaimSet>,
) -> axum::response::Response {
    if let Err(resp) = gate(&services, &claims, OrderOperation::ListOwn).await {
        return resp;
    }

    match services.store.list_by_owner(claims.email()).await {
        Ok(items) => Json(dto::OrderListResponse { items }).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(claims): Extension<ClaimSet>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_order_id(&services, &claims, OrderAction::Get, &id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if let Err(resp) = gate(&services, &claims, OrderOperation::Get(id)).await {
        return resp;
    }

    match services.store.get(&id).await {
        Ok(Some(order)) => Json(order).into_response(),
        Ok(None) => errors::store_error_to_response(StoreError::NotFound),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(claims): Extension<ClaimSet>,
    Path(id): Path<String>,
    body: Result<Json<OrderChanges>, JsonRejection>,
) -> axum::response::Response {
    let id = match parse_order_id(&services, &claims, OrderAction::Update, &id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if let Err(resp) = gate(&services, &claims, OrderOperation::Update(id)).await {
        return resp;
    }
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    if let Some(user) = &body.user {
        if let Err(resp) = check_owner_field(&claims, user) {
            return resp;
        }
    }
    if let Some(lines) = &body.products {
        if let Err(resp) = check_products(services.products.as_ref(), lines).await {
            return resp;
        }
    }

    // The order may have been reassigned since the ownership check.
    let owner = OwnerPrecondition::from(ownership_scope(&claims));
    match services.store.update(&id, owner, body).await {
        Ok(order) => Json(order).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(claims): Extension<ClaimSet>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_order_id(&services, &claims, OrderAction::Delete, &id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if let Err(resp) = gate(&services, &claims, OrderOperation::Delete(id)).await {
        return resp;
    }

    // Re-check ownership and the lifecycle rule under the store's write lock.
    let owner = OwnerPrecondition::from(ownership_scope(&claims));
    let expected = StatePrecondition::from(deletable_states(claims.role()));
    match services.store.delete(&id, owner, expected).await {
        Ok(order) => {
            tracing::info!(order_id = %order.id(), state = %order.state(), "order deleted");
            Json(dto::DeletedResponse {
                id: order.id(),
                deleted: true,
            })
            .into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn change_order_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(claims): Extension<ClaimSet>,
    Path(id): Path<String>,
    body: Result<Json<dto::ChangeStatusRequest>, JsonRejection>,
) -> axum::response::Response {
    let id = match parse_order_id(&services, &claims, OrderAction::ChangeStatus, &id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if let Err(resp) = gate(&services, &claims, OrderOperation::ChangeStatus(id)).await {
        return resp;
    }
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services
        .store
        .update_state(&id, StatePrecondition::Any, body.state)
        .await
    {
        Ok(order) => {
            tracing::info!(order_id = %order.id(), state = %order.state(), "order status changed");
            Json(order).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
