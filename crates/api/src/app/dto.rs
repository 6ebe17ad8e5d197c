use serde::{Deserialize, Serialize};

use orderdesk_orders::{Order, OrderId, OrderState};
use orderdesk_products::{Product, ProductId};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChangeStatusRequest {
    pub state: OrderState,
}

#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub items: Vec<Order>,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub id: OrderId,
    pub deleted: bool,
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub items: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct DeletedProductResponse {
    pub id: ProductId,
    pub deleted: bool,
}
