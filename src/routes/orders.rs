use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::checkout::{self, CartLine, PlacedOrder};
use crate::db;
use crate::error::AppError;
use crate::extract::{JsonBody, PathParam};
use crate::models::{Order, OrderItem};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateOrder {
    pub items: Vec<CartLine>,
}

#[derive(Serialize)]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: Decimal,
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemResponse>,
}

impl OrderResponse {
    fn new(order: Order, items: Vec<OrderItem>) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            status: order.status,
            total_price: order.total_price,
            created_at: order.created_at,
            items: items
                .into_iter()
                .map(|item| OrderItemResponse {
                    id: item.id,
                    product_id: item.product_id,
                    quantity: item.quantity,
                    price: item.price,
                })
                .collect(),
        }
    }
}

pub async fn create(
    AuthUser(user): AuthUser,
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<CreateOrder>,
) -> Result<Json<OrderResponse>, AppError> {
    let PlacedOrder { order, items } =
        checkout::place_order(&state.pool, user.id, &req.items).await?;
    Ok(Json(OrderResponse::new(order, items)))
}

pub async fn list_mine(
    AuthUser(user): AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let orders = db::orders::list_by_user(&state.pool, user.id).await?;
    let ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();

    let mut items_by_order: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
    for item in db::orders::list_items(&state.pool, &ids).await? {
        items_by_order.entry(item.order_id).or_default().push(item);
    }

    let response = orders
        .into_iter()
        .map(|order| {
            let items = items_by_order.remove(&order.id).unwrap_or_default();
            OrderResponse::new(order, items)
        })
        .collect();

    Ok(Json(response))
}

/// Another user's order is indistinguishable from a missing one.
pub async fn get(
    AuthUser(user): AuthUser,
    State(state): State<SharedState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<OrderResponse>, AppError> {
    let order = db::orders::find_for_user(&state.pool, id, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
    let items = db::orders::list_items(&state.pool, &[order.id]).await?;
    Ok(Json(OrderResponse::new(order, items)))
}
