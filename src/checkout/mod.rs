//! Order placement: one transaction creating an order and its line items
//! from a cart, priced from the catalog at the moment of purchase.

pub mod cart;

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{Order, OrderItem, OrderStatus};

pub use cart::CartLine;

#[derive(Debug)]
pub enum CheckoutError {
    EmptyCart,
    InvalidQuantity { product_id: String, quantity: i64 },
    ProductNotFound(String),
    TotalOverflow,
    Database(sqlx::Error),
}

impl std::fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckoutError::EmptyCart => write!(f, "Order must contain at least one item"),
            CheckoutError::InvalidQuantity {
                product_id,
                quantity,
            } => write!(f, "Invalid quantity {quantity} for product {product_id}"),
            CheckoutError::ProductNotFound(id) => write!(f, "Product {id} not found"),
            CheckoutError::TotalOverflow => {
                write!(f, "Order total exceeds {}", cart::max_order_total())
            }
            CheckoutError::Database(err) => write!(f, "{err}"),
        }
    }
}

impl From<sqlx::Error> for CheckoutError {
    fn from(err: sqlx::Error) -> Self {
        CheckoutError::Database(err)
    }
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        let message = err.to_string();
        match err {
            CheckoutError::Database(e) => AppError::Database(e),
            CheckoutError::ProductNotFound(_) => AppError::NotFound(message),
            _ => AppError::BadRequest(message),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlacedOrder {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Create a PENDING order for `user_id` from `cart`.
///
/// Either the order, all of its items and its final total commit together,
/// or nothing is written. The audit row is appended after commit.
pub async fn place_order(
    pool: &PgPool,
    user_id: Uuid,
    cart: &[CartLine],
) -> Result<PlacedOrder, CheckoutError> {
    cart::validate(cart)?;

    let mut tx = pool.begin().await?;

    let order = db::orders::create(&mut *tx, user_id, OrderStatus::Pending).await?;

    let products = db::products::find_many(&mut *tx, &cart::product_ids(cart)).await?;
    let prices: HashMap<_, _> = products.iter().map(|p| (p.id, p.price)).collect();

    let (lines, total) = match cart::price(cart, &prices) {
        Ok(priced) => priced,
        Err(e) => {
            tx.rollback().await?;
            tracing::info!(%user_id, "Order rejected: {e}");
            return Err(e);
        }
    };

    let mut items = Vec::with_capacity(lines.len());
    for (position, line) in (0_i32..).zip(&lines) {
        let item = db::orders::create_item(
            &mut *tx,
            order.id,
            line.product_id,
            position,
            line.quantity,
            line.unit_price,
        )
        .await?;
        items.push(item);
    }

    let order = db::orders::set_total(&mut *tx, order.id, total).await?;

    tx.commit().await?;

    tracing::info!(
        order_id = %order.id,
        %user_id,
        items = items.len(),
        total = %order.total_price,
        "Order placed"
    );

    audit::log_event(pool, user_id, audit::CREATE, "orders", order.id).await;

    Ok(PlacedOrder { order, items })
}
