pub mod audit_logs;
pub mod auth;
pub mod categories;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod roles;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/register", post(auth::register))
        .route("/token", post(auth::token))
        .route("/me", get(auth::me))
        // Catalog
        .route("/categories/", get(categories::list).post(categories::create))
        .route("/categories/{id}/children", get(categories::children))
        .route("/categories/{id}/products", get(categories::products))
        .route("/products/", get(products::list).post(products::create))
        .route("/products/{id}", get(products::get))
        .route("/products/{id}/reviews", get(products::reviews))
        // Orders
        .route("/orders/", post(orders::create))
        .route("/orders/{id}", get(orders::get))
        .route("/my-orders/", get(orders::list_mine))
        // Reviews
        .route("/reviews/", post(reviews::create))
        // Audit trail
        .route("/audit-logs/", get(audit_logs::list))
        // Roles
        .route("/roles/", get(roles::list).post(roles::create))
}
