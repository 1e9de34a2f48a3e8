//! HTTP surface: `POST /orders`, `GET /orders`, `GET /orders/{id}` and
//! `PUT /orders/{id}/status`.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod identity;

use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::clients::OrderClient;
use identity::IdentityProvider;

#[derive(Clone)]
pub struct AppState {
    pub orders: OrderClient,
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn new(orders: OrderClient, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { orders, identity }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/orders", get(handlers::list_orders).post(handlers::create_order))
        .route("/orders/{id}", get(handlers::get_order))
        .route("/orders/{id}/status", put(handlers::update_status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
