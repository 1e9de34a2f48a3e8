use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::Utc;
use tracing::instrument;

use super::dto::{CreateOrderRequest, ListOrdersQuery, StatusUpdate};
use super::error::ApiErrorResponse;
use super::AppState;
use crate::domain::{Order, PlaceOrderRequest, Requester};

/// The customer an order or listing belongs to. Customers act for
/// themselves; staff must name one.
fn owner(requester: &Requester, requested: Option<String>) -> Result<String, ApiErrorResponse> {
    match (requester, requested) {
        (Requester::Customer(user_id), None) => Ok(user_id.clone()),
        (Requester::Customer(user_id), Some(other)) if *user_id == other => Ok(other),
        (Requester::Customer(_), Some(_)) => Err(ApiErrorResponse::forbidden("Cannot act for another user")),
        (Requester::Staff, Some(user_id)) => Ok(user_id),
        (Requester::Staff, None) => Err(ApiErrorResponse::bad_request("user_id is required")),
    }
}

#[instrument(skip(state, headers, body))]
pub async fn create_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), ApiErrorResponse> {
    let requester = state.identity.identify(&headers)?;
    let Json(body) = body?;
    let user_id = owner(&requester, body.user_id)?;

    let order = state
        .orders
        .place_order(PlaceOrderRequest {
            user_id,
            items: body.items,
            voucher_code: body.voucher_code,
            shipping: body.shipping,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[instrument(skip(state, headers))]
pub async fn list_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<Vec<Order>>, ApiErrorResponse> {
    let requester = state.identity.identify(&headers)?;
    let user_id = owner(&requester, query.user_id)?;
    Ok(Json(state.orders.list_orders_for_user(&requester, user_id).await?))
}

#[instrument(skip(state, headers))]
pub async fn get_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiErrorResponse> {
    let requester = state.identity.identify(&headers)?;
    Ok(Json(state.orders.get_order(&requester, id).await?))
}

#[instrument(skip(state, headers, update))]
pub async fn update_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    update: Result<Json<StatusUpdate>, JsonRejection>,
) -> Result<Json<Order>, ApiErrorResponse> {
    let requester = state.identity.identify(&headers)?;
    let Json(update) = update?;
    let order = state
        .orders
        .apply_action(&requester, id, update.into_action(Utc::now()))
        .await?;
    Ok(Json(order))
}
