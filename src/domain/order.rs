use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::line_total;

/// Order lifecycle states.
///
/// `Delivered` is final unless a return is requested; `Cancelled`,
/// `ReturnRejected` and `Refunded` have no way out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    ReturnRequested,
    ReturnApproved,
    ReturnRejected,
    Refunded,
}

/// Inputs that drive the lifecycle state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Pay,
    Ship,
    Deliver,
    Cancel,
    RequestReturn,
    ApproveReturn,
    RejectReturn,
    CompleteRefund,
}

impl LifecycleEvent {
    pub fn name(self) -> &'static str {
        match self {
            LifecycleEvent::Pay => "mark paid",
            LifecycleEvent::Ship => "mark shipped",
            LifecycleEvent::Deliver => "mark delivered",
            LifecycleEvent::Cancel => "cancel",
            LifecycleEvent::RequestReturn => "request return for",
            LifecycleEvent::ApproveReturn => "approve return for",
            LifecycleEvent::RejectReturn => "reject return for",
            LifecycleEvent::CompleteRefund => "refund",
        }
    }
}

impl OrderStatus {
    /// The state reached by applying `event`, or `None` if the transition is illegal.
    pub fn apply(self, event: LifecycleEvent) -> Option<OrderStatus> {
        use LifecycleEvent as E;
        use OrderStatus::*;

        match (self, event) {
            (Pending, E::Pay) => Some(Processing),
            (Processing, E::Ship) => Some(Shipped),
            (Shipped, E::Deliver) => Some(Delivered),
            (Pending | Processing, E::Cancel) => Some(Cancelled),
            (Delivered, E::RequestReturn) => Some(ReturnRequested),
            (ReturnRequested, E::ApproveReturn) => Some(ReturnApproved),
            (ReturnRequested, E::RejectReturn) => Some(ReturnRejected),
            (ReturnApproved, E::CompleteRefund) => Some(Refunded),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::ReturnRequested => "return_requested",
            OrderStatus::ReturnApproved => "return_approved",
            OrderStatus::ReturnRejected => "return_rejected",
            OrderStatus::Refunded => "refunded",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of an order with its price captured at placement time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_subtotal: Decimal,
}

impl OrderItem {
    pub fn new(product_id: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            unit_price,
            line_subtotal: line_total(quantity, unit_price),
        }
    }
}

/// Requested line as submitted by the caller, before merging and validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: String,
    pub quantity: u32,
}

impl OrderLine {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingInfo {
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}

impl ShippingInfo {
    /// Names of the fields left blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("country", &self.country),
            ("postal_code", &self.postal_code),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Everything the assembler needs to place one order.
#[derive(Debug, Clone)]
pub struct PlaceOrderRequest {
    pub user_id: String,
    pub items: Vec<OrderLine>,
    pub voucher_code: Option<String>,
    pub shipping: ShippingInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    BankTransfer,
    EWallet,
    CashOnDelivery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub order_id: String,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub paid_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnReason {
    WrongItem,
    Damaged,
    Defective,
    NotAsDescribed,
    SizeIssue,
    QualityIssue,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnRequest {
    pub order_id: String,
    pub items: Vec<OrderLine>,
    pub reason: ReturnReason,
    pub description: Option<String>,
    pub status: ReturnStatus,
    pub requested_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Refund {
    pub order_id: String,
    pub amount: Decimal,
    pub status: RefundStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Audit record of one status change. Appended, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusTransition {
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub at: DateTime<Utc>,
}

/// Whether the stock taken at placement is still held by this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationState {
    Held,
    PartiallyReleased,
    Released,
}

/// The order aggregate: the order, its items and everything that happens to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub shipping_cost: Decimal,
    pub total_amount: Decimal,
    pub voucher_code: Option<String>,
    pub shipping: ShippingInfo,
    pub status: OrderStatus,
    pub reservation: ReservationState,
    pub tracking_number: Option<String>,
    pub payment: Option<Payment>,
    pub return_request: Option<ReturnRequest>,
    pub refund: Option<Refund>,
    pub history: Vec<StatusTransition>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub shipped_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn item(&self, product_id: &str) -> Option<&OrderItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }
}

/// Collapses repeated product ids into one line each, summing quantities and
/// keeping first-seen order. `None` if a summed quantity overflows.
pub fn merge_lines(lines: &[OrderLine]) -> Option<Vec<OrderLine>> {
    let mut merged: Vec<OrderLine> = Vec::with_capacity(lines.len());
    for line in lines {
        match merged.iter_mut().find(|m| m.product_id == line.product_id) {
            Some(existing) => existing.quantity = existing.quantity.checked_add(line.quantity)?,
            None => merged.push(line.clone()),
        }
    }
    Some(merged)
}

/// total = subtotal - discount + tax + shipping
pub fn order_total(subtotal: Decimal, discount: Decimal, tax: Decimal, shipping_cost: Decimal) -> Decimal {
    subtotal - discount + tax + shipping_cost
}
