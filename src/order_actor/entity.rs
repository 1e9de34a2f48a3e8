use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::actor_framework::Entity;
use crate::domain::{
    line_total, merge_lines, order_total, round_money, Order, OrderLine, OrderStatus, Payment,
    PaymentStatus, Refund, RefundStatus, ReservationState, ReturnRequest, ReturnStatus,
    StatusTransition, StockLine,
};
use super::actions::{OrderAction, TransitionOutcome};
use super::dtos::OrderCreate;
use super::error::OrderError;

impl OrderAction {
    fn at(&self) -> DateTime<Utc> {
        match self {
            OrderAction::MarkPaid { at, .. }
            | OrderAction::MarkShipped { at, .. }
            | OrderAction::MarkDelivered { at }
            | OrderAction::Cancel { at }
            | OrderAction::RequestReturn { at, .. }
            | OrderAction::ApproveReturn { at }
            | OrderAction::RejectReturn { at }
            | OrderAction::CompleteRefund { at } => *at,
        }
    }
}

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type Patch = ();
    type Action = OrderAction;
    type ActionResult = TransitionOutcome;
    type Error = OrderError;

    /// Builds the order aggregate in `Pending` with its stock reservation held.
    ///
    /// # Errors
    /// Rejects aggregates that break the pricing invariants: no items, zero
    /// quantities, repeated products, a discount outside `0..=subtotal`,
    /// negative tax or shipping.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        let mut seen = HashSet::new();
        for item in &params.items {
            if item.quantity == 0 {
                return Err(OrderError::ValidationError(format!("Zero quantity for {}", item.product_id)));
            }
            if !seen.insert(item.product_id.as_str()) {
                return Err(OrderError::ValidationError(format!("Duplicate line for {}", item.product_id)));
            }
        }

        let subtotal: Decimal = params.items.iter().map(|item| item.line_subtotal).sum();
        if params.discount.is_sign_negative() || params.discount > subtotal {
            return Err(OrderError::ValidationError(format!(
                "Discount {} outside 0..={}",
                params.discount, subtotal
            )));
        }
        if params.tax.is_sign_negative() || params.shipping_cost.is_sign_negative() {
            return Err(OrderError::ValidationError("Tax and shipping must not be negative".to_string()));
        }
        let total_amount = order_total(subtotal, params.discount, params.tax, params.shipping_cost);

        Ok(Self {
            id,
            user_id: params.user_id,
            items: params.items,
            subtotal,
            discount: params.discount,
            tax: params.tax,
            shipping_cost: params.shipping_cost,
            total_amount,
            voucher_code: params.voucher_code,
            shipping: params.shipping,
            status: OrderStatus::Pending,
            reservation: ReservationState::Held,
            tracking_number: None,
            payment: None,
            return_request: None,
            refund: None,
            history: Vec::new(),
            created_at: params.placed_at,
            updated_at: params.placed_at,
            paid_at: None,
            shipped_at: None,
            delivered_at: None,
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), OrderError> {
        Err(OrderError::ValidationError(
            "Orders change only through lifecycle actions".to_string(),
        ))
    }

    /// Applies one lifecycle step.
    ///
    /// The status check happens first; an illegal step returns
    /// `InvalidTransition` without touching anything.
    fn handle_action(&mut self, action: OrderAction) -> Result<TransitionOutcome, OrderError> {
        let event = action.event();
        let at = action.at();
        let previous = self.status;
        let next = previous.apply(event).ok_or(OrderError::InvalidTransition {
            from: previous,
            action: event.name(),
        })?;

        let restock = match action {
            OrderAction::MarkPaid { method, at } => {
                self.payment = Some(Payment {
                    order_id: self.id.clone(),
                    amount: self.total_amount,
                    method,
                    status: PaymentStatus::Completed,
                    paid_at: at,
                });
                self.paid_at = Some(at);
                Vec::new()
            }
            OrderAction::MarkShipped { tracking_number, at } => {
                self.tracking_number = tracking_number;
                self.shipped_at = Some(at);
                Vec::new()
            }
            OrderAction::MarkDelivered { at } => {
                self.delivered_at = Some(at);
                Vec::new()
            }
            OrderAction::Cancel { .. } => {
                if let Some(payment) = self.payment.as_mut() {
                    payment.status = PaymentStatus::Refunded;
                }
                self.release_all()
            }
            OrderAction::RequestReturn { items, reason, description, at } => {
                let items = self.validate_return(&items)?;
                self.return_request = Some(ReturnRequest {
                    order_id: self.id.clone(),
                    items,
                    reason,
                    description,
                    status: ReturnStatus::Pending,
                    requested_at: at,
                    decided_at: None,
                });
                Vec::new()
            }
            OrderAction::ApproveReturn { at } => self.approve_return(at)?,
            OrderAction::RejectReturn { at } => {
                let request = self.pending_return()?;
                request.status = ReturnStatus::Rejected;
                request.decided_at = Some(at);
                Vec::new()
            }
            OrderAction::CompleteRefund { at } => {
                let refund = self
                    .refund
                    .as_mut()
                    .ok_or_else(|| OrderError::InvalidReturn(format!("No refund recorded for {}", self.id)))?;
                refund.status = RefundStatus::Completed;
                refund.completed_at = Some(at);
                if let Some(payment) = self.payment.as_mut() {
                    payment.status = PaymentStatus::Refunded;
                }
                Vec::new()
            }
        };

        self.status = next;
        self.updated_at = at;
        self.history.push(StatusTransition { from: previous, to: next, at });

        Ok(TransitionOutcome {
            previous,
            order: self.clone(),
            restock,
        })
    }
}

impl Order {
    /// Gives back everything still held. Empty once released, so stock is
    /// never returned twice.
    fn release_all(&mut self) -> Vec<StockLine> {
        if self.reservation != ReservationState::Held {
            return Vec::new();
        }
        self.reservation = ReservationState::Released;
        self.items
            .iter()
            .map(|item| StockLine::new(item.product_id.clone(), item.quantity))
            .collect()
    }

    fn validate_return(&self, lines: &[OrderLine]) -> Result<Vec<OrderLine>, OrderError> {
        let merged = merge_lines(lines)
            .ok_or_else(|| OrderError::InvalidReturn("Returned quantity out of range".to_string()))?;
        if merged.is_empty() {
            return Err(OrderError::InvalidReturn("No items to return".to_string()));
        }
        for line in &merged {
            let item = self.item(&line.product_id).ok_or_else(|| {
                OrderError::InvalidReturn(format!("{} is not part of order {}", line.product_id, self.id))
            })?;
            if line.quantity == 0 || line.quantity > item.quantity {
                return Err(OrderError::InvalidReturn(format!(
                    "Cannot return {} of {} (ordered {})",
                    line.quantity, line.product_id, item.quantity
                )));
            }
        }
        Ok(merged)
    }

    fn pending_return(&mut self) -> Result<&mut ReturnRequest, OrderError> {
        let id = self.id.clone();
        self.return_request
            .as_mut()
            .filter(|request| request.status == ReturnStatus::Pending)
            .ok_or_else(|| OrderError::InvalidReturn(format!("No pending return for {}", id)))
    }

    fn approve_return(&mut self, at: DateTime<Utc>) -> Result<Vec<StockLine>, OrderError> {
        let request = self.pending_return()?;
        request.status = ReturnStatus::Approved;
        request.decided_at = Some(at);
        let lines = request.items.clone();

        let amount = self.refund_amount(&lines);
        self.refund = Some(Refund {
            order_id: self.id.clone(),
            amount,
            status: RefundStatus::Pending,
            created_at: at,
            completed_at: None,
        });

        if self.reservation == ReservationState::Held {
            let returns_everything = self.items.iter().all(|item| {
                lines
                    .iter()
                    .any(|line| line.product_id == item.product_id && line.quantity == item.quantity)
            });
            self.reservation = if returns_everything {
                ReservationState::Released
            } else {
                ReservationState::PartiallyReleased
            };
            Ok(lines
                .into_iter()
                .map(|line| StockLine::new(line.product_id, line.quantity))
                .collect())
        } else {
            Ok(Vec::new())
        }
    }

    /// Returned goods minus their share of the order discount. A full return
    /// refunds everything that was paid.
    fn refund_amount(&self, lines: &[OrderLine]) -> Decimal {
        let paid = self
            .payment
            .as_ref()
            .map_or(self.total_amount, |payment| payment.amount);

        let returned: Decimal = lines
            .iter()
            .filter_map(|line| self.item(&line.product_id).map(|item| line_total(line.quantity, item.unit_price)))
            .sum();
        if returned == self.subtotal {
            return paid;
        }

        let discount_share = if self.subtotal.is_zero() {
            Decimal::ZERO
        } else {
            self.discount * returned / self.subtotal
        };
        round_money(returned - discount_share).min(paid).max(Decimal::ZERO)
    }
}
