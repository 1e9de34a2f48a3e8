use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, instrument, warn, Instrument, Span};

use crate::actor_framework::{Entity, FrameworkError, ResourceClient};
use crate::clients::{normalize_code, ProductClient, UserClient, VoucherClient};
use crate::domain::{
    merge_lines, Order, OrderItem, OrderLine, PaymentMethod, PlaceOrderRequest, Requester, ReservedLine,
    ReturnReason, ShippingInfo, StockLine,
};
use crate::notifications::{NotificationClient, OrderEvent};
use crate::order_actor::{OrderAction, OrderCreate, OrderError, TransitionOutcome};
use crate::pricing::PricingPolicy;

/// Requests cancellation of an in-flight placement.
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        let _ = self.sender.send(true);
    }
}

/// Observed by the placement workflow up to the moment the order is persisted.
#[derive(Clone)]
pub struct CancelSignal {
    receiver: watch::Receiver<bool>,
}

impl CancelSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        cancel_signal().1
    }

    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }
}

pub fn cancel_signal() -> (CancelHandle, CancelSignal) {
    let (sender, receiver) = watch::channel(false);
    (CancelHandle { sender }, CancelSignal { receiver })
}

/// Client for interacting with the Order actor.
///
/// Assembles orders from the user, catalog and voucher actors and drives the
/// lifecycle afterwards, compensating stock and voucher usage on failure.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    user_client: UserClient,
    product_client: ProductClient,
    voucher_client: VoucherClient,
    notifications: NotificationClient,
    pricing: Arc<dyn PricingPolicy>,
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        user_client: UserClient,
        product_client: ProductClient,
        voucher_client: VoucherClient,
        notifications: NotificationClient,
        pricing: Arc<dyn PricingPolicy>,
    ) -> Self {
        Self {
            inner,
            user_client,
            product_client,
            voucher_client,
            notifications,
            pricing,
        }
    }

    // -------------------------------------------------------------------------
    // Placement
    // -------------------------------------------------------------------------

    pub async fn place_order(&self, request: PlaceOrderRequest) -> Result<Order, OrderError> {
        self.place_order_with_cancel(request, CancelSignal::never()).await
    }

    /// Places an order, or leaves no lasting trace of the attempt.
    ///
    /// The workflow runs in its own task: dropping this future does not
    /// abandon a half-made reservation.
    #[instrument(skip(self, request, cancel), fields(user_id = %request.user_id, lines = request.items.len()))]
    pub async fn place_order_with_cancel(
        &self,
        request: PlaceOrderRequest,
        cancel: CancelSignal,
    ) -> Result<Order, OrderError> {
        info!("Processing place_order request (Client Side)");
        let this = self.clone();
        tokio::spawn(async move { this.run_placement(request, cancel).await }.instrument(Span::current()))
            .await
            .map_err(|e| OrderError::ActorCommunicationError(format!("Placement task failed: {}", e)))?
    }

    async fn run_placement(&self, request: PlaceOrderRequest, cancel: CancelSignal) -> Result<Order, OrderError> {
        // Step 1: Normalize lines and check the address
        let lines = validate_lines(&request.items)?;
        validate_shipping(&request.shipping)?;

        // Step 2: Validate user and products
        self.user_client.require_user(request.user_id.clone()).await?;
        for line in &lines {
            self.product_client.resolve(line.product_id.clone()).await?;
        }
        if cancel.is_cancelled() {
            info!("Placement cancelled before reservation");
            return Err(OrderError::Cancelled);
        }

        // Step 3: Reserve stock
        let stock: Vec<StockLine> = lines
            .iter()
            .map(|line| StockLine::new(line.product_id.clone(), line.quantity))
            .collect();
        let reserved = self.product_client.reserve_stock(&stock).await.map_err(|e| {
            warn!(error = %e, "Stock reservation failed");
            OrderError::from(e)
        })?;
        info!("Stock reserved successfully");

        // Step 4: Price, redeem and persist; undo the reservation on any failure
        let (order_id, committed) = match self.commit(&request, reserved, &cancel).await {
            Ok(created) => created,
            Err(e) => {
                warn!(error = %e, "Placement failed after reservation, releasing stock");
                if let Err(release_error) = self.product_client.release_stock(&stock).await {
                    error!(error = %release_error, "Compensating stock release failed");
                }
                return Err(e);
            }
        };

        // Step 5: Announce
        self.notifications.notify(OrderEvent::OrderCreated {
            order_id: order_id.clone(),
            user_id: request.user_id.clone(),
        });
        for line in &stock {
            self.notifications.notify(OrderEvent::StockAdjusted {
                product_id: line.product_id.clone(),
                delta: -i64::from(line.quantity),
            });
        }
        info!(%order_id, "Order placed");

        // The order is committed from here on; a failed read must not turn into a placement error.
        match self.fetch(order_id.clone()).await {
            Ok(order) => Ok(order),
            Err(e) => {
                warn!(error = %e, %order_id, "Reading back the placed order failed, returning the committed data");
                Order::from_create_params(order_id, committed)
            }
        }
    }

    /// Everything between reservation and commit. Un-redeems the voucher on
    /// failure; the caller releases the stock.
    async fn commit(
        &self,
        request: &PlaceOrderRequest,
        reserved: Vec<ReservedLine>,
        cancel: &CancelSignal,
    ) -> Result<(String, OrderCreate), OrderError> {
        let items: Vec<OrderItem> = reserved
            .into_iter()
            .map(|line| OrderItem::new(line.product_id, line.quantity, line.unit_price))
            .collect();
        let subtotal: Decimal = items.iter().map(|item| item.line_subtotal).sum();
        let now = Utc::now();

        let voucher_code = request
            .voucher_code
            .as_deref()
            .map(normalize_code)
            .filter(|code| !code.is_empty());

        let Some(code) = voucher_code else {
            return self.persist(request, items, Decimal::ZERO, None, cancel).await;
        };

        self.voucher_client.evaluate(&code, subtotal, now).await?;
        let discount = self.voucher_client.redeem(&code, &request.user_id, subtotal, now).await?;

        let result = self.persist(request, items, discount, Some(code.clone()), cancel).await;
        if result.is_err() {
            if let Err(e) = self.voucher_client.release(&code, &request.user_id).await {
                error!(error = %e, %code, "Compensating voucher release failed");
            }
        }
        result
    }

    async fn persist(
        &self,
        request: &PlaceOrderRequest,
        items: Vec<OrderItem>,
        discount: Decimal,
        voucher_code: Option<String>,
        cancel: &CancelSignal,
    ) -> Result<(String, OrderCreate), OrderError> {
        let subtotal: Decimal = items.iter().map(|item| item.line_subtotal).sum();
        let quote = self.pricing.quote(subtotal, discount, &request.shipping);

        if cancel.is_cancelled() {
            info!("Placement cancelled before commit");
            return Err(OrderError::Cancelled);
        }

        let params = OrderCreate {
            user_id: request.user_id.clone(),
            items,
            discount,
            tax: quote.tax,
            shipping_cost: quote.shipping_cost,
            voucher_code,
            shipping: request.shipping.clone(),
            placed_at: Utc::now(),
        };
        let order_id = self.inner.create(params.clone()).await.map_err(|e| match e {
            FrameworkError::Entity(inner) => inner,
            other => OrderError::PersistenceFailure(other.to_string()),
        })?;
        Ok((order_id, params))
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    #[instrument(skip(self))]
    pub async fn mark_paid(&self, requester: &Requester, order_id: String, method: PaymentMethod) -> Result<Order, OrderError> {
        self.apply_action(requester, order_id, OrderAction::MarkPaid { method, at: Utc::now() }).await
    }

    #[instrument(skip(self))]
    pub async fn mark_shipped(
        &self,
        requester: &Requester,
        order_id: String,
        tracking_number: Option<String>,
    ) -> Result<Order, OrderError> {
        self.apply_action(requester, order_id, OrderAction::MarkShipped { tracking_number, at: Utc::now() })
            .await
    }

    #[instrument(skip(self))]
    pub async fn mark_delivered(&self, requester: &Requester, order_id: String) -> Result<Order, OrderError> {
        self.apply_action(requester, order_id, OrderAction::MarkDelivered { at: Utc::now() }).await
    }

    /// Cancels a pending or processing order and puts its stock back.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, requester: &Requester, order_id: String) -> Result<Order, OrderError> {
        self.apply_action(requester, order_id, OrderAction::Cancel { at: Utc::now() }).await
    }

    #[instrument(skip(self, items, description))]
    pub async fn request_return(
        &self,
        requester: &Requester,
        order_id: String,
        items: Vec<OrderLine>,
        reason: ReturnReason,
        description: Option<String>,
    ) -> Result<Order, OrderError> {
        let action = OrderAction::RequestReturn {
            items,
            reason,
            description,
            at: Utc::now(),
        };
        self.apply_action(requester, order_id, action).await
    }

    #[instrument(skip(self))]
    pub async fn approve_return(&self, requester: &Requester, order_id: String) -> Result<Order, OrderError> {
        self.apply_action(requester, order_id, OrderAction::ApproveReturn { at: Utc::now() }).await
    }

    #[instrument(skip(self))]
    pub async fn reject_return(&self, requester: &Requester, order_id: String) -> Result<Order, OrderError> {
        self.apply_action(requester, order_id, OrderAction::RejectReturn { at: Utc::now() }).await
    }

    #[instrument(skip(self))]
    pub async fn complete_refund(&self, requester: &Requester, order_id: String) -> Result<Order, OrderError> {
        self.apply_action(requester, order_id, OrderAction::CompleteRefund { at: Utc::now() }).await
    }

    /// Runs one lifecycle action, then returns released stock to the catalog.
    ///
    /// Customers may only act on their own orders, and only with the
    /// actions open to them.
    pub async fn apply_action(&self, requester: &Requester, order_id: String, action: OrderAction) -> Result<Order, OrderError> {
        let order = self.fetch(order_id.clone()).await?;
        if !requester.can_access(&order.user_id) || !(requester.is_staff() || action.allowed_for_customer()) {
            warn!(%requester, action = action.event().name(), "Lifecycle action refused");
            return Err(OrderError::Unauthorized(order_id));
        }

        let TransitionOutcome { previous, order, restock } =
            self.inner.perform_action(order_id, action).await?;
        info!(order_id = %order.id, from = %previous, to = %order.status, "Order status changed");

        if let Err(e) = self.product_client.release_stock(&restock).await {
            // The transition itself is committed; only the catalog is behind.
            error!(error = %e, order_id = %order.id, "Restock after transition failed");
        } else {
            for line in &restock {
                self.notifications.notify(OrderEvent::StockAdjusted {
                    product_id: line.product_id.clone(),
                    delta: i64::from(line.quantity),
                });
            }
        }
        self.notifications.notify(OrderEvent::StatusChanged {
            order_id: order.id.clone(),
            user_id: order.user_id.clone(),
            from: previous,
            to: order.status,
        });
        Ok(order)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    #[instrument(skip(self))]
    pub async fn get_order(&self, requester: &Requester, order_id: String) -> Result<Order, OrderError> {
        let order = self.fetch(order_id.clone()).await?;
        if !requester.can_access(&order.user_id) {
            return Err(OrderError::Unauthorized(order_id));
        }
        Ok(order)
    }

    /// The item snapshot of one order.
    #[instrument(skip(self))]
    pub async fn load_items(&self, requester: &Requester, order_id: String) -> Result<Vec<OrderItem>, OrderError> {
        Ok(self.get_order(requester, order_id).await?.items)
    }

    /// Orders placed by `user_id`, newest first.
    #[instrument(skip(self))]
    pub async fn list_orders_for_user(&self, requester: &Requester, user_id: String) -> Result<Vec<Order>, OrderError> {
        if !requester.can_access(&user_id) {
            return Err(OrderError::Unauthorized(user_id));
        }
        let mut orders: Vec<Order> = self
            .inner
            .list()
            .await?
            .into_iter()
            .filter(|order| order.user_id == user_id)
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| order_seq(&b.id).cmp(&order_seq(&a.id))));
        Ok(orders)
    }

    async fn fetch(&self, order_id: String) -> Result<Order, OrderError> {
        self.inner
            .get(order_id.clone())
            .await?
            .ok_or(OrderError::NotFound(order_id))
    }
}

/// Rejects empty orders, merges repeated products and rejects zero quantities.
fn validate_lines(items: &[OrderLine]) -> Result<Vec<OrderLine>, OrderError> {
    if items.is_empty() {
        return Err(OrderError::EmptyOrder);
    }
    let lines = merge_lines(items)
        .ok_or_else(|| OrderError::ValidationError("Merged quantity out of range".to_string()))?;
    if let Some(line) = lines.iter().find(|line| line.quantity == 0) {
        return Err(OrderError::ValidationError(format!(
            "Quantity must be positive for {}",
            line.product_id
        )));
    }
    Ok(lines)
}

fn validate_shipping(shipping: &ShippingInfo) -> Result<(), OrderError> {
    let missing = shipping.missing_fields();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(OrderError::ValidationError(format!("Shipping {} required", missing.join(", "))))
    }
}

/// Tie-breaker for orders placed within the same clock tick.
fn order_seq(id: &str) -> u64 {
    id.rsplit('_').next().and_then(|n| n.parse().ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_lines() {
        assert_eq!(validate_lines(&[]), Err(OrderError::EmptyOrder));
        assert_eq!(
            validate_lines(&[OrderLine::new("a", 1), OrderLine::new("a", 2)]),
            Ok(vec![OrderLine::new("a", 3)])
        );
        assert!(matches!(
            validate_lines(&[OrderLine::new("a", 0)]),
            Err(OrderError::ValidationError(_))
        ));
        assert!(matches!(
            validate_lines(&[OrderLine::new("a", u32::MAX), OrderLine::new("a", 1)]),
            Err(OrderError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_shipping() {
        assert_eq!(
            validate_shipping(&ShippingInfo { address: "1 Main St".into(), ..Default::default() }),
            Err(OrderError::ValidationError("Shipping city, state, country, postal_code required".into()))
        );
    }

    #[tokio::test]
    async fn test_cancel_signal() {
        let (handle, signal) = cancel_signal();
        assert!(!signal.is_cancelled());
        handle.cancel();
        assert!(signal.is_cancelled());
        assert!(!CancelSignal::never().is_cancelled());
    }
}
