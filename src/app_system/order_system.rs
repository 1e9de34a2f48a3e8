use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{error, info};

use crate::actor_framework::ResourceActor;
use crate::clients::{normalize_code, OrderClient, ProductClient, UserClient, VoucherClient};
use crate::config::AppConfig;
use crate::domain::{Order, Product, User, UserCreate, Voucher};
use crate::notifications::NotificationService;
use crate::pricing::PricingPolicy;
use crate::order_actor::OrderCreate;
use crate::product_actor::ProductCreate;
use crate::voucher_actor::VoucherCreate;

fn sequential_ids<P: 'static>(prefix: &'static str) -> impl Fn(&P) -> String + Send + Sync + 'static {
    let counter = AtomicU64::new(1);
    move |_: &P| format!("{}_{}", prefix, counter.fetch_add(1, Ordering::SeqCst))
}

/// The main application system that orchestrates all actors.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct OrderSystem {
    pub order_client: OrderClient,
    pub user_client: UserClient,
    pub product_client: ProductClient,
    pub voucher_client: VoucherClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl OrderSystem {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_pricing(config, config.pricing())
    }

    pub fn with_pricing(config: &AppConfig, pricing: Arc<dyn PricingPolicy>) -> Self {
        let buffer = config.mailbox_size;

        // 1. Users
        let (user_actor, user_resource_client) =
            ResourceActor::<User>::new("users", buffer, sequential_ids::<UserCreate>("user"));
        let user_client = UserClient::new(user_resource_client);
        let user_handle = tokio::spawn(user_actor.run());

        // 2. Products
        let (product_actor, product_resource_client) =
            ResourceActor::<Product>::new("products", buffer, sequential_ids::<ProductCreate>("product"));
        let product_client = ProductClient::new(product_resource_client);
        let product_handle = tokio::spawn(product_actor.run());

        // 3. Vouchers, keyed by code
        let (voucher_actor, voucher_resource_client) =
            ResourceActor::<Voucher>::new("vouchers", buffer, |params: &VoucherCreate| normalize_code(&params.code));
        let voucher_client = VoucherClient::new(voucher_resource_client);
        let voucher_handle = tokio::spawn(voucher_actor.run());

        // 4. Notifications
        let (notification_service, notifications) = NotificationService::new(config.notification_buffer);
        let notification_handle = tokio::spawn(notification_service.run());

        // 5. Orders
        let (order_actor, order_resource_client) =
            ResourceActor::<Order>::new("orders", buffer, sequential_ids::<OrderCreate>("order"));
        let order_client = OrderClient::new(
            order_resource_client,
            user_client.clone(),
            product_client.clone(),
            voucher_client.clone(),
            notifications,
            pricing,
        );
        let order_handle = tokio::spawn(order_actor.run());

        info!("Order system started");
        Self {
            order_client,
            user_client,
            product_client,
            voucher_client,
            handles: vec![user_handle, product_handle, voucher_handle, notification_handle, order_handle],
        }
    }

    /// Drops every client so the actors see their channels close, then
    /// waits for them to drain.
    ///
    /// Clients cloned out of the system (for example into HTTP state) must
    /// be dropped first or this waits for them.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.order_client);
        drop(self.user_client);
        drop(self.product_client);
        drop(self.voucher_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
