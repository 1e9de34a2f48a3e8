#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;
    use std::collections::BTreeSet;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    use crate::actor_framework::{FrameworkError, ResourceActor};
    use crate::app_system::OrderSystem;
    use crate::clients::{cancel_signal, OrderClient};
    use crate::config::AppConfig;
    use crate::domain::{
        DiscountType, Order, OrderLine, OrderStatus, PaymentMethod, PlaceOrderRequest, Requester, ReturnReason,
        ShippingInfo, UserCreate, Voucher,
    };
    use crate::mock_framework::{create_mock_client, expect_action, expect_create, expect_get};
    use crate::notifications::{NotificationClient, OrderEvent};
    use crate::order_actor::{ErrorKind, OrderCreate, OrderError};
    use crate::pricing::{FlatRatePricing, PricingPolicy, ZeroPricing};
    use crate::product_actor::{ProductCreate, ProductPatch};
    use crate::voucher_actor::{VoucherAction, VoucherActionResult, VoucherCreate};
    use crate::clients::VoucherClient;

    struct Shop {
        system: OrderSystem,
        user_id: String,
    }

    impl Shop {
        async fn open() -> Self {
            Self::open_with(&AppConfig::default()).await
        }

        async fn open_with(config: &AppConfig) -> Self {
            let system = OrderSystem::new(config);
            let user_id = system
                .user_client
                .create_user(UserCreate::new("Alice", "alice@example.com"))
                .await
                .unwrap();
            Self { system, user_id }
        }

        async fn product(&self, price: Decimal, stock: u32) -> String {
            self.system
                .product_client
                .create_product(ProductCreate::new("Item", price, stock))
                .await
                .unwrap()
        }

        async fn stock(&self, product_id: &str) -> u32 {
            self.system.product_client.resolve(product_id.to_string()).await.unwrap().stock
        }

        async fn voucher(&self, code: &str, value: Decimal, cap: Option<Decimal>, limit: Option<u32>) {
            let now = Utc::now();
            self.system
                .voucher_client
                .create_voucher(VoucherCreate {
                    code: code.to_string(),
                    discount_type: DiscountType::Percentage,
                    value,
                    min_purchase: Decimal::ZERO,
                    max_discount: cap,
                    usage_limit: limit,
                    starts_at: now - Duration::hours(1),
                    ends_at: now + Duration::hours(1),
                    active: true,
                    single_use_per_user: false,
                })
                .await
                .unwrap();
        }

        async fn usage(&self, code: &str) -> u32 {
            self.system.voucher_client.get_voucher(code.to_string()).await.unwrap().unwrap().usage_count
        }

        fn request(&self, items: Vec<OrderLine>, voucher_code: Option<&str>) -> PlaceOrderRequest {
            PlaceOrderRequest {
                user_id: self.user_id.clone(),
                items,
                voucher_code: voucher_code.map(str::to_string),
                shipping: address(),
            }
        }

        fn customer(&self) -> Requester {
            Requester::customer(self.user_id.clone())
        }
    }

    fn address() -> ShippingInfo {
        ShippingInfo {
            address: "1 Main St".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            country: "US".into(),
            postal_code: "62701".into(),
        }
    }

    fn order_client_with(
        shop: &Shop,
        orders: crate::actor_framework::ResourceClient<Order>,
        vouchers: VoucherClient,
    ) -> (OrderClient, mpsc::Receiver<OrderEvent>) {
        let (sender, events) = mpsc::channel(64);
        let client = OrderClient::new(
            orders,
            shop.system.user_client.clone(),
            shop.system.product_client.clone(),
            vouchers,
            NotificationClient::new(sender),
            Arc::new(ZeroPricing),
        );
        (client, events)
    }

    #[tokio::test]
    async fn test_line_totals_and_price_snapshot() {
        let shop = Shop::open().await;
        let mug = shop.product(Decimal::new(999, 2), 10).await;

        let order = shop
            .system
            .order_client
            .place_order(shop.request(vec![OrderLine::new(mug.clone(), 2)], None))
            .await
            .unwrap();
        assert_eq!(order.subtotal, Decimal::new(1998, 2));
        assert_eq!(order.total_amount, Decimal::new(1998, 2));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(shop.stock(&mug).await, 8);

        let patch = ProductPatch { price: Some(Decimal::new(500, 2)), ..ProductPatch::default() };
        shop.system.product_client.update_product(mug, patch).await.unwrap();

        let items = shop.system.order_client.load_items(&shop.customer(), order.id).await.unwrap();
        assert_eq!(items[0].unit_price, Decimal::new(999, 2));
        assert_eq!(items[0].line_subtotal, Decimal::new(1998, 2));
    }

    #[tokio::test]
    async fn test_duplicate_lines_are_merged() {
        let shop = Shop::open().await;
        let mug = shop.product(Decimal::ONE, 10).await;
        let order = shop
            .system
            .order_client
            .place_order(shop.request(vec![OrderLine::new(mug.clone(), 2), OrderLine::new(mug.clone(), 3)], None))
            .await
            .unwrap();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 5);
        assert_eq!(shop.stock(&mug).await, 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_two_buyers_one_stock() {
        let shop = Shop::open().await;
        let item = shop.product(Decimal::ONE, 10).await;

        let a = shop.system.order_client.place_order(shop.request(vec![OrderLine::new(item.clone(), 7)], None));
        let b = shop.system.order_client.place_order(shop.request(vec![OrderLine::new(item.clone(), 7)], None));
        let (a, b) = tokio::join!(a, b);

        let results = [a, b];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        let loser = results.iter().find_map(|r| r.as_ref().err()).unwrap();
        assert!(matches!(loser, OrderError::InsufficientStock { requested: 7, available: 3, .. }));
        assert_eq!(shop.stock(&item).await, 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_contention_yields_floor_winners() {
        let shop = Shop::open().await;
        let item = shop.product(Decimal::ONE, 20).await;

        let mut tasks = Vec::new();
        for _ in 0..12 {
            let client = shop.system.order_client.clone();
            let request = shop.request(vec![OrderLine::new(item.clone(), 3)], None);
            tasks.push(tokio::spawn(async move { client.place_order(request).await }));
        }
        let mut winners = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                winners += 1;
            }
        }
        assert_eq!(winners, 6);
        assert_eq!(shop.stock(&item).await, 2);
    }

    #[tokio::test]
    async fn test_voucher_discount_is_capped() {
        let shop = Shop::open().await;
        let item = shop.product(Decimal::new(2500, 2), 10).await;
        shop.voucher("SAVE10", Decimal::new(10, 0), Some(Decimal::new(500, 2)), None).await;

        let order = shop
            .system
            .order_client
            .place_order(shop.request(vec![OrderLine::new(item, 4)], Some("save10")))
            .await
            .unwrap();
        assert_eq!(order.subtotal, Decimal::new(10000, 2));
        assert_eq!(order.discount, Decimal::new(500, 2));
        assert_eq!(order.total_amount, Decimal::new(9500, 2));
        assert_eq!(order.voucher_code.as_deref(), Some("SAVE10"));
        assert_eq!(shop.usage("SAVE10").await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_voucher_limit_under_contention() {
        let shop = Shop::open().await;
        let item = shop.product(Decimal::TEN, 100).await;
        shop.voucher("ONCE", Decimal::new(10, 0), None, Some(1)).await;

        let mut tasks = Vec::new();
        for _ in 0..5 {
            let client = shop.system.order_client.clone();
            let request = shop.request(vec![OrderLine::new(item.clone(), 1)], Some("ONCE"));
            tasks.push(tokio::spawn(async move { client.place_order(request).await }));
        }
        let mut placed = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => placed += 1,
                Err(e) => assert_eq!(e, OrderError::UsageLimitExceeded("ONCE".into())),
            }
        }
        assert_eq!(placed, 1);
        assert_eq!(shop.usage("ONCE").await, 1);
        assert_eq!(shop.stock(&item).await, 99);
    }

    #[tokio::test]
    async fn test_voucher_rejection_releases_stock() {
        let shop = Shop::open().await;
        let item = shop.product(Decimal::TEN, 5).await;
        let now = Utc::now();
        shop.system
            .voucher_client
            .create_voucher(VoucherCreate {
                code: "BIG".into(),
                discount_type: DiscountType::FixedAmount,
                value: Decimal::TEN,
                min_purchase: Decimal::new(100, 0),
                max_discount: None,
                usage_limit: None,
                starts_at: now - Duration::hours(1),
                ends_at: now + Duration::hours(1),
                active: true,
                single_use_per_user: false,
            })
            .await
            .unwrap();

        let err = shop
            .system
            .order_client
            .place_order(shop.request(vec![OrderLine::new(item.clone(), 2)], Some("BIG")))
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::MinimumPurchaseNotMet { .. }));
        assert_eq!(shop.stock(&item).await, 5);
        assert_eq!(shop.usage("BIG").await, 0);

        let err = shop
            .system
            .order_client
            .place_order(shop.request(vec![OrderLine::new(item.clone(), 2)], Some("NOPE")))
            .await
            .unwrap_err();
        assert_eq!(err, OrderError::VoucherNotFound("NOPE".into()));
        assert_eq!(shop.stock(&item).await, 5);
    }

    #[tokio::test]
    async fn test_single_use_voucher_once_per_customer() {
        let shop = Shop::open().await;
        let item = shop.product(Decimal::TEN, 10).await;
        let now = Utc::now();
        shop.system
            .voucher_client
            .create_voucher(VoucherCreate {
                code: "WELCOME".into(),
                discount_type: DiscountType::FixedAmount,
                value: Decimal::new(3, 0),
                min_purchase: Decimal::ZERO,
                max_discount: None,
                usage_limit: None,
                starts_at: now - Duration::hours(1),
                ends_at: now + Duration::hours(1),
                active: true,
                single_use_per_user: true,
            })
            .await
            .unwrap();
        let client = &shop.system.order_client;

        let first = client.place_order(shop.request(vec![OrderLine::new(item.clone(), 1)], Some("welcome"))).await.unwrap();
        assert_eq!(first.discount, Decimal::new(3, 0));

        let err = client
            .place_order(shop.request(vec![OrderLine::new(item.clone(), 1)], Some("WELCOME")))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            OrderError::VoucherAlreadyRedeemed { code: "WELCOME".into(), user_id: shop.user_id.clone() }
        );
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(shop.stock(&item).await, 9);
        assert_eq!(shop.usage("WELCOME").await, 1);

        let bob = shop.system.user_client.create_user(UserCreate::new("Bob", "bob@example.com")).await.unwrap();
        let mut theirs = shop.request(vec![OrderLine::new(item, 1)], Some("WELCOME"));
        theirs.user_id = bob;
        assert!(client.place_order(theirs).await.is_ok());
        assert_eq!(shop.usage("WELCOME").await, 2);
    }

    #[tokio::test]
    async fn test_rejected_before_reservation() {
        let shop = Shop::open().await;
        let item = shop.product(Decimal::ONE, 5).await;
        let client = &shop.system.order_client;

        assert_eq!(client.place_order(shop.request(vec![], None)).await, Err(OrderError::EmptyOrder));
        assert_eq!(
            client.place_order(shop.request(vec![OrderLine::new("product_404", 1)], None)).await,
            Err(OrderError::ProductNotFound("product_404".into()))
        );

        let mut stranger = shop.request(vec![OrderLine::new(item.clone(), 1)], None);
        stranger.user_id = "user_404".into();
        assert_eq!(client.place_order(stranger).await, Err(OrderError::UserNotFound("user_404".into())));

        let mut nowhere = shop.request(vec![OrderLine::new(item.clone(), 1)], None);
        nowhere.shipping.postal_code = " ".into();
        assert!(matches!(client.place_order(nowhere).await, Err(OrderError::ValidationError(_))));

        let patch = ProductPatch { active: Some(false), ..ProductPatch::default() };
        shop.system.product_client.update_product(item.clone(), patch).await.unwrap();
        assert_eq!(
            client.place_order(shop.request(vec![OrderLine::new(item.clone(), 1)], None)).await,
            Err(OrderError::ProductInactive(item.clone()))
        );
        assert_eq!(shop.stock(&item).await, 5);
    }

    #[tokio::test]
    async fn test_pricing_policy_applies_tax_and_shipping() {
        let config = AppConfig {
            tax_rate: Decimal::new(10, 2),
            shipping_cost: Decimal::new(499, 2),
            ..AppConfig::default()
        };
        let shop = Shop::open_with(&config).await;
        let item = shop.product(Decimal::new(2000, 2), 5).await;
        shop.voucher("SAVE10", Decimal::new(10, 0), None, None).await;

        let order = shop
            .system
            .order_client
            .place_order(shop.request(vec![OrderLine::new(item, 1)], Some("SAVE10")))
            .await
            .unwrap();
        // 20.00 - 2.00 + 1.80 tax + 4.99 shipping
        assert_eq!(order.tax, Decimal::new(180, 2));
        assert_eq!(order.shipping_cost, Decimal::new(499, 2));
        assert_eq!(order.total_amount, Decimal::new(2479, 2));

        let flat = FlatRatePricing {
            tax_rate: config.tax_rate,
            shipping_cost: config.shipping_cost,
            free_shipping_threshold: None,
        };
        assert_eq!(flat.quote(order.subtotal, order.discount, &order.shipping).tax, order.tax);
    }

    #[tokio::test]
    async fn test_cancel_from_processing_restocks() {
        let shop = Shop::open().await;
        let item = shop.product(Decimal::ONE, 10).await;
        let client = &shop.system.order_client;
        let me = shop.customer();

        let order = client.place_order(shop.request(vec![OrderLine::new(item.clone(), 4)], None)).await.unwrap();
        client.mark_paid(&me, order.id.clone(), PaymentMethod::CreditCard).await.unwrap();
        assert_eq!(shop.stock(&item).await, 6);

        let cancelled = client.cancel_order(&me, order.id.clone()).await.unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);
        assert_eq!(shop.stock(&item).await, 10);

        // A second cancel is an invalid transition and restocks nothing.
        let err = client.cancel_order(&me, order.id).await.unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition { from: OrderStatus::Cancelled, .. }));
        assert_eq!(shop.stock(&item).await, 10);
    }

    #[tokio::test]
    async fn test_deliver_from_pending_fails() {
        let shop = Shop::open().await;
        let item = shop.product(Decimal::ONE, 10).await;
        let client = &shop.system.order_client;

        let order = client.place_order(shop.request(vec![OrderLine::new(item, 1)], None)).await.unwrap();
        let err = client.mark_delivered(&Requester::Staff, order.id.clone()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let order = client.get_order(&Requester::Staff, order.id).await.unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.history.is_empty());
    }

    #[tokio::test]
    async fn test_return_and_refund_flow() {
        let shop = Shop::open().await;
        let a = shop.product(Decimal::new(1000, 2), 10).await;
        let b = shop.product(Decimal::new(500, 2), 10).await;
        let client = &shop.system.order_client;
        let me = shop.customer();
        let staff = Requester::Staff;

        let order = client
            .place_order(shop.request(vec![OrderLine::new(a.clone(), 2), OrderLine::new(b.clone(), 1)], None))
            .await
            .unwrap();
        let id = order.id.clone();
        client.mark_paid(&me, id.clone(), PaymentMethod::BankTransfer).await.unwrap();
        client.mark_shipped(&staff, id.clone(), Some("TRACK-1".into())).await.unwrap();
        client.mark_delivered(&staff, id.clone()).await.unwrap();

        let requested = client
            .request_return(&me, id.clone(), vec![OrderLine::new(a.clone(), 1)], ReturnReason::Damaged, None)
            .await
            .unwrap();
        assert_eq!(requested.status, OrderStatus::ReturnRequested);

        assert!(matches!(
            client.approve_return(&me, id.clone()).await,
            Err(OrderError::Unauthorized(_))
        ));

        let approved = client.approve_return(&staff, id.clone()).await.unwrap();
        assert_eq!(approved.refund.as_ref().unwrap().amount, Decimal::new(1000, 2));
        assert_eq!(shop.stock(&a).await, 9);
        assert_eq!(shop.stock(&b).await, 9);

        let refunded = client.complete_refund(&staff, id).await.unwrap();
        assert_eq!(refunded.status, OrderStatus::Refunded);
        let path: Vec<_> = refunded.history.iter().map(|t| t.to).collect();
        assert_eq!(
            path,
            vec![
                OrderStatus::Processing,
                OrderStatus::Shipped,
                OrderStatus::Delivered,
                OrderStatus::ReturnRequested,
                OrderStatus::ReturnApproved,
                OrderStatus::Refunded,
            ]
        );
    }

    #[tokio::test]
    async fn test_customers_only_see_their_orders() {
        let shop = Shop::open().await;
        let item = shop.product(Decimal::ONE, 10).await;
        let client = &shop.system.order_client;
        let first = client.place_order(shop.request(vec![OrderLine::new(item.clone(), 1)], None)).await.unwrap();
        let second = client.place_order(shop.request(vec![OrderLine::new(item, 1)], None)).await.unwrap();

        let intruder = Requester::customer("user_99");
        assert_eq!(
            client.get_order(&intruder, first.id.clone()).await,
            Err(OrderError::Unauthorized(first.id.clone()))
        );
        assert!(client.cancel_order(&intruder, first.id.clone()).await.is_err());
        assert!(client.list_orders_for_user(&intruder, shop.user_id.clone()).await.is_err());

        let mine = client.list_orders_for_user(&shop.customer(), shop.user_id.clone()).await.unwrap();
        let ids: Vec<_> = mine.iter().map(|o| o.id.clone()).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_persistence_failure_rolls_back() {
        let shop = Shop::open().await;
        let item = shop.product(Decimal::new(2000, 2), 5).await;
        shop.voucher("SAVE10", Decimal::new(10, 0), None, Some(10)).await;

        let (orders, mut order_rx) = create_mock_client::<Order>(4);
        let (client, _events) = order_client_with(&shop, orders, shop.system.voucher_client.clone());

        let request = shop.request(vec![OrderLine::new(item.clone(), 3)], Some("SAVE10"));
        let placement = tokio::spawn(async move { client.place_order(request).await });

        let (params, responder): (OrderCreate, _) = expect_create(&mut order_rx).await.expect("Expected Order Create");
        assert_eq!(params.discount, Decimal::new(600, 2));
        responder.send(Err(FrameworkError::ActorDropped)).unwrap();

        let err = placement.await.unwrap().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Persistence);
        assert_eq!(shop.stock(&item).await, 5);
        assert_eq!(shop.usage("SAVE10").await, 0);
    }

    #[tokio::test]
    async fn test_failed_read_back_still_returns_placed_order() {
        let shop = Shop::open().await;
        let item = shop.product(Decimal::new(250, 2), 5).await;

        let (orders, mut order_rx) = create_mock_client::<Order>(4);
        let (client, mut events) = order_client_with(&shop, orders, shop.system.voucher_client.clone());

        let request = shop.request(vec![OrderLine::new(item.clone(), 2)], None);
        let placement = tokio::spawn(async move { client.place_order(request).await });

        let (_, responder): (OrderCreate, _) = expect_create(&mut order_rx).await.expect("Expected Order Create");
        responder.send(Ok("order_7".to_string())).unwrap();
        let (id, responder) = expect_get(&mut order_rx).await.expect("Expected Order Get");
        assert_eq!(id, "order_7");
        responder.send(Err(FrameworkError::ActorDropped)).unwrap();

        let order = placement.await.unwrap().unwrap();
        assert_eq!(order.id, "order_7");
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, Decimal::new(500, 2));
        assert_eq!(order.shipping, address());
        assert_eq!(shop.stock(&item).await, 3);
        assert!(matches!(events.recv().await, Some(OrderEvent::OrderCreated { .. })));
    }

    #[tokio::test]
    async fn test_cancel_signal_after_reservation_compensates() {
        let shop = Shop::open().await;
        let item = shop.product(Decimal::TEN, 5).await;

        let (vouchers, mut voucher_rx) = create_mock_client::<Voucher>(4);
        let (orders, mut order_rx) = create_mock_client::<Order>(4);
        let (client, _events) = order_client_with(&shop, orders, VoucherClient::new(vouchers));

        let (handle, signal) = cancel_signal();
        let request = shop.request(vec![OrderLine::new(item.clone(), 2)], Some("MOCK"));
        let placement = tokio::spawn(async move { client.place_order_with_cancel(request, signal).await });

        // Stock is held while the voucher lookup is outstanding.
        let (code, responder) = expect_get(&mut voucher_rx).await.expect("Expected Voucher Get");
        assert_eq!(code, "MOCK");
        assert_eq!(shop.stock(&item).await, 3);
        handle.cancel();

        let now = Utc::now();
        let voucher = Voucher {
            code: "MOCK".into(),
            discount_type: DiscountType::FixedAmount,
            value: Decimal::ONE,
            min_purchase: Decimal::ZERO,
            max_discount: None,
            usage_limit: None,
            usage_count: 0,
            starts_at: now - Duration::hours(1),
            ends_at: now + Duration::hours(1),
            active: true,
            single_use_per_user: false,
            redeemed_by: BTreeSet::new(),
        };
        responder.send(Ok(Some(voucher))).unwrap();

        let (_, action, responder) = expect_action(&mut voucher_rx).await.expect("Expected Redeem");
        assert!(matches!(action, VoucherAction::Redeem { .. }));
        responder.send(Ok(VoucherActionResult::Redeem(Decimal::ONE))).unwrap();

        let (_, action, responder) = expect_action(&mut voucher_rx).await.expect("Expected Release");
        assert!(matches!(action, VoucherAction::Release { .. }));
        responder.send(Ok(VoucherActionResult::Release(0))).unwrap();

        assert_eq!(placement.await.unwrap(), Err(OrderError::Cancelled));
        assert_eq!(shop.stock(&item).await, 5);
        assert!(order_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_cancel_signal_before_start() {
        let shop = Shop::open().await;
        let item = shop.product(Decimal::TEN, 5).await;
        let (handle, signal) = cancel_signal();
        handle.cancel();

        let result = shop
            .system
            .order_client
            .place_order_with_cancel(shop.request(vec![OrderLine::new(item.clone(), 2)], None), signal)
            .await;
        assert_eq!(result, Err(OrderError::Cancelled));
        assert_eq!(shop.stock(&item).await, 5);
    }

    #[tokio::test]
    async fn test_notifications_follow_the_order() {
        let shop = Shop::open().await;
        let item = shop.product(Decimal::ONE, 5).await;
        let (actor, orders) = ResourceActor::<Order>::new("orders", 8, |_: &OrderCreate| "order_1".to_string());
        tokio::spawn(actor.run());
        let (client, mut events) = order_client_with(&shop, orders, shop.system.voucher_client.clone());

        let order = client.place_order(shop.request(vec![OrderLine::new(item.clone(), 2)], None)).await.unwrap();
        assert_eq!(
            events.recv().await,
            Some(OrderEvent::OrderCreated { order_id: order.id.clone(), user_id: shop.user_id.clone() })
        );
        assert_eq!(events.recv().await, Some(OrderEvent::StockAdjusted { product_id: item.clone(), delta: -2 }));

        client.cancel_order(&shop.customer(), order.id.clone()).await.unwrap();
        assert_eq!(events.recv().await, Some(OrderEvent::StockAdjusted { product_id: item, delta: 2 }));
        assert_eq!(
            events.recv().await,
            Some(OrderEvent::StatusChanged {
                order_id: order.id,
                user_id: shop.user_id.clone(),
                from: OrderStatus::Pending,
                to: OrderStatus::Cancelled,
            })
        );
    }
}
