#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tokio::sync::mpsc;

    use crate::actor_framework::{FrameworkError, ResourceRequest};
    use crate::cart_actor::CartService;
    use crate::clients::{AuthClient, CartClient, OrderClient};
    use crate::domain::{CartEntry, CartItem, Order, OrderStatus, Role, Session, User};
    use crate::messages::{AuthRequest, CartRequest};
    use crate::mock_framework::{create_mock_client, expect_create, expect_query};
    use crate::order_actor::OrderError;

    struct Harness {
        order_client: OrderClient,
        auth_rx: mpsc::Receiver<AuthRequest>,
        cart_rx: mpsc::Receiver<CartRequest>,
        order_rx: mpsc::Receiver<ResourceRequest<Order>>,
    }

    fn harness() -> Harness {
        let (auth_tx, auth_rx) = mpsc::channel(10);
        let (cart_tx, cart_rx) = mpsc::channel(10);
        let (order_inner, order_rx) = create_mock_client::<Order>(10);
        let order_client = OrderClient::new(order_inner, AuthClient::new(auth_tx), CartClient::new(cart_tx));
        Harness { order_client, auth_rx, cart_rx, order_rx }
    }

    fn cart_item(id: &str, price: f64, quantity: u32) -> CartItem {
        CartItem { id: id.into(), name: format!("item {id}"), price, image: String::new(), quantity }
    }

    #[tokio::test]
    async fn test_checkout_flow() {
        // 1. Setup Mocks
        let Harness { order_client, mut auth_rx, mut cart_rx, mut order_rx } = harness();

        // 2. Execute checkout in background
        let checkout_task = tokio::spawn(async move { order_client.checkout(Some("3".into())).await });

        // 3. Verify Interactions

        // Expect session lookup
        match auth_rx.recv().await {
            Some(AuthRequest::CurrentSession { respond_to }) => {
                let user = User::new("2", "student@example.com", "Student User", Role::Student);
                respond_to.send(Ok(Session::signed_in(user))).unwrap();
            }
            other => panic!("Expected CurrentSession, got {other:?}"),
        }

        // Expect the cart to be taken in one step
        match cart_rx.recv().await {
            Some(CartRequest::Take { respond_to }) => {
                respond_to.send(Ok(vec![cart_item("1", 10.0, 2), cart_item("7", 5.5, 1)])).unwrap();
            }
            other => panic!("Expected Take, got {other:?}"),
        }

        // Expect Order Create
        let (params, responder) = expect_create(&mut order_rx).await.expect("Expected Order Create");
        assert_eq!(params.customer_id, "2");
        assert_eq!(params.vendor_id.as_deref(), Some("3"));
        assert_eq!(params.items.len(), 2);
        assert_eq!(params.total(), 25.5);
        let order = Order {
            id: "ORD-1".into(),
            customer_id: params.customer_id.clone(),
            customer_name: params.customer_name.clone(),
            customer_email: params.customer_email.clone(),
            total: params.total(),
            items: params.items,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            vendor_id: params.vendor_id,
        };
        responder.send(Ok(order.clone())).unwrap();

        // 4. Verify Result
        let result = checkout_task.await.unwrap();
        assert_eq!(result, Ok(order));
        // Nothing else was asked of the cart
        assert!(cart_rx.try_recv().is_err());
    }

    /// Order client over a running cart, with auth and orders mocked.
    fn harness_with_cart() -> (OrderClient, CartClient, mpsc::Receiver<AuthRequest>, mpsc::Receiver<ResourceRequest<Order>>) {
        let (auth_tx, auth_rx) = mpsc::channel(10);
        let (cart_service, cart_client) = CartService::new(10);
        tokio::spawn(cart_service.run());
        let (order_inner, order_rx) = create_mock_client::<Order>(10);
        let order_client = OrderClient::new(order_inner, AuthClient::new(auth_tx), cart_client.clone());
        (order_client, cart_client, auth_rx, order_rx)
    }

    async fn answer_signed_in(auth_rx: &mut mpsc::Receiver<AuthRequest>) {
        match auth_rx.recv().await {
            Some(AuthRequest::CurrentSession { respond_to }) => {
                let user = User::new("2", "student@example.com", "Student User", Role::Student);
                respond_to.send(Ok(Session::signed_in(user))).unwrap();
            }
            other => panic!("Expected CurrentSession, got {other:?}"),
        }
    }

    fn entry(id: &str) -> CartEntry {
        CartEntry { id: id.into(), name: format!("item {id}"), price: 1.0, image: String::new() }
    }

    #[tokio::test]
    async fn test_items_added_during_checkout_stay_in_cart() {
        let (order_client, cart, mut auth_rx, mut order_rx) = harness_with_cart();
        cart.add_item(entry("a")).await.unwrap();

        let checkout_task = tokio::spawn(async move { order_client.checkout(None).await });
        answer_signed_in(&mut auth_rx).await;

        // The cart has been taken by the time the order is being created
        let (params, responder) = expect_create(&mut order_rx).await.expect("Expected Order Create");
        cart.add_item(entry("b")).await.unwrap();

        let ordered: Vec<String> = params.items.iter().map(|i| i.id.clone()).collect();
        assert_eq!(ordered, vec!["a"]);
        let order = Order {
            id: "ORD-1".into(),
            customer_id: params.customer_id.clone(),
            customer_name: params.customer_name.clone(),
            customer_email: params.customer_email.clone(),
            total: params.total(),
            items: params.items,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            vendor_id: params.vendor_id,
        };
        responder.send(Ok(order)).unwrap();
        checkout_task.await.unwrap().unwrap();

        let left: Vec<String> = cart.items().await.unwrap().into_iter().map(|i| i.id).collect();
        assert_eq!(left, vec!["b"]);
    }

    #[tokio::test]
    async fn test_failed_order_creation_restores_cart() {
        let (order_client, cart, mut auth_rx, mut order_rx) = harness_with_cart();
        cart.add_item(entry("a")).await.unwrap();
        cart.add_item(entry("a")).await.unwrap();

        let checkout_task = tokio::spawn(async move { order_client.checkout(None).await });
        answer_signed_in(&mut auth_rx).await;

        let (_params, responder) = expect_create(&mut order_rx).await.expect("Expected Order Create");
        cart.add_item(entry("b")).await.unwrap();
        drop(responder);

        let result = checkout_task.await.unwrap();
        assert_eq!(result, Err(OrderError::ActorCommunicationError(FrameworkError::ActorDropped)));

        let lines: Vec<(String, u32)> = cart.items().await.unwrap().into_iter().map(|i| (i.id, i.quantity)).collect();
        assert_eq!(lines, vec![("a".to_string(), 2), ("b".to_string(), 1)]);
    }

    #[tokio::test]
    async fn test_checkout_stops_without_session() {
        let Harness { order_client, mut auth_rx, mut cart_rx, .. } = harness();
        let checkout_task = tokio::spawn(async move { order_client.checkout(None).await });

        match auth_rx.recv().await {
            Some(AuthRequest::CurrentSession { respond_to }) => respond_to.send(Ok(Session::default())).unwrap(),
            other => panic!("Expected CurrentSession, got {other:?}"),
        }

        assert_eq!(checkout_task.await.unwrap(), Err(OrderError::NotSignedIn));
        // The cart was never consulted
        assert!(cart_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_vendor_query_filters_inside_actor() {
        let Harness { order_client, mut order_rx, .. } = harness();
        let query_task = tokio::spawn(async move { order_client.get_orders_by_vendor("3".into()).await });

        let (filter, responder) = expect_query(&mut order_rx).await.expect("Expected Order Query");
        let order = |id: &str, vendor: Option<&str>| Order {
            id: id.into(),
            customer_id: "2".into(),
            customer_name: "Student User".into(),
            customer_email: "student@example.com".into(),
            items: vec![],
            total: 0.0,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            vendor_id: vendor.map(str::to_string),
        };
        let candidates = vec![order("a", Some("3")), order("b", Some("9")), order("c", None)];
        let matching: Vec<Order> = candidates.into_iter().filter(|o| filter.matches(o)).collect();
        responder.send(Ok(matching)).unwrap();

        let result = query_task.await.unwrap().unwrap();
        assert_eq!(result.iter().map(|o| o.id.as_str()).collect::<Vec<_>>(), vec!["a"]);
    }
}
