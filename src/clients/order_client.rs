use tracing::{debug, error, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::clients::{AuthClient, CartClient};
use crate::domain::{Order, OrderCreate, OrderItem, OrderStatus, VendorSummary};
use crate::order_actor::{OrderAction, OrderError};

/// Client for interacting with the Order actor.
///
/// Besides plain order bookkeeping it runs checkout, which reads the session
/// and the cart before creating an order.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    auth_client: AuthClient,
    cart_client: CartClient,
}

impl_client_methods!(OrderClient, Order, OrderError, order, orders);

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, auth_client: AuthClient, cart_client: CartClient) -> Self {
        Self {
            inner,
            auth_client,
            cart_client,
        }
    }

    /// Appends a pending order whose total is computed from its items.
    #[instrument(skip(self, order), fields(customer_id = %order.customer_id, items = order.items.len()))]
    pub async fn add_order(&self, order: OrderCreate) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner.create(order).await
    }

    /// Returns the new status, or `None` when no order has this id.
    #[instrument(skip(self))]
    pub async fn update_order_status(&self, id: String, status: OrderStatus) -> Result<Option<OrderStatus>, OrderError> {
        debug!("Sending request");
        self.inner.perform_action(id, OrderAction::UpdateStatus(status)).await
    }

    #[instrument(skip(self))]
    pub async fn get_orders_by_vendor(&self, vendor_id: String) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        self.inner
            .query(move |order: &Order| order.vendor_id.as_deref() == Some(vendor_id.as_str()))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_orders_by_customer(&self, customer_id: String) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        self.inner.query(move |order: &Order| order.customer_id == customer_id).await
    }

    /// Orders a vendor works on: their own plus those not assigned to anyone.
    #[instrument(skip(self))]
    pub async fn get_vendor_inbox(&self, vendor_id: String) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        self.inner
            .query(move |order: &Order| order.vendor_id.as_deref().map_or(true, |v| v == vendor_id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn vendor_summary(&self, vendor_id: String) -> Result<VendorSummary, OrderError> {
        let orders = self.get_orders_by_vendor(vendor_id).await?;
        Ok(VendorSummary::from_orders(&orders))
    }

    /// Turns the cart of the signed-in user into an order. The cart is emptied
    /// in the same step that reads it.
    ///
    /// # Errors
    /// `NotSignedIn` without an authenticated session, `EmptyCart` when there
    /// is nothing to buy.
    #[instrument(skip(self))]
    pub async fn checkout(&self, vendor_id: Option<String>) -> Result<Order, OrderError> {
        info!("Processing checkout");

        // Step 1: Resolve the customer
        let session = self.auth_client.current_session().await.map_err(|e| {
            error!(error = %e, "Session lookup failed");
            OrderError::InvalidUser(format!("Session lookup failed: {e}"))
        })?;
        let Some(user) = session.current_user().cloned() else {
            error!("Checkout without a signed-in user");
            return Err(OrderError::NotSignedIn);
        };

        // Step 2: Take the cart; items added from here on stay in it
        let items = self.cart_client.take_items().await.map_err(|e| OrderError::Cart(e.to_string()))?;
        if items.is_empty() {
            error!("Checkout with an empty cart");
            return Err(OrderError::EmptyCart);
        }

        // Step 3: Create the order, handing the items back if that fails
        let params = OrderCreate {
            customer_id: user.id,
            customer_name: user.name,
            customer_email: user.email,
            items: items.iter().cloned().map(OrderItem::from).collect(),
            vendor_id,
        };
        let order = match self.inner.create(params).await {
            Ok(order) => order,
            Err(e) => {
                error!(error = %e, "Order creation failed, restoring cart");
                if let Err(restore_error) = self.cart_client.restore_items(items).await {
                    error!(error = %restore_error, "Failed to restore cart");
                }
                return Err(e);
            }
        };
        info!(order_id = %order.id, total = order.total, "Order placed");
        Ok(order)
    }
}
