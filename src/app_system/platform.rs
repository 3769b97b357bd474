use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use crate::actor_framework::ResourceActor;
use crate::auth_actor::AuthService;
use crate::cart_actor::CartService;
use crate::clients::{AuthClient, CartClient, CourseClient, OrderClient, ProductClient};
use crate::config::{PlatformConfig, StorageBackend};
use crate::domain::{Course, Order, Product};
use crate::seed;
use crate::storage::{FileStorage, MemoryStorage, Storage};
use super::error::PlatformError;

/// Builds an id generator yielding `<prefix>1`, `<prefix>2`, ...
fn sequential_ids(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || format!("{prefix}{}", counter.fetch_add(1, Ordering::SeqCst))
}

/// The running platform: one actor per store plus the clients to reach them.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct Platform {
    pub auth_client: AuthClient,
    pub course_client: CourseClient,
    pub product_client: ProductClient,
    pub order_client: OrderClient,
    pub cart_client: CartClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Platform {
    /// Opens the configured storage backend and starts every store.
    pub fn start(config: &PlatformConfig) -> Result<Self, PlatformError> {
        let storage: Arc<dyn Storage> = match config.storage.backend {
            StorageBackend::Memory => Arc::new(MemoryStorage::new()),
            StorageBackend::File => Arc::new(FileStorage::open(&config.storage.dir)?),
        };
        Ok(Self::with_storage(config, storage))
    }

    /// Starts every store on top of an existing storage.
    pub fn with_storage(config: &PlatformConfig, storage: Arc<dyn Storage>) -> Self {
        let buffer = config.channel_buffer;
        let now = Utc::now();

        // 1. Auth
        let (auth_service, auth_client) =
            AuthService::new(buffer, seed::accounts(), storage.clone(), config.simulated_latency());
        let auth_handle = tokio::spawn(auth_service.run());

        // 2. Catalogs
        let (course_actor, course_resource_client) =
            ResourceActor::<Course>::new(buffer, sequential_ids("course-"), storage.clone(), seed::courses(now));
        let course_client = CourseClient::new(course_resource_client);
        let course_handle = tokio::spawn(course_actor.run());

        let (product_actor, product_resource_client) =
            ResourceActor::<Product>::new(buffer, sequential_ids("product-"), storage.clone(), seed::products(now));
        let product_client = ProductClient::new(product_resource_client);
        let product_handle = tokio::spawn(product_actor.run());

        // 3. Cart
        let (cart_service, cart_client) = CartService::new(buffer);
        let cart_handle = tokio::spawn(cart_service.run());

        // 4. Orders, which check out through auth and cart
        let (order_actor, order_resource_client) =
            ResourceActor::<Order>::new(buffer, sequential_ids("ORD-"), storage, Vec::new());
        let order_client = OrderClient::new(order_resource_client, auth_client.clone(), cart_client.clone());
        let order_handle = tokio::spawn(order_actor.run());

        info!("Platform started");
        Self {
            auth_client,
            course_client,
            product_client,
            order_client,
            cart_client,
            handles: vec![auth_handle, course_handle, product_handle, cart_handle, order_handle],
        }
    }

    /// Drops every client, which closes the mailboxes, then joins the actors.
    pub async fn shutdown(self) -> Result<(), PlatformError> {
        info!("Shutting down platform...");
        let Self {
            auth_client,
            course_client,
            product_client,
            order_client,
            cart_client,
            handles,
        } = self;

        // The order client holds clones of the auth and cart clients
        drop(order_client);
        drop(auth_client);
        drop(cart_client);
        drop(course_client);
        drop(product_client);

        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e.into());
            }
        }

        info!("Platform shutdown complete.");
        Ok(())
    }
}
