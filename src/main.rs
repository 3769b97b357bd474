mod actor_framework;
mod app_system;
mod auth_actor;
mod cart_actor;
mod clients;
mod config;
mod course_actor;
mod domain;
mod messages;
mod order_actor;
mod product_actor;
mod seed;
mod storage;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;

use std::path::PathBuf;

use tracing::{error, info, Instrument};

use crate::app_system::{setup_tracing, Platform, PlatformError};
use crate::config::PlatformConfig;
use crate::domain::{CartEntry, OrderStatus, ProductFilter, UserFilter};

/// Environment variable naming a config file when no argument is given.
const CONFIG_ENV: &str = "LEARNMART_CONFIG";

#[tokio::main]
async fn main() -> Result<(), PlatformError> {
    let config_path = std::env::args().nth(1).or_else(|| std::env::var(CONFIG_ENV).ok()).map(PathBuf::from);
    let config = PlatformConfig::load(config_path.as_deref())?;

    // Setup tracing once for the entire application
    setup_tracing(&config.log_filter);
    info!(storage = ?config.storage.backend, "Starting platform");

    let platform = Platform::start(&config)?;

    // A student browses the shop and checks out
    let span = tracing::info_span!("student_checkout");
    let checkout = async {
        let student = platform.auth_client.login("student@example.com".into(), "student123".into()).await?;
        info!(user = %student.name, role = %student.role, "Signed in");

        let electronics = platform
            .product_client
            .search_products(ProductFilter { search: None, category: Some("Electronics".into()) })
            .await?;
        for product in &electronics {
            platform.cart_client.add_item(CartEntry::from(product)).await?;
        }
        if let Some(course) = platform.course_client.get_published_courses().await?.first() {
            platform.cart_client.add_item(CartEntry::from(course)).await?;
        }
        info!(
            items = platform.cart_client.item_count().await?,
            total = platform.cart_client.total().await?,
            "Cart ready"
        );

        let order = platform.order_client.checkout(Some(seed::SEED_VENDOR_ID.to_string())).await?;
        platform.auth_client.logout().await?;
        Ok::<_, Box<dyn std::error::Error + Send + Sync>>(order)
    }
    .instrument(span)
    .await;

    let order = match checkout {
        Ok(order) => {
            info!(order_id = %order.id, total = order.total, "Order placed");
            Some(order)
        }
        Err(e) => {
            error!(error = %e, "Checkout failed");
            None
        }
    };

    // The vendor works through their inbox
    let span = tracing::info_span!("vendor_dashboard");
    let vendor = async {
        let vendor = platform.auth_client.login("vendor@example.com".into(), "vendor123".into()).await?;
        if let Some(order) = &order {
            platform.order_client.update_order_status(order.id.clone(), OrderStatus::Confirmed).await?;
        }
        let summary = platform.order_client.vendor_summary(vendor.id.clone()).await?;
        let products = platform.product_client.get_products_by_vendor(vendor.id).await?;
        info!(
            products = products.len(),
            orders = summary.total_orders,
            pending = summary.pending_orders,
            revenue = summary.revenue,
            "Vendor dashboard"
        );
        platform.auth_client.logout().await?;
        Ok::<_, Box<dyn std::error::Error + Send + Sync>>(())
    }
    .instrument(span)
    .await;
    if let Err(e) = vendor {
        error!(error = %e, "Vendor dashboard failed");
    }

    // The admin overview
    match platform.auth_client.list_users(UserFilter::default()).await {
        Ok(users) => {
            let revenue: f64 = seed::revenue().iter().map(|point| point.revenue).sum();
            info!(users = users.len(), revenue, "Admin overview");
        }
        Err(e) => error!(error = %e, "Admin overview failed"),
    }

    // Shutdown system gracefully
    platform.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
