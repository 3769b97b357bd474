//! Fixture data used when a store has nothing persisted.

use chrono::{DateTime, Utc};

use crate::domain::{Account, Course, Product, Role, User};

/// Vendor that owns every seeded product.
pub const SEED_VENDOR_ID: &str = "3";

/// One month of platform revenue, as plotted on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevenuePoint {
    pub month: &'static str,
    pub revenue: f64,
    pub orders: u32,
}

pub fn accounts() -> Vec<Account> {
    vec![
        Account::new(User::new("1", "admin@example.com", "Admin User", Role::Admin), "admin123"),
        Account::new(User::new("2", "student@example.com", "Student User", Role::Student), "student123"),
        Account::new(User::new("3", "vendor@example.com", "Vendor User", Role::Vendor), "vendor123"),
    ]
}

pub fn courses(now: DateTime<Utc>) -> Vec<Course> {
    let course = |id: &str, title: &str, description: &str, duration: &str, lessons: u32, instructor: &str, price: f64| Course {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        thumbnail: format!("https://images.example.com/courses/{id}.jpg"),
        duration: duration.to_string(),
        progress: 0,
        lessons,
        completed_lessons: 0,
        instructor: instructor.to_string(),
        price,
        is_published: true,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    vec![
        course("1", "Rust Fundamentals", "Ownership, borrowing and the type system from first principles.", "8 hours", 24, "Sarah Johnson", 49.99),
        course("2", "Web Design Essentials", "Layout, typography and color for modern interfaces.", "6 hours", 18, "Michael Chen", 39.99),
        course("3", "Data Structures in Practice", "Lists, trees, maps and when to reach for each.", "10 hours", 30, "Emily Davis", 59.99),
        course("4", "Product Photography", "Lighting and composition for shop listings.", "4 hours", 12, "David Park", 29.99),
    ]
}

pub fn products(now: DateTime<Utc>) -> Vec<Product> {
    let product = |id: &str, name: &str, description: &str, price: f64, category: &str, stock: u32, rating: f64| Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        image: format!("https://images.example.com/products/{id}.jpg"),
        category: category.to_string(),
        stock,
        rating,
        vendor_id: Some(SEED_VENDOR_ID.to_string()),
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    vec![
        product("1", "Wireless Headphones", "Noise cancelling over-ear headphones.", 199.99, "Electronics", 50, 4.8),
        product("2", "Mechanical Keyboard", "Hot-swappable switches, aluminium case.", 129.99, "Electronics", 35, 4.7),
        product("3", "Leather Notebook", "A5 hand-stitched notebook with dotted pages.", 24.99, "Stationery", 120, 4.5),
        product("4", "Standing Desk", "Electric height-adjustable desk.", 449.99, "Furniture", 10, 4.6),
        product("5", "Desk Lamp", "Dimmable LED lamp with warm light mode.", 39.99, "Furniture", 80, 4.4),
        product("6", "Fountain Pen", "Steel nib, converter included.", 59.99, "Stationery", 40, 4.9),
    ]
}

pub fn revenue() -> Vec<RevenuePoint> {
    [
        ("Jan", 4000.0, 240),
        ("Feb", 3000.0, 198),
        ("Mar", 5000.0, 300),
        ("Apr", 4500.0, 278),
        ("May", 6000.0, 389),
        ("Jun", 5500.0, 349),
    ]
    .into_iter()
    .map(|(month, revenue, orders)| RevenuePoint { month, revenue, orders })
    .collect()
}
