//! Product catalog documents.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::DocumentStore;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub image_url: String,
    pub description: String,
}

pub fn list_products(db: &DocumentStore) -> Result<Vec<Product>, ApiError> {
    let mut products: Vec<Product> = Vec::new();
    for entry in db.products.iter() {
        let (_, value) = entry?;
        products.push(serde_json::from_slice(&value)?);
    }
    products.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(products)
}

pub fn get_product(db: &DocumentStore, id: &str) -> Result<Option<Product>, ApiError> {
    match db.products.get(id)? {
        Some(value) => Ok(Some(serde_json::from_slice(&value)?)),
        None => Ok(None),
    }
}

pub fn put_product(db: &DocumentStore, product: &Product) -> Result<(), ApiError> {
    db.products
        .insert(&product.id, serde_json::to_vec(product)?)?;
    Ok(())
}

// Demo catalog, seeded on first access. Prices are base-currency units.
const DEMO_CATALOG: [(&str, f64, &str, &str); 8] = [
    (
        "Wireless Headphones Pro",
        14999.0,
        "https://images.unsplash.com/photo-1641048930621-ab5d225ae5b0?q=80",
        "High-quality wireless headphones with active noise cancellation and 30-hour battery life.",
    ),
    (
        "Smart Watch Series X",
        24999.0,
        "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=500&q=80",
        "Feature-rich smartwatch with heart rate monitoring, GPS, and water resistance.",
    ),
    (
        "Portable Bluetooth Speaker",
        6999.0,
        "https://images.unsplash.com/photo-1608043152269-423dbba4e7e1?w=500&q=80",
        "Compact yet powerful speaker with 360-degree sound and 20-hour playtime.",
    ),
    (
        "Laptop Stand Ergonomic",
        2999.0,
        "https://images.unsplash.com/photo-1629317480872-45e07211ffd4?q=80",
        "Adjustable aluminum laptop stand for better ergonomics and cooling.",
    ),
    (
        "USB-C Hub 7-in-1",
        3499.0,
        "https://plus.unsplash.com/premium_photo-1761043248662-42f371ad31b4?q=80",
        "Multi-port USB-C hub with HDMI, USB 3.0, SD card reader, and power delivery.",
    ),
    (
        "Wireless Charging Pad",
        1999.0,
        "https://images.unsplash.com/photo-1615526675159-e248c3021d3f?q=80",
        "Fast wireless charging pad compatible with all Qi-enabled devices.",
    ),
    (
        "Mechanical Keyboard RGB",
        8999.0,
        "https://images.unsplash.com/photo-1619683322755-4545503f1afa?q=80",
        "Premium mechanical keyboard with blue switches, RGB backlighting, and programmable keys.",
    ),
    (
        "4K Webcam HD",
        6499.0,
        "https://images.unsplash.com/photo-1516035069371-29a1b244cc32?q=80",
        "Professional 4K webcam with autofocus, noise reduction, and privacy cover.",
    ),
];

/// Seeds the demo catalog if the products partition is empty.
pub fn ensure_demo_catalog(db: &DocumentStore) -> Result<(), ApiError> {
    if db.products.iter().next().is_some() {
        return Ok(());
    }

    info!("Seeding demo catalog ({} products)", DEMO_CATALOG.len());
    for (name, price, image_url, description) in DEMO_CATALOG {
        let product = Product {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            price,
            image_url: image_url.to_string(),
            description: description.to_string(),
        };
        put_product(db, &product)?;
    }
    Ok(())
}
