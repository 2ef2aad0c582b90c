//! Sample catalog used to populate an empty deployment.
//!
//! Several titles are palindromes so the discount can be tried straight away.

use crate::error::Result;
use crate::models::{NewProduct, Price};
use crate::state::ProductStore;

/// Title, brand, description, price in cents
const SEED_CATALOG: &[(&str, &str, &str, u32)] = &[
    ("radar", "Garmin", "Compact speed radar for cyclists with rear light", 19_999),
    ("abba", "Sony Music", "Gold greatest hits collection on vinyl", 3_450),
    ("Oso", "Teddy Co", "Plush brown bear, 40 cm, machine washable", 2_590),
    ("Level Smart Lock", "Level", "Invisible smart lock that fits inside the door", 32_900),
    ("Kayak Explorer 300", "Pelican", "Sit-on-top kayak with adjustable seat", 54_995),
    ("Wireless Mouse", "Logitech", "Ergonomic mouse with silent clicks and long battery life", 2_999),
    ("Mechanical Keyboard", "Keychron", "Hot-swappable keyboard with brown switches", 8_999),
    ("Noise Cancelling Headphones", "Bose", "Over-ear headphones with adaptive noise cancelling", 27_999),
    ("Trail Running Shoes", "Salomon", "Lightweight shoes with grippy outsole for muddy trails", 13_000),
    ("Espresso Machine", "DeLonghi", "Pump espresso machine with milk frother", 19_990),
    ("Stainless Water Bottle", "Hydro Flask", "Insulated bottle that keeps drinks cold for 24 hours", 3_995),
    ("4K Monitor 27\"", "Dell", "IPS panel with USB-C power delivery", 44_999),
    ("Civic Car Cover", "Covercraft", "Weatherproof cover sized for compact sedans", 8_950),
    ("Yoga Mat", "Manduka", "Non-slip mat, 6 mm thick, made from natural rubber", 8_800),
    ("Backpack 30L", "Osprey", "Hiking pack with ventilated back panel", 15_000),
];

/// The fixed seed catalog
pub fn seed_products() -> Vec<NewProduct> {
    SEED_CATALOG
        .iter()
        .map(|(title, brand, description, cents)| {
            NewProduct::new(*title, *brand, *description, Price::from(*cents))
        })
        .collect()
}

/// Replace the store's contents with the seed catalog, returning how many
/// products were inserted
pub async fn run_seed(store: &dyn ProductStore) -> Result<usize> {
    store.clear().await?;

    let products = seed_products();
    let count = products.len();
    for product in products {
        store.save_product(product).await?;
    }

    tracing::info!(
        count,
        "Seed products inserted, try searching for a palindrome to get a discount"
    );
    Ok(count)
}
