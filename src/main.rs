//! OpenSASE Storefront - prints the catalog and the persisted cart/wishlist

use std::sync::Arc;

use anyhow::Result;
use opensase_storefront::{InMemoryCatalog, Product, Storefront, StorefrontConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn demo_catalog() -> InMemoryCatalog {
    InMemoryCatalog::new(vec![
        Product::new(1, "Meguiar's", "Gold Class Carnauba Wax", 1_499, 1_199).with_tags(["wax", "paste"]),
        Product::new(2, "Chemical Guys", "Mr. Pink Foaming Soap", 1_200, 999).with_tags(["wash"]),
        Product::new(3, "3M", "Perfect-It Rubbing Compound", 2_850, 2_850),
        Product::new(4, "Gtechniq", "C1 Crystal Lacquer", 1_25_000, 98_500).with_description("Ceramic coating kit"),
    ])
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = StorefrontConfig::from_env();
    tracing::info!("🛒 {} - {} (data: {})", config.app_name, config.tagline, config.data_dir.display());

    let shop = Storefront::open_in_data_dir(config, Arc::new(demo_catalog()))?;

    for product in shop.products().await? {
        let discount = product.discount_percentage();
        if discount > 0 {
            tracing::info!("#{} {} {} {} (was {}, {}% off)", product.id, product.brand, product.name, product.display_sale_price(), product.display_list_price(), discount);
        } else {
            tracing::info!("#{} {} {} {}", product.id, product.brand, product.name, product.display_sale_price());
        }
    }

    let cart = shop.cart();
    for item in cart.items() {
        tracing::info!("cart: {}x {} {}", item.quantity, item.product.name, item.subtotal());
    }
    tracing::info!("cart: {} line item(s), {} unit(s), total {}", cart.get_item_count(), cart.get_total_quantity(), cart.get_total());
    tracing::info!("wishlist: {} saved product(s)", shop.wishlist().get_count());
    Ok(())
}
