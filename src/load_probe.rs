// src/load_probe.rs
// Hammers BuyItem on a single listing from many threads and checks that the
// registry never sells more units than it had in stock.
use rand::Rng;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;
use tracing::info;

use marketplace_registry::domain::market::{
    Category, MarketError, MarketRegistry, NewListing, SellerId,
};
use marketplace_registry::infra::telemetry;

fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let buyers: usize = 16;
    let attempts_per_buyer: usize = 2_000;
    let stock: u32 = 10_000;

    info!(
        "--- BuyItem load probe: {} buyers x {} attempts against {} units ---",
        buyers, attempts_per_buyer, stock
    );

    let registry = MarketRegistry::new();
    let seller = SellerId::new("127.0.0.1:50052", "load-probe");
    registry.register_seller(seller.clone())?;
    let id = registry.sell_item(
        &seller,
        NewListing {
            name: "Widget".to_string(),
            category: Category::Electronics,
            price: 10.0,
            quantity: stock,
            description: "load probe listing".to_string(),
        },
    )?;

    let sold = AtomicU32::new(0);
    let rejected = AtomicU32::new(0);
    let unexpected = AtomicU32::new(0);

    let start_time = Instant::now();
    std::thread::scope(|s| {
        for _ in 0..buyers {
            s.spawn(|| {
                let mut rng = rand::thread_rng();
                for _ in 0..attempts_per_buyer {
                    let qty = rng.gen_range(1..=3);
                    match registry.buy_item(id, qty) {
                        Ok(_) => {
                            sold.fetch_add(qty, Ordering::Relaxed);
                        }
                        Err(MarketError::InsufficientQuantity { .. }) => {
                            rejected.fetch_add(1, Ordering::Relaxed);
                        }
                        Err(e) => {
                            tracing::error!("unexpected failure: {}", e);
                            unexpected.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                }
            });
        }
    });
    let duration = start_time.elapsed();

    let remaining = registry.get_item(id)?.quantity;
    let sold = sold.load(Ordering::Relaxed);
    let total_calls = (buyers * attempts_per_buyer) as f64;

    info!("--- Results ---");
    info!("Units sold: {} / {} (remaining {})", sold, stock, remaining);
    info!("Rejected purchases: {}", rejected.load(Ordering::Relaxed));
    info!("Total time: {} ms", duration.as_millis());
    info!(
        "Average time per call: {:.2} µs",
        duration.as_micros() as f64 / total_calls
    );

    if unexpected.load(Ordering::Relaxed) > 0 {
        return Err(anyhow::anyhow!("purchases failed for reasons other than stock"));
    }
    if sold + remaining != stock {
        return Err(anyhow::anyhow!(
            "stock accounting broken: sold {} + remaining {} != {}",
            sold,
            remaining,
            stock
        ));
    }
    info!("Stock accounting holds.");
    Ok(())
}
