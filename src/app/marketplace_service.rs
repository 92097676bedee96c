//! The Marketplace Service.
//!
//! This module sits between the RPC front end and the registry. It is
//! responsible for:
//! 1.  Forwarding each call to the shared `MarketRegistry`.
//! 2.  Logging every accepted and rejected call.
//! 3.  Dispatching update/purchase notifications once the registry lock has
//!     been released, when a notifier is configured.

use crate::domain::market::{
    BuyerId, CategoryFilter, ItemUpdate, MarketRegistry, MarketResult, NewListing, Product,
    ProductId, Purchase, RegistryStats, SellerId,
};
use crate::infra::config;
use crate::infra::notifier::{HttpNotifier, Notifier};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct MarketplaceService {
    registry: Arc<MarketRegistry>,
    notifier: Option<Arc<dyn Notifier>>,
}

fn logged<T>(op: &str, subject: &str, result: MarketResult<T>) -> MarketResult<T> {
    match &result {
        Ok(_) => info!("{} request from {} succeeded", op, subject),
        Err(e) => warn!(code = e.code(), "{} request from {} failed: {}", op, subject, e),
    }
    result
}

impl MarketplaceService {
    /// A service without notifications.
    pub fn new(registry: Arc<MarketRegistry>) -> Self {
        Self {
            registry,
            notifier: None,
        }
    }

    pub fn with_notifier(registry: Arc<MarketRegistry>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            registry,
            notifier: Some(notifier),
        }
    }

    /// Builds a service from the environment: a fresh registry plus an HTTP
    /// notifier when `MARKET_NOTIFICATIONS=true`.
    pub fn from_env() -> anyhow::Result<Self> {
        let registry = Arc::new(MarketRegistry::new());
        if config::notifications_enabled()? {
            let notifier = HttpNotifier::new(config::notify_timeout()?)?;
            info!("Notifications enabled");
            Ok(Self::with_notifier(registry, Arc::new(notifier)))
        } else {
            info!("Notifications disabled (set MARKET_NOTIFICATIONS=true to enable)");
            Ok(Self::new(registry))
        }
    }

    pub fn registry(&self) -> &Arc<MarketRegistry> {
        &self.registry
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notifier.is_some()
    }

    pub fn stats(&self) -> RegistryStats {
        self.registry.stats()
    }

    // Seller functions

    pub fn register_seller(&self, seller: SellerId) -> MarketResult<()> {
        let subject = seller.to_string();
        logged(
            "Seller join",
            &subject,
            self.registry.register_seller(seller),
        )
    }

    pub fn sell_item(&self, seller: &SellerId, listing: NewListing) -> MarketResult<ProductId> {
        let name = listing.name.clone();
        let result = logged(
            "Sell Item",
            &seller.to_string(),
            self.registry.sell_item(seller, listing),
        );
        if let Ok(id) = &result {
            debug!("Listed '{}' as product {}", name, id);
        }
        result
    }

    pub fn delete_item(&self, seller: &SellerId, id: ProductId) -> MarketResult<()> {
        logged(
            &format!("Delete Item {}[id]", id),
            &seller.to_string(),
            self.registry.delete_item(seller, id),
        )
    }

    pub fn display_seller_items(&self, seller: &SellerId) -> MarketResult<Vec<Product>> {
        logged(
            "Display Items",
            &seller.to_string(),
            self.registry.display_seller_items(seller),
        )
    }

    pub fn update_item(
        &self,
        seller: &SellerId,
        id: ProductId,
        new_price: f64,
        new_quantity: u32,
    ) -> MarketResult<ItemUpdate> {
        let result = logged(
            &format!("Update Item {}[id]", id),
            &seller.to_string(),
            self.registry.update_item(seller, id, new_price, new_quantity),
        );
        if let Ok(update) = &result {
            let message = format!(
                "Item {} has been updated! New price {} and quantity {}",
                update.product_id, update.price, update.quantity
            );
            for buyer in &update.watchers {
                self.dispatch(buyer.address.clone(), message.clone());
            }
        }
        result
    }

    // Buyer functions

    pub fn search_item(&self, name: &str, category: CategoryFilter) -> Vec<Product> {
        let items = self.registry.search_item(name, category);
        info!(
            "Search Item [name:{}, category:{:?}] returned {} item(s)",
            name,
            category,
            items.len()
        );
        items
    }

    pub fn rate_item(&self, buyer: &BuyerId, id: ProductId, rating: i32) -> MarketResult<f64> {
        logged(
            &format!("Rate Item {}[id]", id),
            &buyer.address,
            self.registry.rate_item(buyer, id, rating),
        )
    }

    pub fn wishlist_item(&self, buyer: &BuyerId, id: ProductId) -> MarketResult<()> {
        logged(
            &format!("Wishlist Item {}[id]", id),
            &buyer.address,
            self.registry.wishlist_item(buyer, id),
        )
    }

    pub fn buy_item(
        &self,
        buyer: Option<&BuyerId>,
        id: ProductId,
        quantity: u32,
    ) -> MarketResult<Purchase> {
        let subject = buyer.map_or("<anonymous>", |b| b.address.as_str());
        let result = logged(
            &format!("Buy Item {}[id]", id),
            subject,
            self.registry.buy_item(id, quantity),
        );
        if let Ok(purchase) = &result {
            let message = format!(
                "Your product with id {} has sold {} units ({} left)",
                purchase.product_id, purchase.quantity, purchase.remaining
            );
            self.dispatch(purchase.seller_address.clone(), message);
        }
        result
    }

    pub fn display_wishlist(&self, buyer: &BuyerId) -> Vec<Product> {
        let items = self.registry.display_wishlist(buyer);
        info!(
            "Display Wishlist request from {} returned {} item(s)",
            buyer.address,
            items.len()
        );
        items
    }

    pub fn get_item(&self, id: ProductId) -> MarketResult<Product> {
        logged("Get Item", &id.to_string(), self.registry.get_item(id))
    }

    /// Fire-and-forget: each message goes out on its own task so a slow or
    /// dead endpoint never holds up the caller.
    fn dispatch(&self, endpoint: String, message: String) {
        let Some(notifier) = self.notifier.clone() else {
            return;
        };
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime; dropping notification for {}", endpoint);
            return;
        };
        debug!("Dispatching notification to {}: {}", endpoint, message);
        handle.spawn(async move {
            if let Err(e) = notifier.notify(&endpoint, &message).await {
                warn!("Notification to {} failed: {}", endpoint, e);
            }
        });
    }
}
