//! The marketplace registry: sellers, listings, wishlists and ratings.
//!
//! All state sits behind one registry-wide lock. Each operation takes the lock
//! exactly once, runs every check, and only then mutates, so a failed call
//! never leaves anything behind and concurrent check-then-mutate sequences
//! (two buyers racing for the last unit, a delete racing a wishlist) are
//! serialized.

use crate::domain::market::error::{MarketError, MarketResult};
use crate::domain::market::types::{
    BuyerId, CategoryFilter, ItemUpdate, NewListing, Product, ProductId, Purchase, SellerId,
    ANY_NAME,
};
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Default)]
struct BuyerActivity {
    wishlist: BTreeSet<ProductId>,
    rated: BTreeSet<ProductId>,
}

#[derive(Debug)]
struct RegistryState {
    next_id: u64,
    products: BTreeMap<ProductId, Product>,
    sellers: HashMap<SellerId, BTreeSet<ProductId>>,
    buyers: HashMap<BuyerId, BuyerActivity>,
}

impl RegistryState {
    fn new() -> Self {
        Self {
            next_id: 1,
            products: BTreeMap::new(),
            sellers: HashMap::new(),
            buyers: HashMap::new(),
        }
    }

    fn product_mut(&mut self, id: ProductId) -> MarketResult<&mut Product> {
        self.products
            .get_mut(&id)
            .ok_or(MarketError::ProductNotFound(id))
    }

    fn collect(&self, ids: &BTreeSet<ProductId>) -> Vec<Product> {
        ids.iter()
            .filter_map(|id| self.products.get(id).cloned())
            .collect()
    }
}

/// Point-in-time counters, used by health checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStats {
    pub products: usize,
    pub sellers: usize,
    pub buyers: usize,
    pub next_id: u64,
}

pub struct MarketRegistry {
    state: Mutex<RegistryState>,
}

impl MarketRegistry {
    /// Creates a new empty registry. The first listing gets id 1.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState::new()),
        }
    }

    // --- seller operations ---

    pub fn register_seller(&self, seller: SellerId) -> MarketResult<()> {
        let mut state = self.state.lock();
        if state.sellers.contains_key(&seller) {
            return Err(MarketError::AlreadyRegistered);
        }
        state.sellers.insert(seller, BTreeSet::new());
        Ok(())
    }

    pub fn sell_item(&self, seller: &SellerId, listing: NewListing) -> MarketResult<ProductId> {
        validate_price(listing.price)?;

        let mut state = self.state.lock();
        if !state.sellers.contains_key(seller) {
            return Err(MarketError::SellerNotRegistered);
        }

        let id = ProductId(state.next_id);
        state.next_id += 1;
        state
            .products
            .insert(id, Product::new(id, seller.address.clone(), listing));
        if let Some(owned) = state.sellers.get_mut(seller) {
            owned.insert(id);
        }
        Ok(id)
    }

    pub fn delete_item(&self, seller: &SellerId, id: ProductId) -> MarketResult<()> {
        let mut state = self.state.lock();
        let owns = match state.sellers.get(seller) {
            Some(owned) => owned.contains(&id),
            None => return Err(MarketError::SellerNotFound),
        };
        if !state.products.contains_key(&id) {
            return Err(MarketError::ProductNotFound(id));
        }
        if !owns {
            return Err(MarketError::NotOwner(id));
        }

        state.products.remove(&id);
        if let Some(owned) = state.sellers.get_mut(seller) {
            owned.remove(&id);
        }
        for activity in state.buyers.values_mut() {
            activity.wishlist.remove(&id);
        }
        Ok(())
    }

    pub fn display_seller_items(&self, seller: &SellerId) -> MarketResult<Vec<Product>> {
        let state = self.state.lock();
        let owned = state.sellers.get(seller).ok_or(MarketError::SellerNotFound)?;
        Ok(state.collect(owned))
    }

    /// Overwrites price and quantity. Only the owning seller may update a
    /// listing; the product must exist before ownership is looked at.
    pub fn update_item(
        &self,
        seller: &SellerId,
        id: ProductId,
        new_price: f64,
        new_quantity: u32,
    ) -> MarketResult<ItemUpdate> {
        validate_price(new_price)?;

        let mut state = self.state.lock();
        if !state.products.contains_key(&id) {
            return Err(MarketError::ProductNotFound(id));
        }
        match state.sellers.get(seller) {
            None => return Err(MarketError::SellerNotFound),
            Some(owned) if !owned.contains(&id) => return Err(MarketError::NotOwner(id)),
            Some(_) => {}
        }

        let product = state.product_mut(id)?;
        product.price = new_price;
        product.quantity = new_quantity;

        let mut watchers: Vec<BuyerId> = state
            .buyers
            .iter()
            .filter(|(_, activity)| activity.wishlist.contains(&id))
            .map(|(buyer, _)| buyer.clone())
            .collect();
        watchers.sort_by(|a, b| a.address.cmp(&b.address));

        Ok(ItemUpdate {
            product_id: id,
            price: new_price,
            quantity: new_quantity,
            watchers,
        })
    }

    // --- buyer operations ---

    /// `"*"` as the name returns everything; otherwise the name must match
    /// exactly and the category filter must accept the product.
    pub fn search_item(&self, name: &str, category: CategoryFilter) -> Vec<Product> {
        let state = self.state.lock();
        if name == ANY_NAME {
            return state.products.values().cloned().collect();
        }
        state
            .products
            .values()
            .filter(|p| p.name == name && category.matches(p.category))
            .cloned()
            .collect()
    }

    pub fn rate_item(&self, buyer: &BuyerId, id: ProductId, rating: i32) -> MarketResult<f64> {
        let mut state = self.state.lock();
        if !state.products.contains_key(&id) {
            return Err(MarketError::ProductNotFound(id));
        }
        let already = state
            .buyers
            .get(buyer)
            .is_some_and(|activity| activity.rated.contains(&id));
        if already {
            return Err(MarketError::AlreadyRated(id));
        }

        let product = state.product_mut(id)?;
        product.add_rating(rating);
        let new_rating = product.rating;
        state
            .buyers
            .entry(buyer.clone())
            .or_default()
            .rated
            .insert(id);
        Ok(new_rating)
    }

    pub fn wishlist_item(&self, buyer: &BuyerId, id: ProductId) -> MarketResult<()> {
        let mut state = self.state.lock();
        if !state.products.contains_key(&id) {
            return Err(MarketError::ProductNotFound(id));
        }
        let activity = state.buyers.entry(buyer.clone()).or_default();
        if !activity.wishlist.insert(id) {
            return Err(MarketError::AlreadyWishlisted(id));
        }
        Ok(())
    }

    /// Decrements stock. A product that reaches zero stays listed.
    pub fn buy_item(&self, id: ProductId, quantity: u32) -> MarketResult<Purchase> {
        let mut state = self.state.lock();
        let product = state.product_mut(id)?;
        if quantity > product.quantity {
            return Err(MarketError::InsufficientQuantity {
                requested: quantity,
                available: product.quantity,
            });
        }
        product.quantity -= quantity;
        Ok(Purchase {
            product_id: id,
            quantity,
            remaining: product.quantity,
            seller_address: product.seller_address.clone(),
        })
    }

    /// Products currently on the buyer's wishlist; empty for unknown buyers.
    pub fn display_wishlist(&self, buyer: &BuyerId) -> Vec<Product> {
        let state = self.state.lock();
        match state.buyers.get(buyer) {
            Some(activity) => state.collect(&activity.wishlist),
            None => Vec::new(),
        }
    }

    pub fn get_item(&self, id: ProductId) -> MarketResult<Product> {
        let state = self.state.lock();
        state
            .products
            .get(&id)
            .cloned()
            .ok_or(MarketError::ProductNotFound(id))
    }

    pub fn stats(&self) -> RegistryStats {
        let state = self.state.lock();
        RegistryStats {
            products: state.products.len(),
            sellers: state.sellers.len(),
            buyers: state.buyers.len(),
            next_id: state.next_id,
        }
    }
}

impl Default for MarketRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_price(price: f64) -> MarketResult<()> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(MarketError::InvalidPrice(price))
    }
}
