//! Marketplace domain: identities, listings and the shared registry.

pub mod error;
pub mod registry;
pub mod types;

pub use error::{MarketError, MarketResult};
pub use registry::{MarketRegistry, RegistryStats};
pub use types::{
    BuyerId, Category, CategoryFilter, ItemUpdate, NewListing, Product, ProductId, Purchase,
    SellerId,
};
