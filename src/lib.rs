pub mod app;
pub mod client;
pub mod domain;
pub mod infra;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::marketplace_service::MarketplaceService;
pub use client::MarketClient;
pub use domain::market::{
    BuyerId, Category, CategoryFilter, MarketError, MarketRegistry, MarketResult, NewListing,
    Product, ProductId, SellerId,
};
pub use infra::notifier::{HttpNotifier, NoopNotifier, Notifier};
