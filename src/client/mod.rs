pub mod market_client;

pub use market_client::{notification_router, MarketClient};
