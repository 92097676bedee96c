//! Caller-visible failures of registry operations.

use crate::domain::market::types::ProductId;

/// Every variant is a terminal answer to a single call; none leaves partial
/// state behind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MarketError {
    #[error("Seller already registered")]
    AlreadyRegistered,

    #[error("Seller not registered")]
    SellerNotRegistered,

    #[error("Seller not found")]
    SellerNotFound,

    #[error("Product with id {0} not found")]
    ProductNotFound(ProductId),

    #[error("Seller does not own the product with id {0}")]
    NotOwner(ProductId),

    #[error("Requested quantity {requested} not available (in stock: {available})")]
    InsufficientQuantity { requested: u32, available: u32 },

    #[error("Product with id {0} already rated by the buyer")]
    AlreadyRated(ProductId),

    #[error("Product with id {0} already in wishlist")]
    AlreadyWishlisted(ProductId),

    #[error("Invalid price {0}: must be a finite, non-negative number")]
    InvalidPrice(f64),
}

impl MarketError {
    /// Stable machine-readable code carried in RPC responses.
    pub fn code(&self) -> &'static str {
        match self {
            MarketError::AlreadyRegistered => "ALREADY_REGISTERED",
            MarketError::SellerNotRegistered => "SELLER_NOT_REGISTERED",
            MarketError::SellerNotFound => "SELLER_NOT_FOUND",
            MarketError::ProductNotFound(_) => "PRODUCT_NOT_FOUND",
            MarketError::NotOwner(_) => "NOT_OWNER",
            MarketError::InsufficientQuantity { .. } => "INSUFFICIENT_QUANTITY",
            MarketError::AlreadyRated(_) => "ALREADY_RATED",
            MarketError::AlreadyWishlisted(_) => "ALREADY_WISHLISTED",
            MarketError::InvalidPrice(_) => "INVALID_PRICE",
        }
    }
}

/// Convenience type alias.
pub type MarketResult<T> = Result<T, MarketError>;
