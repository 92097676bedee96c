//! Value types for the marketplace: identities, categories and listings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Category token that matches every category in a search.
pub const ALL_CATEGORIES: &str = "all";

/// Name token that matches every product in a search.
pub const ANY_NAME: &str = "*";

/// Identifier assigned by the registry on `sell_item`. Never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(v: u64) -> Self {
        ProductId(v)
    }
}

/// A seller is identified by its endpoint address plus the instance id it
/// generated at startup, so two processes on the same address stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SellerId {
    pub address: String,
    pub instance_id: String,
}

impl SellerId {
    pub fn new(address: impl Into<String>, instance_id: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            instance_id: instance_id.into(),
        }
    }
}

impl fmt::Display for SellerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (instance={})", self.address, self.instance_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuyerId {
    pub address: String,
}

impl BuyerId {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Category {
    Electronics,
    Fashion,
    Others,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Fashion => "Fashion",
            Category::Others => "Others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown category '{}' (expected Electronics, Fashion, Others)",
            self.0
        )
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Electronics" => Ok(Category::Electronics),
            "Fashion" => Ok(Category::Fashion),
            "Others" => Ok(Category::Others),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Category side of a search: the `"all"` wildcard, one category, or a
/// token naming no category (matches nothing). Tokens are compared exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(Category),
    NoMatch,
}

impl CategoryFilter {
    pub fn from_token(token: &str) -> Self {
        if token == ALL_CATEGORIES {
            return CategoryFilter::All;
        }
        match token.parse() {
            Ok(category) => CategoryFilter::Only(category),
            Err(_) => CategoryFilter::NoMatch,
        }
    }

    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
            CategoryFilter::NoMatch => false,
        }
    }
}

/// Seller-supplied fields of a new listing.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub name: String,
    pub category: Category,
    pub price: f64,
    pub quantity: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    pub price: f64,
    pub quantity: u32,
    pub description: String,
    pub seller_address: String,
    /// Running mean of all ratings received.
    pub rating: f64,
    pub n_ratings: u32,
}

impl Product {
    pub fn new(id: ProductId, seller_address: impl Into<String>, listing: NewListing) -> Self {
        Self {
            id,
            name: listing.name,
            category: listing.category,
            price: listing.price,
            quantity: listing.quantity,
            description: listing.description,
            seller_address: seller_address.into(),
            rating: 0.0,
            n_ratings: 0,
        }
    }

    /// Folds one more rating into the running mean.
    pub fn add_rating(&mut self, rating: i32) {
        let n = f64::from(self.n_ratings) + 1.0;
        self.rating += (f64::from(rating) - self.rating) / n;
        self.n_ratings += 1;
    }
}

// Listing text shown by the command-line front ends.
impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Product:")?;
        writeln!(f, "Id={}", self.id)?;
        writeln!(f, "Name={}", self.name)?;
        writeln!(f, "Price={}", self.price)?;
        writeln!(f, "Quantity={}", self.quantity)?;
        writeln!(f, "Category={}", self.category)?;
        writeln!(f, "Description={}", self.description)?;
        writeln!(f, "Seller ip:port={}", self.seller_address)?;
        writeln!(f, "Rating={}", self.rating)
    }
}

/// Joins listings the way `DisplaySellerItems` and `SearchItem` present them.
pub fn render_listing(products: &[Product]) -> String {
    products
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n_________\n")
}

/// Outcome of a successful purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    pub product_id: ProductId,
    pub quantity: u32,
    pub remaining: u32,
    pub seller_address: String,
}

/// Outcome of a successful update: the new values plus who is watching.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemUpdate {
    pub product_id: ProductId,
    pub price: f64,
    pub quantity: u32,
    pub watchers: Vec<BuyerId>,
}
