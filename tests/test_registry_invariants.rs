//! Registry-level behaviour: lifecycle scenarios, failure taxonomy and
//! invariants under concurrent access.

use marketplace_registry::domain::market::{
    BuyerId, Category, CategoryFilter, MarketError, MarketRegistry, NewListing, ProductId,
    SellerId,
};
use std::sync::atomic::{AtomicU32, Ordering};

fn listing(name: &str, category: Category, price: f64, quantity: u32) -> NewListing {
    NewListing {
        name: name.to_string(),
        category,
        price,
        quantity,
        description: format!("{} description", name),
    }
}

fn seller_a() -> SellerId {
    SellerId::new("127.0.0.1:50052", "seller-a")
}

fn registry_with_widget() -> (MarketRegistry, ProductId) {
    let registry = MarketRegistry::new();
    registry.register_seller(seller_a()).unwrap();
    let id = registry
        .sell_item(&seller_a(), listing("Widget", Category::Electronics, 10.0, 5))
        .unwrap();
    (registry, id)
}

#[test]
fn register_seller_rejects_duplicates() {
    let registry = MarketRegistry::new();
    registry.register_seller(seller_a()).unwrap();
    assert_eq!(
        registry.register_seller(seller_a()),
        Err(MarketError::AlreadyRegistered)
    );
    // Same address, different instance: a distinct seller.
    registry
        .register_seller(SellerId::new("127.0.0.1:50052", "seller-b"))
        .unwrap();
    assert_eq!(registry.stats().sellers, 2);
}

#[test]
fn sell_requires_registration() {
    let registry = MarketRegistry::new();
    let err = registry
        .sell_item(&seller_a(), listing("Widget", Category::Electronics, 10.0, 5))
        .unwrap_err();
    assert_eq!(err, MarketError::SellerNotRegistered);
    assert_eq!(registry.stats().next_id, 1);
}

#[test]
fn sell_rejects_bad_price_without_consuming_an_id() {
    let registry = MarketRegistry::new();
    registry.register_seller(seller_a()).unwrap();
    let err = registry
        .sell_item(&seller_a(), listing("Widget", Category::Electronics, -1.0, 5))
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_PRICE");
    let id = registry
        .sell_item(&seller_a(), listing("Widget", Category::Electronics, 0.0, 5))
        .unwrap();
    assert_eq!(id, ProductId(1));
}

#[test]
fn product_ids_increase_and_are_never_reused() {
    let registry = MarketRegistry::new();
    registry.register_seller(seller_a()).unwrap();
    let mut last = ProductId(0);
    for round in 0..5 {
        let id = registry
            .sell_item(
                &seller_a(),
                listing(&format!("item-{}", round), Category::Others, 1.0, 1),
            )
            .unwrap();
        assert!(id > last);
        registry.delete_item(&seller_a(), id).unwrap();
        last = id;
    }
    let id = registry
        .sell_item(&seller_a(), listing("after", Category::Others, 1.0, 1))
        .unwrap();
    assert_eq!(id, ProductId(6));
}

#[test]
fn buy_scenario_never_oversells() {
    let (registry, id) = registry_with_widget();
    assert_eq!(id, ProductId(1));

    let purchase = registry.buy_item(id, 3).unwrap();
    assert_eq!(purchase.remaining, 2);
    assert_eq!(purchase.seller_address, "127.0.0.1:50052");

    assert_eq!(
        registry.buy_item(id, 3),
        Err(MarketError::InsufficientQuantity {
            requested: 3,
            available: 2
        })
    );
    assert_eq!(registry.get_item(id).unwrap().quantity, 2);

    // Selling out keeps the listing visible.
    registry.buy_item(id, 2).unwrap();
    let found = registry.search_item("Widget", CategoryFilter::All);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].quantity, 0);
}

#[test]
fn rating_scenario_and_running_mean() {
    let (registry, id) = registry_with_widget();
    let b = BuyerId::new("127.0.0.1:50053");
    let c = BuyerId::new("127.0.0.1:50054");

    assert_eq!(registry.rate_item(&b, id, 4).unwrap(), 4.0);
    assert_eq!(
        registry.rate_item(&b, id, 2),
        Err(MarketError::AlreadyRated(id))
    );
    let p = registry.get_item(id).unwrap();
    assert_eq!((p.rating, p.n_ratings), (4.0, 1));

    assert_eq!(registry.rate_item(&c, id, 2).unwrap(), 3.0);
    assert_eq!(registry.get_item(id).unwrap().n_ratings, 2);
}

#[test]
fn any_integer_rating_is_accepted() {
    let (registry, id) = registry_with_widget();
    let b = BuyerId::new("127.0.0.1:50053");
    let c = BuyerId::new("127.0.0.1:50054");
    assert_eq!(registry.rate_item(&b, id, 9).unwrap(), 9.0);
    assert_eq!(registry.rate_item(&c, id, -3).unwrap(), 3.0);
    assert_eq!(registry.get_item(id).unwrap().n_ratings, 2);
}

#[test]
fn wishlist_duplicates_are_rejected() {
    let (registry, id) = registry_with_widget();
    let b = BuyerId::new("127.0.0.1:50053");
    registry.wishlist_item(&b, id).unwrap();
    assert_eq!(
        registry.wishlist_item(&b, id),
        Err(MarketError::AlreadyWishlisted(id))
    );
    assert_eq!(
        registry.wishlist_item(&b, ProductId(99)),
        Err(MarketError::ProductNotFound(ProductId(99)))
    );
    assert_eq!(registry.display_wishlist(&b).len(), 1);
    assert!(registry
        .display_wishlist(&BuyerId::new("nobody"))
        .is_empty());
}

#[test]
fn delete_purges_wishlists_and_blocks_later_calls() {
    let (registry, id) = registry_with_widget();
    let b = BuyerId::new("127.0.0.1:50053");
    let c = BuyerId::new("127.0.0.1:50054");
    registry.wishlist_item(&b, id).unwrap();
    registry.wishlist_item(&c, id).unwrap();

    registry.delete_item(&seller_a(), id).unwrap();

    assert!(registry.display_wishlist(&b).is_empty());
    assert!(registry.display_wishlist(&c).is_empty());
    assert!(registry.search_item("*", CategoryFilter::All).is_empty());
    assert_eq!(
        registry.wishlist_item(&b, id),
        Err(MarketError::ProductNotFound(id))
    );
    assert_eq!(
        registry.rate_item(&b, id, 3),
        Err(MarketError::ProductNotFound(id))
    );
    assert_eq!(
        registry.buy_item(id, 1),
        Err(MarketError::ProductNotFound(id))
    );
    assert!(registry.display_seller_items(&seller_a()).unwrap().is_empty());
}

#[test]
fn delete_failure_order() {
    let (registry, id) = registry_with_widget();
    let other = SellerId::new("127.0.0.1:50060", "seller-o");

    assert_eq!(
        registry.delete_item(&other, id),
        Err(MarketError::SellerNotFound)
    );
    registry.register_seller(other.clone()).unwrap();
    assert_eq!(
        registry.delete_item(&other, ProductId(42)),
        Err(MarketError::ProductNotFound(ProductId(42)))
    );
    assert_eq!(registry.delete_item(&other, id), Err(MarketError::NotOwner(id)));
    assert!(registry.get_item(id).is_ok());
}

#[test]
fn update_enforces_ownership() {
    let (registry, id) = registry_with_widget();
    let other = SellerId::new("127.0.0.1:50060", "seller-o");

    assert_eq!(
        registry.update_item(&seller_a(), ProductId(7), 1.0, 1),
        Err(MarketError::ProductNotFound(ProductId(7)))
    );
    assert_eq!(
        registry.update_item(&other, id, 1.0, 1),
        Err(MarketError::SellerNotFound)
    );
    registry.register_seller(other.clone()).unwrap();
    assert_eq!(
        registry.update_item(&other, id, 1.0, 1),
        Err(MarketError::NotOwner(id))
    );
    let p = registry.get_item(id).unwrap();
    assert_eq!((p.price, p.quantity), (10.0, 5));

    let b = BuyerId::new("127.0.0.1:50053");
    registry.wishlist_item(&b, id).unwrap();
    let update = registry.update_item(&seller_a(), id, 12.5, 9).unwrap();
    assert_eq!(update.watchers, vec![b]);
    let p = registry.get_item(id).unwrap();
    assert_eq!((p.price, p.quantity), (12.5, 9));
}

#[test]
fn search_modes() {
    let registry = MarketRegistry::new();
    registry.register_seller(seller_a()).unwrap();
    registry
        .sell_item(&seller_a(), listing("Shirt", Category::Fashion, 20.0, 3))
        .unwrap();
    registry
        .sell_item(&seller_a(), listing("Shirt", Category::Others, 5.0, 3))
        .unwrap();
    registry
        .sell_item(&seller_a(), listing("Phone", Category::Electronics, 300.0, 1))
        .unwrap();

    // Wildcard name wins over any category.
    let all = registry.search_item("*", CategoryFilter::Only(Category::Fashion));
    assert_eq!(all.len(), 3);
    assert!(all.windows(2).all(|w| w[0].id < w[1].id));

    assert_eq!(registry.search_item("Shirt", CategoryFilter::All).len(), 2);
    let fashion = registry.search_item("Shirt", CategoryFilter::Only(Category::Fashion));
    assert_eq!(fashion.len(), 1);
    assert_eq!(fashion[0].price, 20.0);

    // No partial matching.
    assert!(registry.search_item("Shi", CategoryFilter::All).is_empty());
    assert!(registry.search_item("shirt", CategoryFilter::All).is_empty());

    // Unknown or miscased category tokens match nothing, except under `*`.
    let toys = CategoryFilter::from_token("Toys");
    assert_eq!(registry.search_item("*", toys).len(), 3);
    assert!(registry.search_item("Shirt", toys).is_empty());
    let lower = CategoryFilter::from_token("fashion");
    assert!(registry.search_item("Shirt", lower).is_empty());
    assert_eq!(
        registry
            .search_item("Shirt", CategoryFilter::from_token("Fashion"))
            .len(),
        1
    );
}

#[test]
fn display_seller_items_lists_only_own_products() {
    let (registry, _) = registry_with_widget();
    let other = SellerId::new("127.0.0.1:50060", "seller-o");
    registry.register_seller(other.clone()).unwrap();
    registry
        .sell_item(&other, listing("Gadget", Category::Others, 2.0, 1))
        .unwrap();

    let mine = registry.display_seller_items(&seller_a()).unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].name, "Widget");
    assert_eq!(
        registry.display_seller_items(&SellerId::new("x", "y")),
        Err(MarketError::SellerNotFound)
    );
}

#[test]
fn concurrent_buys_never_exceed_stock() {
    let registry = MarketRegistry::new();
    registry.register_seller(seller_a()).unwrap();
    let stock = 500;
    let id = registry
        .sell_item(&seller_a(), listing("Widget", Category::Electronics, 1.0, stock))
        .unwrap();

    let sold = AtomicU32::new(0);
    std::thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                for _ in 0..100 {
                    if registry.buy_item(id, 1).is_ok() {
                        sold.fetch_add(1, Ordering::Relaxed);
                    }
                }
            });
        }
    });

    assert_eq!(sold.load(Ordering::Relaxed), stock);
    assert_eq!(registry.get_item(id).unwrap().quantity, 0);
}

#[test]
fn concurrent_ratings_by_one_buyer_count_once() {
    let (registry, id) = registry_with_widget();
    let b = BuyerId::new("127.0.0.1:50053");
    let accepted = AtomicU32::new(0);
    std::thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                if registry.rate_item(&b, id, 5).is_ok() {
                    accepted.fetch_add(1, Ordering::Relaxed);
                }
            });
        }
    });
    assert_eq!(accepted.load(Ordering::Relaxed), 1);
    assert_eq!(registry.get_item(id).unwrap().n_ratings, 1);
}

#[test]
fn concurrent_delete_and_wishlist_leave_no_stale_ids() {
    for _ in 0..50 {
        let (registry, id) = registry_with_widget();
        let b = BuyerId::new("127.0.0.1:50053");
        std::thread::scope(|s| {
            s.spawn(|| {
                let _ = registry.wishlist_item(&b, id);
            });
            s.spawn(|| {
                registry.delete_item(&seller_a(), id).unwrap();
            });
        });
        assert!(registry.display_wishlist(&b).is_empty());
    }
}
