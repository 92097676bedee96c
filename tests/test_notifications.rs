//! Notification path: update/purchase events reach the configured notifier,
//! and the HTTP notifier delivers to a listener built from
//! `notification_router`.

use async_trait::async_trait;
use marketplace_registry::client::notification_router;
use marketplace_registry::domain::market::{
    BuyerId, Category, MarketRegistry, NewListing, SellerId,
};
use marketplace_registry::{HttpNotifier, MarketplaceService, Notifier};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

struct RecordingNotifier {
    sink: UnboundedSender<(String, String)>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, endpoint: &str, message: &str) -> anyhow::Result<()> {
        let _ = self.sink.send((endpoint.to_string(), message.to_string()));
        Ok(())
    }
}

fn widget() -> NewListing {
    NewListing {
        name: "Widget".to_string(),
        category: Category::Electronics,
        price: 10.0,
        quantity: 5,
        description: String::new(),
    }
}

async fn next<T>(rx: &mut UnboundedReceiver<T>) -> T {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("notification timed out")
        .expect("channel closed")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_update_and_purchase_notifications() {
    let (tx, mut rx) = unbounded_channel();
    let service = MarketplaceService::with_notifier(
        Arc::new(MarketRegistry::new()),
        Arc::new(RecordingNotifier { sink: tx }),
    );
    let seller = SellerId::new("127.0.0.1:50052", "seller-a");
    service.register_seller(seller.clone()).unwrap();
    let id = service.sell_item(&seller, widget()).unwrap();

    let buyer = BuyerId::new("127.0.0.1:50053");
    service.wishlist_item(&buyer, id).unwrap();

    service.update_item(&seller, id, 8.0, 4).unwrap();
    let (endpoint, message) = next(&mut rx).await;
    assert_eq!(endpoint, "127.0.0.1:50053");
    assert_eq!(message, "Item 1 has been updated! New price 8 and quantity 4");

    service.buy_item(Some(&buyer), id, 3).unwrap();
    let (endpoint, message) = next(&mut rx).await;
    assert_eq!(endpoint, "127.0.0.1:50052");
    assert_eq!(message, "Your product with id 1 has sold 3 units (1 left)");

    // Failed calls notify nobody.
    assert!(service.buy_item(None, id, 3).is_err());
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_service_without_notifier_is_silent() {
    let service = MarketplaceService::new(Arc::new(MarketRegistry::new()));
    assert!(!service.notifications_enabled());
    let seller = SellerId::new("127.0.0.1:50052", "seller-a");
    service.register_seller(seller.clone()).unwrap();
    let id = service.sell_item(&seller, widget()).unwrap();
    let purchase = service.buy_item(None, id, 5).unwrap();
    assert_eq!(purchase.remaining, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_http_notifier_delivers_to_listener() -> Result<(), Box<dyn std::error::Error>> {
    let (tx, mut rx) = unbounded_channel();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let endpoint = listener.local_addr()?.to_string();
    tokio::spawn(async move {
        axum::serve(listener, notification_router(tx)).await.unwrap();
    });

    let notifier = HttpNotifier::new(Duration::from_secs(2))?;
    notifier.notify(&endpoint, "hello seller").await?;
    assert_eq!(next(&mut rx).await, "hello seller");

    // Unreachable endpoints surface as an error to the caller of `notify`
    // (the service only logs it).
    let dead = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let dead_endpoint = dead.local_addr()?.to_string();
    drop(dead);
    assert!(notifier.notify(&dead_endpoint, "lost").await.is_err());
    Ok(())
}
