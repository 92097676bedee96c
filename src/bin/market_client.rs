//! Command-line front end for buyers and sellers.
//!
//! Every registry call is one subcommand; `listen` runs the notification
//! endpoint that receives wishlist updates and purchase notices.

use clap::{Parser, Subcommand};
use marketplace_registry::client::{notification_router, MarketClient};
use marketplace_registry::infra::{config, telemetry};
use marketplace_registry::transport::http::types::{RpcResponse, SellerCredentials};
use marketplace_registry::{Category, ProductId};
use tracing::info;

#[derive(Debug, Parser)]
#[clap(version, about = "Marketplace registry client")]
struct Cli {
    /// Registry base URL
    #[clap(long, env = "MARKET_SERVER_URL", default_value = config::DEFAULT_SERVER_URL)]
    server: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, clap::Args)]
struct SellerArgs {
    /// This seller's notification endpoint (ip:port)
    #[clap(long)]
    address: String,
    /// Instance id chosen when the seller process started
    #[clap(long)]
    instance_id: String,
}

impl SellerArgs {
    fn credentials(&self) -> SellerCredentials {
        SellerCredentials {
            address: self.address.clone(),
            instance_id: self.instance_id.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register as a seller
    Register {
        #[clap(flatten)]
        seller: SellerArgs,
    },
    /// List a new item
    Sell {
        #[clap(flatten)]
        seller: SellerArgs,
        #[clap(long)]
        name: String,
        /// Electronics, Fashion or Others
        #[clap(long)]
        category: Category,
        #[clap(long)]
        price: f64,
        #[clap(long)]
        quantity: u32,
        #[clap(long, default_value = "")]
        description: String,
    },
    /// Update an existing item's price and quantity
    Update {
        #[clap(flatten)]
        seller: SellerArgs,
        #[clap(long)]
        id: u64,
        #[clap(long)]
        price: f64,
        #[clap(long)]
        quantity: u32,
    },
    /// Delete an item
    Delete {
        #[clap(flatten)]
        seller: SellerArgs,
        #[clap(long)]
        id: u64,
    },
    /// Display your items
    Items {
        #[clap(flatten)]
        seller: SellerArgs,
    },
    /// Search for items (`*` matches every name, `all` every category)
    Search {
        #[clap(long, default_value = "*")]
        name: String,
        #[clap(long, default_value = "all")]
        category: String,
    },
    /// Rate an item
    Rate {
        #[clap(long)]
        buyer: String,
        #[clap(long)]
        id: u64,
        #[clap(long, allow_negative_numbers = true)]
        rating: i32,
    },
    /// Add an item to your wishlist
    Wishlist {
        #[clap(long)]
        buyer: String,
        #[clap(long)]
        id: u64,
    },
    /// Show your wishlist
    ShowWishlist {
        #[clap(long)]
        buyer: String,
    },
    /// Buy an item
    Buy {
        #[clap(long)]
        buyer: Option<String>,
        #[clap(long)]
        id: u64,
        #[clap(long)]
        quantity: u32,
    },
    /// Show one item
    Show {
        #[clap(long)]
        id: u64,
    },
    /// Query the registry health endpoint
    Health,
    /// Listen for notifications on the given address
    Listen {
        #[clap(long, default_value = "127.0.0.1:50053")]
        bind: String,
    },
}

fn print_response(resp: &RpcResponse) {
    println!("{:?}", resp.status);
    println!("{}", resp.message);
    if let Some(output) = resp
        .data
        .as_ref()
        .and_then(|d| d.get("output"))
        .and_then(|o| o.as_str())
    {
        println!("{}", output);
    } else if let Some(data) = &resp.data {
        println!("{}", data);
    }
}

async fn listen(bind: &str) -> anyhow::Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Listening for notifications on {}", bind);
    let server = tokio::spawn(async move { axum::serve(listener, notification_router(tx)).await });
    loop {
        tokio::select! {
            msg = rx.recv() => match msg {
                Some(m) => println!("Received a notification: {}", m),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    server.abort();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init_tracing();

    let cli = Cli::parse();
    let client = MarketClient::new(cli.server);

    let resp = match cli.command {
        Command::Register { seller } => client.register_seller(&seller.credentials()).await?,
        Command::Sell {
            seller,
            name,
            category,
            price,
            quantity,
            description,
        } => {
            client
                .sell_item(
                    &seller.credentials(),
                    &name,
                    category,
                    price,
                    quantity,
                    &description,
                )
                .await?
        }
        Command::Update {
            seller,
            id,
            price,
            quantity,
        } => {
            client
                .update_item(&seller.credentials(), ProductId(id), price, quantity)
                .await?
        }
        Command::Delete { seller, id } => {
            client
                .delete_item(&seller.credentials(), ProductId(id))
                .await?
        }
        Command::Items { seller } => client.display_seller_items(&seller.credentials()).await?,
        Command::Search { name, category } => client.search_item(&name, &category).await?,
        Command::Rate { buyer, id, rating } => {
            client.rate_item(&buyer, ProductId(id), rating).await?
        }
        Command::Wishlist { buyer, id } => client.wishlist_item(&buyer, ProductId(id)).await?,
        Command::ShowWishlist { buyer } => client.display_wishlist(&buyer).await?,
        Command::Buy {
            buyer,
            id,
            quantity,
        } => {
            client
                .buy_item(buyer.as_deref(), ProductId(id), quantity)
                .await?
        }
        Command::Show { id } => client.get_item(ProductId(id)).await?,
        Command::Health => client.health().await?,
        Command::Listen { bind } => return listen(&bind).await,
    };

    print_response(&resp);
    if !resp.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
