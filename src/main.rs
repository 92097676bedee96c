//! Legacy binary entrypoint.
//!
//! The registry server lives in `src/bin/api_server.rs` and the buyer/seller
//! front end in `src/bin/market_client.rs`. This binary only points there.

fn main() {
    println!("marketplace-registry: the server and client are separate binaries.");
    println!("Run:");
    println!("  cargo run --bin api_server");
    println!("then, for example:");
    println!("  cargo run --bin market-client -- search --name '*' --category all");
}
