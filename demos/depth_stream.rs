//! Example: Streaming partial book depth via WebSocket.
//!
//! Prints the best bid and ask for BTCUSDT until Ctrl+C.
//!
//! Run with: cargo run --example depth_stream

use binance_api_client::spot::ws::BinanceWsClient;
use binance_api_client::types::DepthLevels;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=binance_api_client=debug shows dropped frames and read errors
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = BinanceWsClient::new();
    let session = client
        .partial_book_depth("BTCUSDT", DepthLevels::Five, |depth| {
            match (depth.bids.first(), depth.asks.first()) {
                (Some(bid), Some(ask)) => println!(
                    "[{}] bid {} x {} | ask {} x {}",
                    depth.last_update_id, bid.price, bid.quantity, ask.price, ask.quantity
                ),
                _ => println!("[{}] empty book", depth.last_update_id),
            }
        })
        .with_error_handler(|err| eprintln!("Read error: {}", err));

    let handle = session.handle();
    println!("Connecting to {}", session.endpoint());
    println!("Press Ctrl+C to exit.\n");

    let shutdown = handle.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.shutdown();
        }
    });

    session.serve().await?;
    println!("\nReceived {} frames.", handle.frames_received());

    Ok(())
}
