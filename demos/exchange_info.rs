//! Example: Public REST endpoints.
//!
//! Run with: cargo run --example exchange_info

use binance_api_client::spot::rest::BinanceRestClient;
use binance_api_client::spot::rest::public::ExchangeInfoRequest;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = BinanceRestClient::new();

    client.ping().await?;
    let time = client.get_server_time().await?;
    println!("Server time: {}", time.server_time);

    let status = client.get_system_status().await?;
    println!("System status: {} ({})", status.msg, status.status);

    let request = ExchangeInfoRequest::for_symbols(["BTCUSDT", "ETHUSDT"]);
    let info = client.get_exchange_info(Some(&request)).await?;
    for symbol in &info.symbols {
        println!(
            "{}: {} / {} status={}",
            symbol.symbol, symbol.base_asset, symbol.quote_asset, symbol.status
        );
        if let Some(price) = symbol.price_filter() {
            println!("  tick size: {}", price.tick_size);
        }
        if let Some(lot) = symbol.lot_size() {
            println!("  step size: {}", lot.step_size);
        }
    }

    for limit in &info.rate_limits {
        println!(
            "Rate limit {:?}: {} per {} {:?}",
            limit.rate_limit_type, limit.limit, limit.interval_num, limit.interval
        );
    }

    Ok(())
}
