/*
[INPUT]:  Market pair (e.g., BTC/BRL)
[OUTPUT]: Ticker, fee schedule and exchange metadata
[POS]:    Examples - public market data queries
[UPDATE]: When adding new public endpoints
*/

use biscoint_adapter::*;

/// Example: Query public market data
///
/// Public endpoints are sent without authentication headers.
#[tokio::main]
async fn main() {
    println!("=== Biscoint Market Data Example ===\n");

    let client = match BiscointClient::new() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created (no credentials needed)\n");

    println!("Querying ticker for {}/{}...", DEFAULT_BASE, DEFAULT_QUOTE);
    match client.get_ticker(&TickerRequest::default()).await {
        Ok(ticker) => println!("✓ Ask {} / Bid {}", ticker.ask, ticker.bid),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\nQuerying fees...");
    match client.get_fees().await {
        Ok(fees) => println!("✓ Fees: {}", fees),
        Err(e) => println!("✗ Error: {}", e),
    }

    // Raw call, body returned verbatim with its envelope
    println!("\nQuerying meta...");
    match client.call("meta", HttpMethod::Get, Params::new(), false).await {
        Ok(meta) => println!("✓ Meta: {}", meta),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Market data example complete");
}
