/*
[INPUT]:  API credentials from the environment and an offer amount
[OUTPUT]: Balance, a quoted offer, and optionally its confirmation receipt
[POS]:    Examples - trading operations
[UPDATE]: When trading API changes
*/

use biscoint_adapter::*;

/// Example: Quote and confirm an offer (requires credentials)
///
/// Private endpoints carry BSCNT-APIKEY, BSCNT-NONCE, BSCNT-TIMESTAMP and
/// BSCNT-SIGN headers. Set `BISCOINT_CONFIRM=1` to actually execute the trade.
#[tokio::main]
async fn main() {
    println!("=== Biscoint Trading Example ===\n");

    let credentials = match Credentials::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Missing credentials: {}", e);
            eprintln!("Set BISCOINT_API_KEY and BISCOINT_API_SECRET");
            return;
        }
    };

    let client = match BiscointClient::new().and_then(|c| c.with_credentials(credentials)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ Authenticated client created");

    match client.get_balance().await {
        Ok(balance) => {
            for currency in balance.currencies() {
                println!("  {}: {}", currency, balance.get(currency).unwrap_or_default());
            }
        }
        Err(e) => println!("✗ Balance error: {}", e),
    }

    println!("\nRequesting offer to buy 100.00 BRL of BTC...");
    let offer = match client.get_offer(&OfferRequest::new(Op::Buy, "100.00", true)).await {
        Ok(offer) => offer,
        Err(e) => {
            println!("✗ Offer error: {}", e);
            return;
        }
    };
    println!(
        "✓ Offer {}: {} {} at {}",
        offer.offer_id, offer.base_amount, offer.base, offer.ef_price
    );

    if std::env::var("BISCOINT_CONFIRM").as_deref() != Ok("1") {
        println!("\nSkipping confirmation (BISCOINT_CONFIRM not set)");
        return;
    }

    match client.confirm_offer(&offer.offer_id).await {
        Ok(receipt) => println!("✓ Confirmed at {:?}", receipt.confirmed_at),
        Err(e) if e.is_auth_error() => println!("✗ Authentication rejected: {}", e),
        Err(e) => println!("✗ Confirm error: {}", e),
    }
}
