/*
[INPUT]:  The compiled `biscoint` binary and a mock exchange
[OUTPUT]: Test results for end-to-end command behavior
[POS]:    Integration tests - CLI surface
[UPDATE]: When subcommands, flags, or output formats change
*/

use std::process::Output;

use serde_json::{Value, json};
use tokio::process::Command;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn run_cli(server: &MockServer, args: &[&str], credentials: bool) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_biscoint"));
    command
        .arg("--api-url")
        .arg(server.uri())
        .args(args)
        .env_remove("BISCOINT_API_URL")
        .env_remove("BISCOINT_API_KEY")
        .env_remove("BISCOINT_API_SECRET");
    if credentials {
        command
            .env("BISCOINT_API_KEY", "cli-key")
            .env("BISCOINT_API_SECRET", "cli-secret");
    }
    command.output().await.expect("Failed to start biscoint binary")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "Process exited with non-zero status: {}\nStderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[tokio::test]
async fn ticker_prints_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/ticker"))
        .and(query_param("isQuote", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "",
            "data": {
                "base": "BTC",
                "quote": "BRL",
                "ask": "35343.56",
                "askQuoteAmountRef": "1000.00",
                "askBaseAmountRef": "0.02829370",
                "bid": "34969.11",
                "bidQuoteAmountRef": "1000.00",
                "bidBaseAmountRef": "0.02859667",
                "timestamp": "2020-03-20T11:42:28.302Z"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_cli(&server, &["ticker", "--is-quote", "false"], false).await;
    let payload = stdout_json(&output);
    assert_eq!(payload["base"], "BTC");
    assert_eq!(payload["ask"], "35343.56");
}

#[tokio::test]
async fn raw_call_signs_private_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/trades"))
        .and(header("BSCNT-APIKEY", "cli-key"))
        .and(query_param("length", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "", "data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_cli(
        &server,
        &["call", "/v1/trades", "--private", "--param", "length=3"],
        true,
    )
    .await;
    assert_eq!(stdout_json(&output), json!({"message": "", "data": []}));
}

#[tokio::test]
async fn private_command_without_credentials_fails_locally() {
    let server = MockServer::start().await;

    let output = run_cli(&server, &["balance"], false).await;
    assert!(!output.status.success());

    let report: Value = serde_json::from_slice(&output.stderr).expect("stderr is JSON");
    assert_eq!(report["kind"], "InvalidInput");
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn api_error_reported_on_stderr() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/offer"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errorCode": "OfferExpired",
            "message": "offer has expired"
        })))
        .mount(&server)
        .await;

    let output = run_cli(&server, &["confirm", "abc123"], true).await;
    assert!(!output.status.success());

    let report: Value = serde_json::from_slice(&output.stderr).expect("stderr is JSON");
    assert_eq!(report["kind"], "ApiError");
    assert_eq!(report["statusCode"], 400);
    assert_eq!(report["errorCode"], "OfferExpired");
    assert_eq!(report["retryable"], false);
}
