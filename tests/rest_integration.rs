use std::sync::Arc;

use rust_decimal::Decimal;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use binance_api_client::auth::{FixedTimestamp, StaticCredentials};
use binance_api_client::error::BinanceError;
use binance_api_client::spot::rest::public::ExchangeInfoRequest;
use binance_api_client::spot::rest::{BinanceClient, BinanceRestClient, RequestOptions};

const API_KEY: &str = "vmPUZE6mv9SD5VNHk4HlWFsOr6aKE2zvsw0MuIgwCIPy6utIco14y7Ju91duEh8A";
const API_SECRET: &str = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
const TIMESTAMP: u64 = 1_499_827_319_559;

fn build_public_client(server: &MockServer) -> BinanceRestClient {
    BinanceRestClient::builder().base_url(server.uri()).build()
}

fn build_private_client(server: &MockServer) -> BinanceRestClient {
    BinanceRestClient::builder()
        .base_url(server.uri())
        .credentials(Arc::new(StaticCredentials::new(API_KEY, API_SECRET)))
        .timestamp_provider(Arc::new(FixedTimestamp(TIMESTAMP)))
        .build()
}

fn has_no_query(req: &Request) -> bool {
    req.url.query().is_none()
}

#[tokio::test]
async fn test_ping() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    assert_ok!(client.ping().await);
}

#[tokio::test]
async fn test_get_server_time() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/time"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "serverTime": 1_499_827_319_559i64 })),
        )
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let time = client.get_server_time().await.unwrap();
    assert_eq!(time.server_time.unix_timestamp(), 1_499_827_319);
}

#[tokio::test]
async fn test_get_exchange_info_for_symbol() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "timezone": "UTC",
        "serverTime": 1_565_246_363_776i64,
        "rateLimits": [
            {"rateLimitType": "REQUEST_WEIGHT", "interval": "MINUTE", "intervalNum": 1, "limit": 6000}
        ],
        "exchangeFilters": [],
        "symbols": [{
            "symbol": "ETHBTC",
            "status": "TRADING",
            "baseAsset": "ETH",
            "baseAssetPrecision": 8,
            "quoteAsset": "BTC",
            "quotePrecision": 8,
            "quoteAssetPrecision": 8,
            "orderTypes": ["LIMIT", "MARKET"],
            "icebergAllowed": true,
            "isSpotTradingAllowed": true,
            "filters": [
                {"filterType": "PRICE_FILTER", "minPrice": "0.00000100", "maxPrice": "100000.00000000", "tickSize": "0.00000100"},
                {"filterType": "LOT_SIZE", "minQty": "0.00100000", "maxQty": "100000.00000000", "stepSize": "0.00100000"},
                {"filterType": "MAX_NUM_ORDERS", "maxNumOrders": 200}
            ]
        }]
    });

    Mock::given(method("GET"))
        .and(path("/api/v3/exchangeInfo"))
        .and(query_param("symbol", "ETHBTC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let request = ExchangeInfoRequest::for_symbol("ethbtc");
    let info = client.get_exchange_info(Some(&request)).await.unwrap();

    assert_eq!(info.timezone, "UTC");
    assert_eq!(info.rate_limits[0].limit, 6000);
    let symbol = info.symbol("ethbtc").unwrap();
    assert_eq!(symbol.quote_asset_precision, 8);
    assert_eq!(
        symbol.price_filter().unwrap().tick_size,
        "0.000001".parse::<Decimal>().unwrap()
    );
    assert_eq!(
        symbol.lot_size().unwrap().step_size,
        "0.001".parse::<Decimal>().unwrap()
    );
}

#[tokio::test]
async fn test_get_exchange_info_for_symbols() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/exchangeInfo"))
        .and(query_param("symbols", r#"["BTCUSDT","BNBBTC"]"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "timezone": "UTC",
            "serverTime": 1_565_246_363_776i64,
            "symbols": []
        })))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let request = ExchangeInfoRequest::for_symbols(["btcusdt", "BNBBTC"]);
    let info = client.get_exchange_info(Some(&request)).await.unwrap();
    assert!(info.symbols.is_empty());
}

#[tokio::test]
async fn test_get_system_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sapi/v1/system/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "status": 0, "msg": "normal" })),
        )
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let status = assert_ok!(client.get_system_status().await);
    assert!(status.is_normal());
    assert_eq!(status.msg, "normal");
}

#[tokio::test]
async fn test_get_account_is_signed() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "makerCommission": 15,
        "takerCommission": 15,
        "buyerCommission": 0,
        "sellerCommission": 0,
        "canTrade": true,
        "canWithdraw": true,
        "canDeposit": true,
        "updateTime": 123_456_789,
        "accountType": "SPOT",
        "balances": [
            {"asset": "BTC", "free": "4723846.89208129", "locked": "0.00000000"},
            {"asset": "LTC", "free": "0.00000000", "locked": "0.00000000"}
        ],
        "permissions": ["SPOT"]
    });

    Mock::given(method("GET"))
        .and(path("/api/v3/account"))
        .and(header("X-MBX-APIKEY", API_KEY))
        .and(query_param("recvWindow", "5000"))
        .and(query_param("timestamp", TIMESTAMP.to_string()))
        .and(query_param(
            "signature",
            "82f4e72e95e63d666b6da651e82a701722ad8a785a169318d91f36f279c55821",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_private_client(&server);
    let options = RequestOptions::default().recv_window(5000);
    let account = client.get_account(Some(&options)).await.unwrap();

    assert!(account.can_trade);
    assert_eq!(account.non_zero_balances().count(), 1);
    assert_eq!(
        account.balance("btc").unwrap().free,
        "4723846.89208129".parse::<Decimal>().unwrap()
    );
}

#[tokio::test]
async fn test_signed_request_without_recv_window() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/account"))
        .and(|req: &Request| req.url.query_pairs().all(|(k, _)| k != "recvWindow"))
        .and(query_param(
            "signature",
            "2222d49722f6af5da13f6da6bfc0d7de19ca2815ebc98bbc49e4942268472f3f",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "makerCommission": 0, "takerCommission": 0, "buyerCommission": 0,
            "sellerCommission": 0, "canTrade": false, "canWithdraw": false,
            "canDeposit": false, "updateTime": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_private_client(&server);
    let account = client.get_account(None).await.unwrap();
    assert!(account.balances.is_empty());
}

#[tokio::test]
async fn test_user_data_stream_lifecycle() {
    let server = MockServer::start().await;
    let listen_key = "pqia91ma19a5s61cv6a81va65sdf19v8a65a1a5s61cv6a81va65sdf19v8a65a1";

    Mock::given(method("POST"))
        .and(path("/api/v3/userDataStream"))
        .and(header("X-MBX-APIKEY", API_KEY))
        .and(has_no_query)
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "listenKey": listen_key })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/v3/userDataStream"))
        .and(header("X-MBX-APIKEY", API_KEY))
        .and(query_param("listenKey", listen_key))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/v3/userDataStream"))
        .and(header("X-MBX-APIKEY", API_KEY))
        .and(query_param("listenKey", listen_key))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_private_client(&server);
    let key = client.start_user_data_stream().await.unwrap();
    assert_eq!(key.listen_key, listen_key);
    client.keepalive_user_data_stream(&key.listen_key).await.unwrap();
    client.close_user_data_stream(&key.listen_key).await.unwrap();
}

#[tokio::test]
async fn test_api_error_is_mapped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/exchangeInfo"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "code": -1121,
            "msg": "Invalid symbol."
        })))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let request = ExchangeInfoRequest::for_symbol("NOPE");
    let err = client.get_exchange_info(Some(&request)).await.unwrap_err();

    match err {
        BinanceError::Api(api) => {
            assert!(api.is_invalid_symbol());
            assert_eq!(api.msg, "Invalid symbol.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_with_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/ping"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "7")
                .set_body_json(serde_json::json!({
                    "code": -1003,
                    "msg": "Too many requests."
                })),
        )
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let err = client.ping().await.unwrap_err();
    assert!(matches!(
        err,
        BinanceError::RateLimitExceeded {
            retry_after_secs: Some(7)
        }
    ));
}

#[tokio::test]
async fn test_ip_ban_is_rate_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/time"))
        .respond_with(ResponseTemplate::new(418).set_body_string(""))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let err = client.get_server_time().await.unwrap_err();
    assert!(matches!(
        err,
        BinanceError::RateLimitExceeded {
            retry_after_secs: None
        }
    ));
}

#[tokio::test]
async fn test_non_json_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sapi/v1/system/status"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let err = client.get_system_status().await.unwrap_err();
    assert!(matches!(err, BinanceError::InvalidResponse(ref msg) if msg.contains("502")));
}

#[tokio::test]
async fn test_missing_credentials_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v3/userDataStream"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    let err = assert_err!(client.start_user_data_stream().await);
    assert!(matches!(err, BinanceError::MissingCredentials));
}

#[tokio::test]
async fn test_generic_client_usage() {
    async fn status_via_trait<C: BinanceClient>(client: &C) -> bool {
        client.get_system_status().await.unwrap().is_normal()
    }

    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sapi/v1/system/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "status": 1, "msg": "system_maintenance" })),
        )
        .mount(&server)
        .await;

    let client = build_public_client(&server);
    assert!(!status_via_trait(&client).await);
}
