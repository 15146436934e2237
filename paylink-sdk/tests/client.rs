use axum::{Json, Router, http::StatusCode, routing::get};
use paylink_sdk::client::{ClientError, PaymentClient};
use paylink_sdk::objects::{Amount, AmountFormat};
use serde_json::json;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use url::Url;

async fn spawn_server() -> SocketAddr {
    let router = Router::new()
        .route(
            "/payment.json",
            get(|| async { Json(json!({"amount": 250, "currency": "USD"})) }),
        )
        .route(
            "/api/payment",
            get(|| async { Json(json!({"amount": "1500"})) }),
        )
        .route("/broken.json", get(|| async { "<html>oops</html>" }))
        .route(
            "/down.json",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn client(addr: SocketAddr, path: &str) -> PaymentClient {
    PaymentClient::new(Url::parse(&format!("http://{addr}{path}")).unwrap())
}

#[tokio::test]
async fn test_fetch_full_payment() {
    let addr = spawn_server().await;
    let payment = client(addr, "/payment.json").fetch_payment().await.unwrap();
    assert_eq!(payment.amount.render(AmountFormat::Verbatim), "250");
    assert_eq!(payment.currency.as_deref(), Some("USD"));
}

#[tokio::test]
async fn test_fetch_amount_only_payment() {
    let addr = spawn_server().await;
    let payment = client(addr, "/api/payment").fetch_payment().await.unwrap();
    assert_eq!(payment.amount, Amount::Text("1500".into()));
    assert_eq!(payment.currency, None);
}

#[tokio::test]
async fn test_non_success_status_is_api_error() {
    let addr = spawn_server().await;
    let err = client(addr, "/down.json").fetch_payment().await.unwrap_err();
    match err {
        ClientError::Api { status, body } => {
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(body, "maintenance");
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = client(addr, "/nowhere.json").fetch_payment().await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status, .. } if status == StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn test_malformed_body_is_json_error() {
    let addr = spawn_server().await;
    let err = client(addr, "/broken.json").fetch_payment().await.unwrap_err();
    assert!(matches!(err, ClientError::Json(_)));
}

#[tokio::test]
async fn test_unreachable_host_is_http_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(addr, "/payment.json").fetch_payment().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
}
