//! 汇率提供者的集成测试，上游以 wiremock 模拟。

use bahi_core::config::RatesConfig;
use bahi_core::rates::error::RateError;
use bahi_core::rates::port::RateProvider;
use bahi_rates::exchangeratesapi::ExchangeRatesApiProvider;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> ExchangeRatesApiProvider {
    ExchangeRatesApiProvider::new(RatesConfig {
        endpoint: format!("{}/v1/latest", server.uri()),
        access_key: "test-key".to_string(),
    })
}

#[tokio::test]
async fn test_fetch_rate_and_round() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/latest"))
        .and(query_param("access_key", "test-key"))
        .and(query_param("symbols", "USD,INR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "base": "EUR",
            "date": "2026-08-04",
            "rates": { "USD": 1.0842, "INR": 90.3321 }
        })))
        .mount(&server)
        .await;

    let rate = provider_for(&server).usd_to_inr().await.unwrap();
    let expected = (90.3321_f64 / 1.0842 * 10_000.0).round() / 10_000.0;
    assert_eq!(rate, expected);
}

#[tokio::test]
async fn test_upstream_error_is_propagated() {
    let server = MockServer::start().await;

    // 上游把业务错误编码在 200 响应体里
    Mock::given(method("GET"))
        .and(path("/v1/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": {
                "code": 104,
                "type": "usage_limit_reached",
                "info": "Your monthly usage limit has been reached."
            }
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server).usd_to_inr().await.unwrap_err();
    match err {
        RateError::Upstream(message) => {
            assert!(message.contains("monthly usage limit"));
        }
        other => panic!("expected Upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_rates_reported_as_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "rates": { "USD": 1.0842 }
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server).usd_to_inr().await.unwrap_err();
    assert!(matches!(err, RateError::RatesUnavailable));
}

#[tokio::test]
async fn test_zero_usd_base_reported_as_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "rates": { "USD": 0.0, "INR": 90.0 }
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server).usd_to_inr().await.unwrap_err();
    assert!(matches!(err, RateError::RatesUnavailable));
}

#[tokio::test]
async fn test_http_failure_without_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/latest"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = provider_for(&server).usd_to_inr().await.unwrap_err();
    assert!(matches!(err, RateError::Network(_)));
}
