use std::sync::Once;

use async_trait::async_trait;
use bahi_core::config::RatesConfig;
use bahi_core::rates::error::RateError;
use bahi_core::rates::port::RateProvider;
use reqwest::Client;
use serde::Deserialize;

static CRYPTO_PROVIDER_INIT: Once = Once::new();

/// # Summary
/// exchangeratesapi.io 汇率提供者实现。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端进行通讯。
/// - 不设置显式超时，请求时长仅受传输层默认值约束。
#[derive(Clone)]
pub struct ExchangeRatesApiProvider {
    /// 内部使用的 HTTP 客户端
    client: Client,
    config: RatesConfig,
}

impl ExchangeRatesApiProvider {
    /// # Summary
    /// 创建一个新的 ExchangeRatesApiProvider 实例。
    ///
    /// # Arguments
    /// * `config`: 上游端点与访问密钥。
    ///
    /// # Returns
    /// 返回初始化后的 ExchangeRatesApiProvider。
    pub fn new(config: RatesConfig) -> Self {
        CRYPTO_PROVIDER_INIT.call_once(|| {
            let _ = rustls::crypto::ring::default_provider().install_default();
        });
        Self {
            client: Client::new(),
            config,
        }
    }
}

/// # Summary
/// 上游 `latest` 接口响应顶层结构。
///
/// # Invariants
/// - 错误时 `error` 分支有值，正常时 `rates` 分支有值。
#[derive(Deserialize, Debug)]
struct LatestRatesResponse {
    rates: Option<RateTable>,
    error: Option<UpstreamError>,
}

/// # Summary
/// 上游报价表，仅关心 USD 与 INR 两个符号。
#[derive(Deserialize, Debug)]
struct RateTable {
    #[serde(rename = "USD")]
    usd: Option<f64>,
    #[serde(rename = "INR")]
    inr: Option<f64>,
}

/// # Summary
/// 上游错误详情。字段在不同错误码下时有时无。
#[derive(Deserialize, Debug)]
struct UpstreamError {
    code: Option<serde_json::Value>,
    #[serde(rename = "type")]
    kind: Option<String>,
    info: Option<String>,
}

impl UpstreamError {
    /// 尽量取出人类可读的错误信息
    fn message(&self) -> String {
        self.info
            .clone()
            .or_else(|| self.kind.clone())
            .or_else(|| self.code.as_ref().map(ToString::to_string))
            .unwrap_or_else(|| "unspecified upstream error".to_string())
    }
}

/// 四舍五入到 4 位小数
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[async_trait]
impl RateProvider for ExchangeRatesApiProvider {
    /// # Summary
    /// 抓取 USD 与 INR 即期报价并计算换算比。
    ///
    /// # Logic
    /// 1. 携带 access_key 与 symbols=USD,INR 请求 `latest` 端点。
    /// 2. 无论 HTTP 状态码如何都先解析响应体：上游习惯把业务错误编码在
    ///    JSON 的 `error` 分支里。
    /// 3. `error` 分支有值时透传其信息。
    /// 4. 报价缺失（或 USD 基准为零）时报告汇率不可用。
    /// 5. INR/USD 四舍五入到 4 位小数。
    ///
    /// # Returns
    /// 成功返回换算比，失败返回 `RateError`。
    async fn usd_to_inr(&self) -> Result<f64, RateError> {
        let resp = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("access_key", self.config.access_key.as_str()),
                ("symbols", "USD,INR"),
            ])
            .send()
            .await
            .map_err(|e| RateError::Network(e.to_string()))?;

        let status = resp.status();
        let payload: LatestRatesResponse = resp.json().await.map_err(|e| {
            if status.is_success() {
                RateError::Parse(e.to_string())
            } else {
                RateError::Network(format!("HTTP {status}"))
            }
        })?;

        if let Some(err) = payload.error {
            let message = err.message();
            tracing::warn!("Exchange rate upstream returned an error: {}", message);
            return Err(RateError::Upstream(message));
        }

        let rates = payload.rates.ok_or(RateError::RatesUnavailable)?;
        match (rates.usd, rates.inr) {
            (Some(usd), Some(inr)) if usd != 0.0 => Ok(round4(inr / usd)),
            _ => Err(RateError::RatesUnavailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::round4;

    #[test]
    fn test_round4() {
        assert_eq!(round4(83.316_834_2), 83.3168);
        assert_eq!(round4(83.316_86), 83.3169);
        assert_eq!(round4(90.0), 90.0);
    }
}
