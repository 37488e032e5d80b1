use super::error::RateError;
use async_trait::async_trait;

/// # Summary
/// 汇率数据提供者接口。
///
/// # Invariants
/// - 实现者不做缓存、不做重试；每次调用都触达上游。
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// # Summary
    /// 获取美元兑印度卢比的即期汇率。
    ///
    /// # Logic
    /// 1. 向上游请求 USD 与 INR 两个报价。
    /// 2. 计算 INR/USD 作为有效换算比，四舍五入到 4 位小数。
    ///
    /// # Returns
    /// 成功返回换算比，失败返回 `RateError`（携带上游错误信息）。
    async fn usd_to_inr(&self) -> Result<f64, RateError>;
}
