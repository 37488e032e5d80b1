//! # 汇率端口的测试替身 (test-utils)

use async_trait::async_trait;

use super::error::RateError;
use super::port::RateProvider;

/// 恒定返回固定汇率的提供者
pub struct FixedRateProvider {
    rate: f64,
}

impl FixedRateProvider {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }
}

#[async_trait]
impl RateProvider for FixedRateProvider {
    async fn usd_to_inr(&self) -> Result<f64, RateError> {
        Ok(self.rate)
    }
}

/// 恒定返回「汇率不可用」的提供者，用于演练上游失败路径
pub struct UnavailableRateProvider;

#[async_trait]
impl RateProvider for UnavailableRateProvider {
    async fn usd_to_inr(&self) -> Result<f64, RateError> {
        Err(RateError::RatesUnavailable)
    }
}
