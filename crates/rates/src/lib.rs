//! # `bahi-rates` - 第三方汇率适配器
//!
//! 实现 `bahi-core` 的 `RateProvider` 端口，透传 exchangeratesapi.io 的
//! 即期报价并换算 USD→INR 比值。无缓存、无重试，也不配置显式超时。

pub mod exchangeratesapi;
