use thiserror::Error;

/// # Summary
/// 汇率数据域错误枚举，处理网络、解析及上游报错等问题。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug)]
pub enum RateError {
    // 网络层错误，包含底层 HTTP 客户端错误信息
    #[error("Network error: {0}")]
    Network(String),
    // 数据解析错误，如 JSON 格式不匹配
    #[error("Parse error: {0}")]
    Parse(String),
    // 上游响应体中携带的业务错误
    #[error("Upstream error: {0}")]
    Upstream(String),
    // 响应缺少期望的汇率字段（或美元基准为零，比值无定义）
    #[error("Rates unavailable")]
    RatesUnavailable,
}
