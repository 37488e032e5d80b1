//! # 汇率透传路由控制器

use axum::extract::State;
use axum::Json;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiResponse, ExchangeRateResponse};

/// 获取 USD→INR 汇率
///
/// 实时转发第三方报价并返回换算比，无缓存、无重试；
/// 上游失败时透传其错误信息。
#[utoipa::path(
    get,
    path = "/api/exchange_rate",
    tag = "汇率 (Exchange Rate)",
    responses(
        (status = 200, description = "获取成功", body = ApiResponse<ExchangeRateResponse>),
        (status = 502, description = "上游服务错误")
    )
)]
pub async fn get_exchange_rate(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ExchangeRateResponse>>, ApiError> {
    let rate = state.rate_provider.usd_to_inr().await?;
    Ok(Json(ApiResponse::ok(ExchangeRateResponse { rate })))
}
