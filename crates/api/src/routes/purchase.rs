//! # 采购台账路由控制器
//!
//! 实现 `/api/purchases` 路径下的 REST 接口：过滤查询、创建、合并更新与删除。
//! 记录为自由结构文档，写路径只对 `date` 字段做归一化。

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;

use bahi_core::common::date;
use bahi_core::store::port::PurchaseFilter;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiResponse, CreatedResponse, RecordPayload, StatusResponse};

#[derive(Deserialize, ToSchema)]
pub struct ListPurchasesQuery {
    #[serde(rename = "businessNo")]
    pub business_no: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// 列出采购记录
///
/// 单号做大小写不敏感子串匹配，日期为闭区间过滤，结果按日期降序全量返回。
#[utoipa::path(
    get,
    path = "/api/purchases",
    tag = "采购 (Purchases)",
    params(
        ("businessNo" = Option<String>, Query, description = "单号子串，大小写不敏感"),
        ("from" = Option<String>, Query, description = "日期下界 (YYYY-MM-DD，含)"),
        ("to" = Option<String>, Query, description = "日期上界 (YYYY-MM-DD，含)")
    ),
    responses(
        (status = 200, description = "获取成功", body = ApiResponse<Vec<RecordPayload>>),
        (status = 500, description = "服务器内部错误")
    )
)]
pub async fn list_purchases(
    State(state): State<AppState>,
    Query(query): Query<ListPurchasesQuery>,
) -> Result<Json<ApiResponse<Vec<RecordPayload>>>, ApiError> {
    // 空字符串视同未提供，与历史行为一致
    let filter = PurchaseFilter {
        business_no: query.business_no.filter(|s| !s.is_empty()),
        from: query.from.filter(|s| !s.is_empty()),
        to: query.to.filter(|s| !s.is_empty()),
    };

    let documents = state.purchase_store.list_purchases(&filter).await?;
    let payload: Vec<RecordPayload> = documents.into_iter().map(RecordPayload::from).collect();
    Ok(Json(ApiResponse::ok(payload)))
}

/// 创建采购记录
///
/// 接受任意形状的 JSON 对象；`date` 字段存在时按写路径归一化
/// （畸形日期静默置空，不拒绝请求）。
#[utoipa::path(
    post,
    path = "/api/purchases",
    tag = "采购 (Purchases)",
    request_body = RecordPayload,
    responses(
        (status = 201, description = "创建成功，返回新标识符", body = ApiResponse<CreatedResponse>),
        (status = 400, description = "请求体不是 JSON 对象"),
        (status = 500, description = "服务器内部错误")
    )
)]
pub async fn create_purchase(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedResponse>>), ApiError> {
    let mut doc = super::into_document(body)?;
    if let Some(raw) = doc.get("date").cloned() {
        doc.insert("date", date::normalize_for_write(&raw));
    }

    let id = state.purchase_store.insert_purchase(doc).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(CreatedResponse::new(id.to_hex()))),
    ))
}

/// 更新采购记录
///
/// 将提供的字段合并进既有记录，未提供的字段保持原值。
/// 标识符无匹配时同样报告成功（历史契约，不返回 404）。
#[utoipa::path(
    put,
    path = "/api/purchases/{id}",
    tag = "采购 (Purchases)",
    params(
        ("id" = String, Path, description = "记录标识符")
    ),
    request_body = RecordPayload,
    responses(
        (status = 200, description = "更新成功", body = ApiResponse<StatusResponse>),
        (status = 400, description = "标识符或请求体非法"),
        (status = 500, description = "服务器内部错误")
    )
)]
pub async fn update_purchase(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<ApiResponse<StatusResponse>>, ApiError> {
    let id = super::parse_object_id(&id)?;
    let mut fields = super::into_document(body)?;
    if let Some(raw) = fields.get("date").cloned() {
        fields.insert("date", date::normalize_for_write(&raw));
    }

    state.purchase_store.update_purchase(&id, fields).await?;
    Ok(Json(ApiResponse::ok(StatusResponse::success())))
}

/// 删除采购记录
///
/// 无论记录是否存在都报告成功，删除在效果上幂等。
#[utoipa::path(
    delete,
    path = "/api/purchases/{id}",
    tag = "采购 (Purchases)",
    params(
        ("id" = String, Path, description = "记录标识符")
    ),
    responses(
        (status = 200, description = "删除成功", body = ApiResponse<StatusResponse>),
        (status = 400, description = "标识符非法"),
        (status = 500, description = "服务器内部错误")
    )
)]
pub async fn delete_purchase(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<StatusResponse>>, ApiError> {
    let id = super::parse_object_id(&id)?;
    state.purchase_store.delete_purchase(&id).await?;
    Ok(Json(ApiResponse::ok(StatusResponse::success())))
}
