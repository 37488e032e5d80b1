//! # 费用台账路由控制器
//!
//! 实现 `/api/expenses` 路径下的 REST 接口：过滤查询、带业务键检查的创建、
//! 合并更新、删除与全量汇总。

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{
    ApiResponse, CreatedResponse, ExpenseSummaryResponse, RecordPayload, StatusResponse,
};

#[derive(Deserialize, ToSchema)]
pub struct ListExpensesQuery {
    #[serde(rename = "jobNo")]
    pub job_no: Option<String>,
}

/// 列出费用记录
///
/// 可按作业号做大小写不敏感子串过滤；结果按插入序倒排（最新在前）。
#[utoipa::path(
    get,
    path = "/api/expenses",
    tag = "费用 (Expenses)",
    params(
        ("jobNo" = Option<String>, Query, description = "作业号子串，大小写不敏感")
    ),
    responses(
        (status = 200, description = "获取成功", body = ApiResponse<Vec<RecordPayload>>),
        (status = 500, description = "服务器内部错误")
    )
)]
pub async fn list_expenses(
    State(state): State<AppState>,
    Query(query): Query<ListExpensesQuery>,
) -> Result<Json<ApiResponse<Vec<RecordPayload>>>, ApiError> {
    let job_no = query.job_no.filter(|s| !s.is_empty());
    let documents = state.expense_store.list_expenses(job_no.as_deref()).await?;
    let payload: Vec<RecordPayload> = documents.into_iter().map(RecordPayload::from).collect();
    Ok(Json(ApiResponse::ok(payload)))
}

/// 创建费用记录
///
/// `jobNo` 必填且非空；插入前按业务键做一次存在性检查，命中则报 409 并放弃插入。
/// 服务端在落库时盖上 `created_at` 时间戳，此后不再修改。
///
/// 先查后插并不原子：两个携带相同 `jobNo` 的并发创建可能同时通过检查并
/// 双双落库。这是沿袭下来的已知竞态，集合层面没有唯一索引兜底。
#[utoipa::path(
    post,
    path = "/api/expenses",
    tag = "费用 (Expenses)",
    request_body = RecordPayload,
    responses(
        (status = 201, description = "创建成功，返回新标识符", body = ApiResponse<CreatedResponse>),
        (status = 400, description = "缺少 jobNo"),
        (status = 409, description = "jobNo 已存在"),
        (status = 500, description = "服务器内部错误")
    )
)]
pub async fn create_expense(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedResponse>>), ApiError> {
    let mut doc = super::into_document(body)?;

    let job_no = match doc.get_str("jobNo") {
        Ok(value) if !value.is_empty() => value.to_string(),
        _ => return Err(ApiError::BadRequest("Job No. is required".to_string())),
    };

    if state.expense_store.find_by_job_no(&job_no).await?.is_some() {
        return Err(ApiError::Conflict("Job No. already exists".to_string()));
    }

    doc.insert("created_at", bson::DateTime::now());
    let id = state.expense_store.insert_expense(doc).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(CreatedResponse::new(id.to_hex()))),
    ))
}

/// 更新费用记录
///
/// 合并提供的字段；不重新校验 `jobNo` 唯一性，PUT 可以悄悄引入重复业务键。
/// 标识符无匹配时同样报告成功。
#[utoipa::path(
    put,
    path = "/api/expenses/{id}",
    tag = "费用 (Expenses)",
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
pub async fn update_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<ApiResponse<StatusResponse>>, ApiError> {
    let id = super::parse_object_id(&id)?;
    let fields = super::into_document(body)?;
    state.expense_store.update_expense(&id, fields).await?;
    Ok(Json(ApiResponse::ok(StatusResponse::success())))
}

/// 删除费用记录
///
/// 无论记录是否存在都报告成功。
#[utoipa::path(
    delete,
    path = "/api/expenses/{id}",
    tag = "费用 (Expenses)",
    params(
        ("id" = String, Path, description = "记录标识符")
    ),
    responses(
        (status = 200, description = "删除成功", body = ApiResponse<StatusResponse>),
        (status = 400, description = "标识符非法"),
        (status = 500, description = "服务器内部错误")
    )
)]
pub async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<StatusResponse>>, ApiError> {
    let id = super::parse_object_id(&id)?;
    state.expense_store.delete_expense(&id).await?;
    Ok(Json(ApiResponse::ok(StatusResponse::success())))
}

/// 费用汇总
///
/// 扫描全部费用记录，返回作业总数及 `avgRate` / `avgExpense` 的算术平均
/// （2 位小数）。空集合返回全零。
#[utoipa::path(
    get,
    path = "/api/expenses/summary",
    tag = "费用 (Expenses)",
    responses(
        (status = 200, description = "汇总成功", body = ApiResponse<ExpenseSummaryResponse>),
        (status = 500, description = "服务器内部错误")
    )
)]
pub async fn expense_summary(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ExpenseSummaryResponse>>, ApiError> {
    let jobs = state.expense_store.list_expenses(None).await?;
    Ok(Json(ApiResponse::ok(ExpenseSummaryResponse::from_records(
        &jobs,
    ))))
}
