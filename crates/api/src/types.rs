//! # DTO (Data Transfer Object) 层
//!
//! 将存储文档与端口返回值转化为面向前端 JSON 输出的轻量结构体。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。

use bson::Document;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use bahi_core::common::doc as doc_render;

// ============================================================
//  台账文档 DTO
// ============================================================

/// 自由结构的台账文档（出站渲染结果）。
///
/// 记录形状完全由调用方决定，这里只保证标识符与日期字段
/// 已渲染为 JSON 安全的字符串形式。
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(value_type = Object)]
pub struct RecordPayload(pub serde_json::Value);

/// 创建成功响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    /// 新记录的标识符 (24 位十六进制)
    #[serde(rename = "_id")]
    #[schema(example = "65f1c0de8a4b2c0012345678")]
    pub id: String,
    /// 固定为 "created"
    #[schema(example = "created")]
    pub status: String,
}

impl CreatedResponse {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: "created".to_string(),
        }
    }
}

/// 写操作成功响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    /// 固定为 "success"（更新/删除对不存在的标识符同样报告成功）
    #[schema(example = "success")]
    pub status: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

/// 费用汇总 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummaryResponse {
    /// 费用作业总数
    #[schema(example = 12)]
    pub total_jobs: usize,
    /// `avgRate` 的算术平均，2 位小数；字段缺失的记录按零计入
    #[schema(example = 15.25)]
    pub avg_rate: f64,
    /// `avgExpense` 的算术平均，2 位小数；字段缺失的记录按零计入
    #[schema(example = 200.5)]
    pub avg_expense: f64,
}

/// 汇率响应 DTO
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExchangeRateResponse {
    /// USD→INR 有效换算比 (4 位小数)
    #[schema(example = 83.1234)]
    pub rate: f64,
}

// ============================================================
//  通用响应 DTO
// ============================================================

/// 统一 API 响应包装器
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T: Serialize + ToSchema> {
    /// 是否成功
    pub success: bool,
    /// 数据载荷 (成功时)
    pub data: Option<T>,
    /// 错误信息 (失败时)
    pub error: Option<String>,
}

impl<T: Serialize + ToSchema> ApiResponse<T> {
    /// 构建成功响应
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// 构建失败响应 (不含泛型载荷)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 固定为 false
    pub success: bool,
    /// 错误描述信息
    pub error: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}

// ============================================================
//  存储文档 → DTO 惯用转换 (impl From<T>)
// ============================================================

impl From<Document> for RecordPayload {
    fn from(doc: Document) -> Self {
        Self(doc_render::render_document(doc))
    }
}

impl ExpenseSummaryResponse {
    /// # Summary
    /// 扫描全量费用记录并计算汇总指标。
    ///
    /// # Logic
    /// 1. 空集合直接返回全零。
    /// 2. `avgRate` / `avgExpense` 缺失或非数值时该记录按零计入均值。
    /// 3. 两个均值各自四舍五入到 2 位小数。
    pub fn from_records(jobs: &[Document]) -> Self {
        let total = jobs.len();
        if total == 0 {
            return Self {
                total_jobs: 0,
                avg_rate: 0.0,
                avg_expense: 0.0,
            };
        }

        let count = total as f64;
        let mean = |field: &str| -> f64 {
            let sum: f64 = jobs.iter().map(|job| numeric_field(job, field)).sum();
            round2(sum / count)
        };

        Self {
            total_jobs: total,
            avg_rate: mean("avgRate"),
            avg_expense: mean("avgExpense"),
        }
    }
}

/// 宽容地读取数值字段，缺失或类型不符时按零处理
fn numeric_field(doc: &Document, key: &str) -> f64 {
    match doc.get(key) {
        Some(bson::Bson::Double(v)) => *v,
        Some(bson::Bson::Int32(v)) => f64::from(*v),
        Some(bson::Bson::Int64(v)) => *v as f64,
        _ => 0.0,
    }
}

/// 四舍五入到 2 位小数
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_summary_on_empty_collection() {
        let summary = ExpenseSummaryResponse::from_records(&[]);
        assert_eq!(summary.total_jobs, 0);
        assert_eq!(summary.avg_rate, 0.0);
        assert_eq!(summary.avg_expense, 0.0);
    }

    #[test]
    fn test_summary_means_and_rounding() {
        let jobs = vec![
            doc! { "jobNo": "J1", "avgRate": 10.0, "avgExpense": 100.0 },
            doc! { "jobNo": "J2", "avgRate": 20.0, "avgExpense": 300.0 },
        ];
        let summary = ExpenseSummaryResponse::from_records(&jobs);
        assert_eq!(summary.total_jobs, 2);
        assert_eq!(summary.avg_rate, 15.0);
        assert_eq!(summary.avg_expense, 200.0);
    }

    #[test]
    fn test_summary_treats_missing_fields_as_zero() {
        let jobs = vec![
            doc! { "jobNo": "J1", "avgRate": 9.0 },
            doc! { "jobNo": "J2", "avgExpense": "not-a-number" },
            doc! { "jobNo": "J3", "avgRate": 1, "avgExpense": 50 },
        ];
        let summary = ExpenseSummaryResponse::from_records(&jobs);
        assert_eq!(summary.total_jobs, 3);
        assert_eq!(summary.avg_rate, 3.33);
        assert_eq!(summary.avg_expense, 16.67);
    }
}
