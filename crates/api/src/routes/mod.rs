pub mod expense;
pub mod purchase;
pub mod rates;

use bson::oid::ObjectId;
use bson::Document;

use crate::error::ApiError;

/// 请求体必须是 JSON 对象；经扩展 JSON 规则转为 BSON 文档
pub(crate) fn into_document(body: serde_json::Value) -> Result<Document, ApiError> {
    match body {
        serde_json::Value::Object(map) => Document::try_from(map)
            .map_err(|e| ApiError::BadRequest(format!("Invalid document body: {e}"))),
        _ => Err(ApiError::BadRequest(
            "Request body must be a JSON object".to_string(),
        )),
    }
}

/// 路径段中的标识符必须是合法的 24 位十六进制 ObjectId
pub(crate) fn parse_object_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("Invalid record id: {raw}")))
}
