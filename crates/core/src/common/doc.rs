use bson::{Bson, Document};
use serde_json::Value;

use super::date;

/// # Summary
/// 响应格式化器：把一份存储文档渲染为可安全序列化为 JSON 的值。
///
/// # Logic
/// 1. 顶层 `_id` 的 ObjectId 渲染为 24 位十六进制字符串。
/// 2. 顶层 `date` 的真实日期值渲染为 `YYYY-MM-DD`。
/// 3. 其余顶层日期值（如 `created_at`）渲染为 RFC 3339 字符串。
/// 4. 其他值一律经宽松扩展 JSON 透传，不做修改。
///
/// 仅作用于出站副本，绝不回写存储文档本身。
///
/// # Arguments
/// * `doc`: 从集合中读出的文档（按值接收，即响应侧副本）。
///
/// # Returns
/// 渲染后的 `serde_json::Value` 对象。
pub fn render_document(doc: Document) -> Value {
    let mut out = serde_json::Map::with_capacity(doc.len());
    for (key, value) in doc {
        let rendered = match value {
            Bson::ObjectId(oid) if key == "_id" => Value::String(oid.to_hex()),
            Bson::DateTime(dt) if key == "date" => Value::String(date::format_day(dt)),
            Bson::DateTime(dt) => Value::String(dt.to_chrono().to_rfc3339()),
            other => other.into_relaxed_extjson(),
        };
        out.insert(key, rendered);
    }
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::oid::ObjectId;
    use bson::{doc, Bson};

    #[test]
    fn test_render_id_and_date() {
        let oid = ObjectId::new();
        let day = match date::normalize_for_filter("2024-03-05") {
            Bson::DateTime(dt) => dt,
            other => panic!("unexpected {other:?}"),
        };
        let stored = doc! {
            "_id": oid,
            "businessNo": "BN-42",
            "date": day,
            "qty": 12.5,
        };

        let rendered = render_document(stored);
        assert_eq!(rendered["_id"], Value::String(oid.to_hex()));
        assert_eq!(rendered["date"], Value::String("2024-03-05".to_string()));
        assert_eq!(rendered["businessNo"], Value::String("BN-42".to_string()));
        assert_eq!(rendered["qty"], serde_json::json!(12.5));
    }

    #[test]
    fn test_render_other_datetime_as_rfc3339() {
        let stamp = bson::DateTime::now();
        let rendered = render_document(doc! { "created_at": stamp });
        let text = rendered["created_at"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        assert_eq!(text, stamp.to_chrono().to_rfc3339());
    }

    #[test]
    fn test_render_passes_nested_values_through() {
        let stored = doc! {
            "jobNo": "J7",
            "date": Bson::Null,
            "bcData": [ { "bc": "x", "qty": 3 } ],
        };
        let rendered = render_document(stored);
        assert_eq!(rendered["date"], Value::Null);
        assert_eq!(rendered["bcData"][0]["bc"], Value::String("x".to_string()));
        assert_eq!(rendered["bcData"][0]["qty"], serde_json::json!(3));
    }
}
