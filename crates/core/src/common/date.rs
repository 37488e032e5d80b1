use bson::Bson;
use chrono::{NaiveDate, TimeZone, Utc};

/// 日历日期的标准字符串格式
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// # Summary
/// 将 `YYYY-MM-DD` 字符串解析为当日零点 (UTC) 的 BSON 日期。
///
/// # Returns
/// 解析失败返回 `None`。
fn parse_day(raw: &str) -> Option<bson::DateTime> {
    let day = NaiveDate::parse_from_str(raw, DAY_FORMAT).ok()?;
    let midnight = day.and_hms_opt(0, 0, 0)?;
    Some(bson::DateTime::from_chrono(Utc.from_utc_datetime(&midnight)))
}

/// # Summary
/// 查询路径的日期归一化：解析成功返回真实日期值，失败时原样返回字符串。
///
/// # Logic
/// 1. 尝试按 `YYYY-MM-DD` 解析。
/// 2. 失败时返回 `Bson::String`，让畸形的过滤边界按字面值参与比较。
///    由于库中日期以真实日期类型存储，BSON 类型分桶使该边界永远匹配不到
///    任何日期，等价于静默空结果而非报错。
///
/// # Arguments
/// * `raw`: 调用方提交的过滤边界字符串。
///
/// # Returns
/// `Bson::DateTime` 或 `Bson::String`。
pub fn normalize_for_filter(raw: &str) -> Bson {
    match parse_day(raw) {
        Some(dt) => Bson::DateTime(dt),
        None => Bson::String(raw.to_string()),
    }
}

/// # Summary
/// 写入路径的日期归一化：解析成功返回真实日期值，失败时返回空值标记。
///
/// # Logic
/// 1. 仅当字段为字符串且解析成功时产出 `Bson::DateTime`。
/// 2. 其余情况（畸形字符串、非字符串值）一律产出 `Bson::Null`，
///    即畸形日期被静默置空而不是拒绝请求。
///
/// 与 [`normalize_for_filter`] 的回退行为不同是有意为之：
/// 过滤路径保留原始输入参与比较，写入路径绝不把非日期值落库。
///
/// # Arguments
/// * `value`: 请求体中 `date` 字段的原始 BSON 值。
///
/// # Returns
/// `Bson::DateTime` 或 `Bson::Null`。
pub fn normalize_for_write(value: &Bson) -> Bson {
    match value {
        Bson::String(raw) => match parse_day(raw) {
            Some(dt) => Bson::DateTime(dt),
            None => Bson::Null,
        },
        _ => Bson::Null,
    }
}

/// 将 BSON 日期渲染为 `YYYY-MM-DD` 字符串
pub fn format_day(dt: bson::DateTime) -> String {
    dt.to_chrono().format(DAY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_day_round_trips() {
        for raw in ["2024-01-01", "2024-02-29", "1999-12-31"] {
            match normalize_for_filter(raw) {
                Bson::DateTime(dt) => assert_eq!(format_day(dt), raw),
                other => panic!("expected DateTime for {raw}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_filter_falls_back_to_literal_string() {
        assert_eq!(
            normalize_for_filter("not-a-date"),
            Bson::String("not-a-date".to_string())
        );
        // 2月30日不存在，同样按字面值回退
        assert_eq!(
            normalize_for_filter("2024-02-30"),
            Bson::String("2024-02-30".to_string())
        );
    }

    #[test]
    fn test_write_nulls_malformed_input() {
        assert_eq!(
            normalize_for_write(&Bson::String("31/12/2024".to_string())),
            Bson::Null
        );
        assert_eq!(normalize_for_write(&Bson::Double(20240101.0)), Bson::Null);
        assert_eq!(normalize_for_write(&Bson::Null), Bson::Null);
    }

    #[test]
    fn test_write_keeps_valid_day() {
        let normalized = normalize_for_write(&Bson::String("2024-06-15".to_string()));
        match normalized {
            Bson::DateTime(dt) => assert_eq!(format_day(dt), "2024-06-15"),
            other => panic!("expected DateTime, got {other:?}"),
        }
    }
}
