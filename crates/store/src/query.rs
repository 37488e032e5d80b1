use mongodb::bson::{doc, Document};

/// 把调用方输入逐字符转义为按字面匹配的正则片段。
/// 过滤语义是子串匹配，不是正则匹配，所以元字符必须失去特殊含义。
fn regex_escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if !ch.is_alphanumeric() && ch.is_ascii() {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// 大小写不敏感的字面子串匹配条件
pub(crate) fn ci_substring(needle: &str) -> Document {
    doc! { "$regex": regex_escape(needle), "$options": "i" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_keeps_plain_text() {
        assert_eq!(regex_escape("BN42"), "BN42");
    }

    #[test]
    fn test_escape_neutralizes_metacharacters() {
        assert_eq!(regex_escape("a.b*"), "a\\.b\\*");
        assert_eq!(regex_escape("J-1 (x)"), "J\\-1\\ \\(x\\)");
    }
}
