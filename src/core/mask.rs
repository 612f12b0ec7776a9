//! 敏感配置值脱敏

/// 脱敏占位符
pub const MASK: &str = "***";

/// 不超过该长度的值整体替换为 [`MASK`]
const SHORT_LIMIT: usize = 8;

/// 保留首尾各 4 个字符，中间替换为 [`MASK`]
///
/// 按字符而非字节截取，多字节字符不会被截断。
pub fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= SHORT_LIMIT {
        return MASK.to_string();
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}{MASK}{tail}")
}
