//! # 失败信息截断
//!
//! 外部工具的错误输出可能很长，展示给用户前截断到固定字符数。
//!
//! ## 策略
//! - 按 Unicode 字符计数，不会截断在字符中间
//! - 发生截断时追加 `...`
//! - 默认上限 100 字符

/// 默认截断上限（字符数）
pub const DEFAULT_ERROR_LIMIT: usize = 100;

/// 截断失败原因
pub fn truncate_reason(text: &str, limit: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// 从 stderr 中提取最后一行非空文本
///
/// ffmpeg 把真正的错误原因打印在输出末尾，前面是版本和输入信息。
pub fn last_error_line(stderr: &[u8]) -> Option<String> {
    String::from_utf8_lossy(stderr)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .map(str::to_string)
}
