//! # 终端输出工具
//!
//! 带彩色标签的单行输出：逐文件结果、批处理进度提示与汇总。
//! 结果与提示写 stdout，致命错误写 stderr。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块和 `main.rs` 使用
//! - 使用 `colored` crate

use colored::{ColoredString, Colorize};

/// 分隔线宽度
const RULE_WIDTH: usize = 60;

fn tagged(tag: ColoredString, msg: &str) -> String {
    format!("{} {}", tag, msg)
}

fn rule() -> ColoredString {
    "─".repeat(RULE_WIDTH).dimmed()
}

/// 单个文件处理成功
pub fn print_success(msg: &str) {
    println!("{}", tagged("[OK]".green().bold(), msg));
}

/// 单个文件处理失败（与成功消息同走 stdout，保持顺序）
pub fn print_failure(msg: &str) {
    println!("{}", tagged("[FAIL]".red().bold(), msg));
}

/// 致命错误
pub fn print_error(msg: &str) {
    eprintln!("{}", tagged("[ERR]".red().bold(), msg));
}

pub fn print_warning(msg: &str) {
    println!("{}", tagged("[WARN]".yellow().bold(), msg));
}

pub fn print_info(msg: &str) {
    println!("{}", tagged("[*]".blue().bold(), msg));
}

/// 批处理结束
pub fn print_done(msg: &str) {
    println!("{}", tagged("[DONE]".green().bold(), msg));
}

/// 带上下分隔线的标题
pub fn print_header(title: &str) {
    println!("\n{}\n  {}\n{}\n", rule(), title.bold(), rule());
}

pub fn print_separator() {
    println!("{}", rule());
}
