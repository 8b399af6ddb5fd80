//! # 统一错误处理模块
//!
//! 定义 tagstrip 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分级
//! - 致命错误：`DirectoryNotFound`, `OutputDirectoryUnwritable`, `ToolUnavailable`
//!   在任何输出状态被修改之前中止运行
//! - 单文件错误：`ItemTranscodeFailure` 在批处理循环内被记录为数据，不向外传播
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// tagstrip 统一错误类型
#[derive(Error, Debug)]
pub enum TagstripError {
    // ─────────────────────────────────────────────────────────────
    // 目录错误
    // ─────────────────────────────────────────────────────────────
    /// 源目录不存在，或列目录时出错（`source` 为底层 I/O 错误）
    #[error("Directory not found or unreadable: {path}")]
    DirectoryNotFound {
        path: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Output directory is not writable: {path}")]
    OutputDirectoryUnwritable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 外部工具错误
    // ─────────────────────────────────────────────────────────────
    #[error("External tool '{tool}' is not available: {reason}")]
    ToolUnavailable { tool: String, reason: String },

    #[error("Failed to process {file}: {reason}")]
    ItemTranscodeFailure { file: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, TagstripError>;
