//! # strip 子命令 CLI 定义
//!
//! 批量去除源目录中音频文件的元数据，写入输出目录
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/strip.rs`

use clap::Args;
use std::path::PathBuf;

/// strip 子命令参数
#[derive(Args, Debug)]
pub struct StripArgs {
    /// Source directory containing audio files
    pub input: PathBuf,

    /// Output directory (created if missing)
    pub output: PathBuf,

    /// File extension to process (case-insensitive)
    #[arg(short, long, env = "TAGSTRIP_EXT", default_value = "mp3")]
    pub ext: String,

    /// Maximum number of characters shown for a failure reason
    #[arg(long, default_value_t = 100)]
    pub error_limit: usize,

    /// Delete output files left behind by failed invocations
    #[arg(long, default_value_t = false)]
    pub remove_failed: bool,

    /// Write a per-file CSV report
    #[arg(short, long)]
    pub report: Option<PathBuf>,
}
