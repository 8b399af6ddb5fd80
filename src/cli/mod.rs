//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `strip`: 批量去除音频文件元数据
//! - `check`: 检查外部工具是否可用
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: strip

pub mod strip;

use clap::{ArgAction, Args, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// tagstrip - 批量去除音频元数据
#[derive(Parser)]
#[command(name = "tagstrip")]
#[command(author = "tagstrip contributors")]
#[command(version)]
#[command(about = "Batch-strip metadata tags from audio files using ffmpeg stream copy", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// 所有子命令共享的参数
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// External transcoding program (name in PATH or full path)
    #[arg(long, global = true, env = "TAGSTRIP_FFMPEG", default_value = "ffmpeg")]
    pub ffmpeg: OsString,

    /// Base directory for relative paths
    #[arg(long, global = true, env = "TAGSTRIP_BASE_DIR")]
    pub base_dir: Option<PathBuf>,

    /// Resolve relative paths against the executable's directory
    #[arg(long, global = true, default_value_t = false)]
    pub relative_to_exe: bool,

    /// Increase diagnostic output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Strip metadata from every matching audio file in a directory
    Strip(strip::StripArgs),

    /// Verify that the external transcoding tool can be launched
    Check,
}
