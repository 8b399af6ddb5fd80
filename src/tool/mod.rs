//! # 外部转码工具模块
//!
//! 封装对外部转码工具（默认 `ffmpeg`）的调用。
//!
//! ## 功能
//! - `Transcoder` trait：批处理执行器对单文件的调用接口
//! - `FfmpegTool`：固定参数模板的 ffmpeg 实现
//! - 启动时的版本探测（`-version`）
//! - 失败信息截断策略
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 通过 `Transcoder` 调用
//! - 被 `commands/` 用于启动探测
//! - 子模块: ffmpeg, message

pub mod ffmpeg;
pub mod message;

pub use ffmpeg::FfmpegTool;

use crate::error::Result;
use std::path::Path;

/// 单文件转码接口
///
/// 成功返回 `Ok(())`；失败返回 `TagstripError::ItemTranscodeFailure`，
/// 由批处理执行器记录为该文件的失败结果。
pub trait Transcoder {
    fn transcode(&self, input: &Path, output: &Path) -> Result<()>;
}
