//! # ffmpeg 调用
//!
//! 以固定参数模板调用 ffmpeg，清除容器/流元数据并按位复制音频流（不重新编码）。
//!
//! ## 参数模板
//! ```text
//! <tool> -i <input> -map_metadata -1 -metadata encoder= -write_id3v2 0
//!        -fflags +bitexact -flags:a +bitexact -c copy <output>
//! ```
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 调用（通过 `Transcoder` trait）
//! - 被 `commands/check.rs`, `commands/strip.rs` 用于启动探测
//! - 使用 `regex` 解析版本号

use super::message::{last_error_line, truncate_reason, DEFAULT_ERROR_LIMIT};
use super::Transcoder;
use crate::error::{Result, TagstripError};

use regex::Regex;
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

/// 探测得到的工具信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInfo {
    /// 调用的程序名或路径
    pub program: String,
    /// 版本号，无法解析时为 `unknown`
    pub version: String,
}

/// ffmpeg 转码工具
#[derive(Debug, Clone)]
pub struct FfmpegTool {
    /// 可执行程序（PATH 中的名字或完整路径）
    program: OsString,
    /// 失败信息截断上限
    error_limit: usize,
}

impl FfmpegTool {
    /// 创建新的工具句柄
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            error_limit: DEFAULT_ERROR_LIMIT,
        }
    }

    /// 设置失败信息截断上限
    pub fn with_error_limit(mut self, limit: usize) -> Self {
        self.error_limit = limit.max(1);
        self
    }

    /// 程序名（用于显示）
    pub fn program(&self) -> String {
        self.program.to_string_lossy().to_string()
    }

    /// 构造去除元数据的参数列表
    pub fn strip_args(input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::with_capacity(16);
        args.push("-i".into());
        args.push(input.as_os_str().to_os_string());
        for arg in [
            "-map_metadata",
            "-1",
            "-metadata",
            "encoder=",
            "-write_id3v2",
            "0",
            "-fflags",
            "+bitexact",
            "-flags:a",
            "+bitexact",
            "-c",
            "copy",
        ] {
            args.push(arg.into());
        }
        args.push(output.as_os_str().to_os_string());
        args
    }

    /// 探测工具是否可用（`<program> -version`）
    pub fn check_available(&self) -> Result<ToolInfo> {
        let output = Command::new(&self.program)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| TagstripError::ToolUnavailable {
                tool: self.program(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let reason = last_error_line(&output.stderr)
                .unwrap_or_else(|| format!("version query exited with {}", output.status));
            return Err(TagstripError::ToolUnavailable {
                tool: self.program(),
                reason: truncate_reason(&reason, self.error_limit),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let version = parse_version(&stdout).unwrap_or_else(|| "unknown".to_string());
        tracing::debug!(program = %self.program(), %version, "tool check succeeded");

        Ok(ToolInfo {
            program: self.program(),
            version,
        })
    }

    /// 生成失败原因文本
    fn failure_reason(&self, status: std::process::ExitStatus, stderr: &[u8]) -> String {
        let status_text = match status.code() {
            Some(code) => format!("exit status {}", code),
            None => format!("terminated ({})", status),
        };
        let reason = match last_error_line(stderr) {
            Some(line) => format!("{}: {}", status_text, line),
            None => status_text,
        };
        truncate_reason(&reason, self.error_limit)
    }
}

impl Transcoder for FfmpegTool {
    fn transcode(&self, input: &Path, output: &Path) -> Result<()> {
        let file = input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| input.display().to_string());

        let args = Self::strip_args(input, output);
        tracing::debug!(program = %self.program(), ?args, "invoking external tool");

        // stdin 关闭：输出已存在时 ffmpeg 不会停下来等待确认
        let result = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| TagstripError::ItemTranscodeFailure {
                file: file.clone(),
                reason: truncate_reason(&e.to_string(), self.error_limit),
            })?;

        if result.status.success() {
            Ok(())
        } else {
            Err(TagstripError::ItemTranscodeFailure {
                file,
                reason: self.failure_reason(result.status, &result.stderr),
            })
        }
    }
}

/// 从 `-version` 输出第一行解析版本号
fn parse_version(stdout: &str) -> Option<String> {
    let first_line = stdout.lines().next()?;
    let re = Regex::new(r"^\S+\s+version\s+(\S+)").ok()?;
    re.captures(first_line.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
