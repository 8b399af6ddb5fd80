//! # 运行配置
//!
//! 启动时一次性解析基准目录，并把命令行/环境变量参数整理成不可变的 `StripConfig`。
//!
//! ## 基准目录优先级
//! 1. `--base-dir`（或 `TAGSTRIP_BASE_DIR`）
//! 2. `--relative-to-exe`：可执行文件所在目录
//! 3. 当前工作目录
//!
//! 相对路径一律拼接到基准目录上，进程工作目录不会被修改。
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `cli/` 定义的参数

use crate::cli::strip::StripArgs;
use crate::cli::GlobalArgs;
use crate::error::{Result, TagstripError};

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// 基准目录来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseDir {
    /// 显式指定
    Explicit(PathBuf),
    /// 可执行文件所在目录
    Executable,
    /// 当前工作目录
    WorkingDir,
}

impl BaseDir {
    /// 从全局参数确定来源
    pub fn from_args(global: &GlobalArgs) -> Self {
        match (&global.base_dir, global.relative_to_exe) {
            (Some(dir), _) => BaseDir::Explicit(dir.clone()),
            (None, true) => BaseDir::Executable,
            (None, false) => BaseDir::WorkingDir,
        }
    }

    /// 解析为绝对目录
    pub fn resolve(&self) -> Result<PathBuf> {
        let cwd = || {
            std::env::current_dir().map_err(|e| {
                TagstripError::InvalidArgument(format!("Cannot determine working directory: {}", e))
            })
        };

        match self {
            BaseDir::Explicit(dir) if dir.is_absolute() => Ok(dir.clone()),
            BaseDir::Explicit(dir) => Ok(cwd()?.join(dir)),
            BaseDir::Executable => {
                let exe = std::env::current_exe().map_err(|e| {
                    TagstripError::InvalidArgument(format!(
                        "Cannot determine executable location: {}",
                        e
                    ))
                })?;
                exe.parent().map(Path::to_path_buf).ok_or_else(|| {
                    TagstripError::InvalidArgument(format!(
                        "Executable has no parent directory: {}",
                        exe.display()
                    ))
                })
            }
            BaseDir::WorkingDir => cwd(),
        }
    }
}

/// strip 命令的完整配置
#[derive(Debug, Clone)]
pub struct StripConfig {
    /// 外部工具
    pub tool: OsString,
    /// 源目录
    pub input_dir: PathBuf,
    /// 输出目录
    pub output_dir: PathBuf,
    /// 目标扩展名
    pub extension: String,
    /// 失败信息截断上限
    pub error_limit: usize,
    /// 失败时删除残缺输出
    pub remove_failed: bool,
    /// CSV 报告路径
    pub report: Option<PathBuf>,
}

impl StripConfig {
    /// 由命令行参数构建配置
    pub fn from_args(global: &GlobalArgs, args: &StripArgs) -> Result<Self> {
        let base = BaseDir::from_args(global).resolve()?;
        Self::build(global.ffmpeg.clone(), &base, args)
    }

    fn build(tool: OsString, base: &Path, args: &StripArgs) -> Result<Self> {
        if args.ext.trim().trim_start_matches('.').is_empty() {
            return Err(TagstripError::InvalidArgument(
                "--ext must not be empty".to_string(),
            ));
        }
        if args.error_limit == 0 {
            return Err(TagstripError::InvalidArgument(
                "--error-limit must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            tool,
            input_dir: resolve_against(base, &args.input),
            output_dir: resolve_against(base, &args.output),
            extension: args.ext.clone(),
            error_limit: args.error_limit,
            remove_failed: args.remove_failed,
            report: args.report.as_deref().map(|p| resolve_against(base, p)),
        })
    }

    /// 拒绝与源目录相同的输出目录
    ///
    /// 输出文件与输入同名，目录相同时输出路径就是源文件本身。
    /// 源目录无法解析时跳过检查，由扫描阶段报告。
    pub fn ensure_distinct_dirs(&self) -> Result<()> {
        let Ok(input) = self.input_dir.canonicalize() else {
            return Ok(());
        };
        let Ok(output) = self.output_dir.canonicalize() else {
            // 输出目录尚不存在，不可能与已存在的源目录相同
            return Ok(());
        };

        if input == output {
            return Err(TagstripError::InvalidArgument(format!(
                "Output directory must differ from the input directory: {}",
                output.display()
            )));
        }
        Ok(())
    }
}

/// 相对路径拼接到基准目录
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
