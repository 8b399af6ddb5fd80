//! # 目录扫描器
//!
//! 列出源目录中扩展名匹配的音频文件，生成有序的候选列表。
//!
//! ## 功能
//! - 仅扫描源目录第一层（不递归）
//! - 扩展名大小写不敏感匹配（`.mp3` / `.Mp3` / `.MP3`）
//! - 按文件名排序，同一目录状态总是得到同一序列
//! - 指向普通文件的符号链接同样是候选；非 UTF-8 文件名原样保留
//! - 只读，无副作用
//!
//! ## 依赖关系
//! - 被 `commands/strip.rs` 调用
//! - 使用 `walkdir` 遍历目录
//! - 使用 `glob` 做大小写不敏感匹配

use crate::error::{Result, TagstripError};

use glob::{MatchOptions, Pattern};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 单个候选文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// 显示用文件名（非 UTF-8 字节按 lossy 转换）
    pub name: String,
    /// 原始文件名，用于生成输出路径
    pub file_name: OsString,
    /// 输入文件路径
    pub input: PathBuf,
}

impl Candidate {
    /// 输出路径：输出目录 + 同名文件
    pub fn output_in(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.file_name)
    }
}

/// 目录扫描器
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    /// 目标扩展名（不含前导点）
    extension: String,
    /// `*.<ext>` 匹配模式
    pattern: Pattern,
}

impl DirectoryScanner {
    /// 创建扫描器，扩展名可带或不带前导点
    pub fn new(extension: &str) -> Result<Self> {
        let extension = extension.trim().trim_start_matches('.').to_string();
        if extension.is_empty() {
            return Err(TagstripError::InvalidArgument(
                "file extension must not be empty".to_string(),
            ));
        }

        let pattern = Pattern::new(&format!("*.{}", Pattern::escape(&extension))).map_err(|e| {
            TagstripError::InvalidArgument(format!("Invalid extension '{}': {}", extension, e))
        })?;

        Ok(Self { extension, pattern })
    }

    /// 目标扩展名
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// 扫描源目录
    pub fn scan(&self, source_dir: &Path) -> Result<Vec<Candidate>> {
        if !source_dir.is_dir() {
            return Err(TagstripError::DirectoryNotFound {
                path: source_dir.display().to_string(),
                source: None,
            });
        }

        let mut candidates = Vec::new();
        let walker = WalkDir::new(source_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| listing_error(source_dir, e))?;

            // 跟随符号链接判断：指向普通文件的链接同样是候选
            if !entry.path().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_os_string();
            let name = file_name.to_string_lossy().to_string();

            if self.matches(&name) {
                candidates.push(Candidate {
                    name,
                    file_name,
                    input: entry.path().to_path_buf(),
                });
            }
        }

        tracing::debug!(
            dir = %source_dir.display(),
            count = candidates.len(),
            "scan finished"
        );
        Ok(candidates)
    }

    /// 检查文件名是否以目标扩展名结尾
    fn matches(&self, name: &str) -> bool {
        let options = MatchOptions {
            case_sensitive: false,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        self.pattern.matches_with(name, options)
    }
}

/// 列目录失败，保留底层 I/O 错误
fn listing_error(source_dir: &Path, err: walkdir::Error) -> TagstripError {
    tracing::debug!(error = %err, "directory listing failed");
    TagstripError::DirectoryNotFound {
        path: source_dir.display().to_string(),
        source: Some(std::io::Error::from(err)),
    }
}
