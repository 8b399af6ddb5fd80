//! # 批处理报告导出
//!
//! 把逐文件结果导出为 CSV，列为 `file,status,reason`，行序与扫描顺序一致。
//!
//! ## 依赖关系
//! - 被 `commands/strip.rs` 调用
//! - 使用 `batch/runner.rs` 的 `BatchSummary`
//! - 使用 `csv` + `serde` 写入

use crate::batch::runner::{BatchSummary, ProcessResult};
use crate::error::{Result, TagstripError};

use serde::Serialize;
use std::path::Path;

/// CSV 中的一行
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    file: &'a str,
    status: &'static str,
    reason: &'a str,
}

impl<'a> From<&'a ProcessResult> for ReportRow<'a> {
    fn from(result: &'a ProcessResult) -> Self {
        match result {
            ProcessResult::Success(name) => ReportRow {
                file: name,
                status: "success",
                reason: "",
            },
            ProcessResult::Failed(name, reason) => ReportRow {
                file: name,
                status: "failed",
                reason,
            },
        }
    }
}

/// 导出逐文件结果为 CSV
pub fn to_csv(summary: &BatchSummary, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| TagstripError::FileWriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let mut wtr = csv::Writer::from_path(output_path)?;

    // 空批次也写表头
    if summary.results.is_empty() {
        wtr.write_record(["file", "status", "reason"])?;
    }

    for result in &summary.results {
        wtr.serialize(ReportRow::from(result))?;
    }

    wtr.flush().map_err(|e| TagstripError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
