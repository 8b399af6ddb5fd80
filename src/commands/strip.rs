//! # strip 命令实现
//!
//! 批量去除音频文件元数据。
//!
//! ## 流程
//! 1. 解析配置（基准目录、扩展名、截断上限）
//! 2. 探测外部工具，不可用则直接退出
//! 3. 扫描源目录（源目录不存在时不会触碰输出目录），拒绝与源目录相同的输出目录
//! 4. 逐文件处理，终端逐行显示结果与进度条
//! 5. 打印汇总，按需导出 CSV 报告
//!
//! ## 依赖关系
//! - 使用 `cli/strip.rs` 定义的参数
//! - 使用 `config.rs`, `batch/`, `tool/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::batch::{
    report, BatchObserver, BatchRunner, BatchSummary, DirectoryScanner, ProcessResult,
    ProgressEvent,
};
use crate::cli::strip::StripArgs;
use crate::cli::GlobalArgs;
use crate::config::StripConfig;
use crate::error::Result;
use crate::tool::FfmpegTool;
use crate::utils::{output, progress};

use indicatif::ProgressBar;
use tabled::{Table, Tabled};

/// 失败明细表格行
#[derive(Debug, Clone, Tabled)]
struct FailureRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

/// 终端进度显示
struct ConsoleReporter {
    pb: ProgressBar,
}

impl ConsoleReporter {
    fn new() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }
}

impl BatchObserver for ConsoleReporter {
    fn on_start(&mut self, total: usize) {
        if total > 0 {
            self.pb = progress::create_progress_bar(total as u64, "Stripping");
        }
    }

    fn on_progress(&mut self, event: &ProgressEvent<'_>) -> anyhow::Result<()> {
        tracing::trace!(input = %event.candidate.input.display(), "item finished");
        let message = format!("[{}/{}] {}", event.index + 1, event.total, event.message());
        self.pb.suspend(|| match event.result {
            ProcessResult::Success(_) => output::print_success(&message),
            ProcessResult::Failed(_, _) => output::print_failure(&message),
        });
        self.pb.inc(1);
        Ok(())
    }

    fn on_complete(&mut self, summary: &BatchSummary) -> anyhow::Result<()> {
        self.pb.finish_and_clear();
        print_summary(summary);
        Ok(())
    }
}

/// 执行 strip 命令
pub fn execute(global: &GlobalArgs, args: StripArgs) -> Result<()> {
    let config = StripConfig::from_args(global, &args)?;
    let summary = strip(&config, &mut ConsoleReporter::new())?;

    if let Some(report_path) = &config.report {
        report::to_csv(&summary, report_path)?;
        output::print_success(&format!("Report saved to '{}'", report_path.display()));
    }

    Ok(())
}

/// 探测工具、扫描并处理，返回汇总
fn strip<O: BatchObserver>(config: &StripConfig, observer: &mut O) -> Result<BatchSummary> {
    output::print_header("Stripping Audio Metadata");

    let tool = FfmpegTool::new(config.tool.clone()).with_error_limit(config.error_limit);
    let info = tool.check_available()?;
    output::print_info(&format!("Using {} (version {})", info.program, info.version));

    let scanner = DirectoryScanner::new(&config.extension)?;
    let candidates = scanner.scan(&config.input_dir)?;
    config.ensure_distinct_dirs()?;

    if candidates.is_empty() {
        output::print_warning(&format!(
            "No .{} files found in '{}'",
            scanner.extension(),
            config.input_dir.display()
        ));
    } else {
        output::print_info(&format!(
            "Found {} .{} file(s) in '{}'",
            candidates.len(),
            scanner.extension(),
            config.input_dir.display()
        ));
    }

    BatchRunner::new(&config.output_dir)
        .remove_failed_outputs(config.remove_failed)
        .with_error_limit(config.error_limit)
        .run(&candidates, &tool, observer)
}

/// 打印汇总
fn print_summary(summary: &BatchSummary) {
    output::print_separator();
    output::print_done(&format!(
        "Processing complete: {} succeeded, {} failed ({} total)",
        summary.success,
        summary.failed,
        summary.total()
    ));

    let rows: Vec<FailureRow> = summary
        .failures()
        .map(|(file, reason)| FailureRow {
            file: file.to_string(),
            reason: reason.to_string(),
        })
        .collect();

    if !rows.is_empty() {
        output::print_header("Failed Files");
        println!("{}", Table::new(&rows));
    }
}
