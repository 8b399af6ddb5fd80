//! # check 命令实现
//!
//! 以 `-version` 探测外部工具，报告版本号。
//!
//! ## 依赖关系
//! - 使用 `tool/ffmpeg.rs` 的探测
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::GlobalArgs;
use crate::error::Result;
use crate::tool::FfmpegTool;
use crate::utils::{output, progress};

/// 执行 check 命令
pub fn execute(global: &GlobalArgs) -> Result<()> {
    let tool = FfmpegTool::new(global.ffmpeg.clone());

    let spinner = progress::create_spinner(&format!("Checking '{}'...", tool.program()));
    let checked = tool.check_available();
    spinner.finish_and_clear();

    let info = checked?;
    output::print_success(&format!(
        "'{}' is available (version {})",
        info.program, info.version
    ));
    Ok(())
}
