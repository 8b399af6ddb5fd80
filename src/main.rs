//! # tagstrip - 批量去除音频元数据
//!
//! 逐个调用外部转码工具（默认 `ffmpeg`），以流复制方式去除音频文件中的
//! 容器/流元数据，音频数据按位保持不变。
//!
//! ## 子命令
//! - `strip` - 批量处理目录中的音频文件
//! - `check` - 检查外部工具是否可用
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── config.rs   (基准目录与运行配置)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/  (目录扫描、批量执行、报告)
//!   │     └── tool/   (外部工具调用)
//!   ├── utils/      (输出、进度条、日志)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod config;
mod error;
mod tool;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    utils::logging::init(cli.global.verbose);

    if let Err(e) = commands::run(&cli.global, cli.command) {
        tracing::debug!(error = ?e, "command failed");
        let mut message = e.to_string();
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            message.push_str(&format!("\n  caused by: {}", cause));
            source = cause.source();
        }
        utils::output::print_error(&message);
        std::process::exit(1);
    }
}
