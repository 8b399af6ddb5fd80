//! # 诊断日志
//!
//! 初始化 `tracing` 订阅器，诊断信息写到 stderr。
//! 用户可见的进度与结果走 `utils/output.rs`，这里只负责调试信息。
//!
//! ## 级别
//! - 默认 `warn`
//! - `-v` 为 `debug`，`-vv` 及以上为 `trace`
//! - 设置了 `RUST_LOG` 时以环境变量为准
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `tracing-subscriber`

use tracing_subscriber::EnvFilter;

/// 按 `-v` 次数得到默认过滤级别
pub fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// 初始化全局订阅器（重复调用时静默忽略）
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tagstrip={}", default_level(verbose))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}
