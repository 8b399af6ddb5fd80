//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `config.rs`, `batch/`, `tool/`, `utils/`
//! - 子模块: strip, check

pub mod check;
pub mod strip;

use crate::cli::{Commands, GlobalArgs};
use crate::error::Result;

/// 执行命令
pub fn run(global: &GlobalArgs, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Strip(args) => strip::execute(global, args),
        Commands::Check => check::execute(global),
    }
}
