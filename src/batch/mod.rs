//! # 批量处理模块
//!
//! 目录扫描 → 逐文件调用外部工具 → 汇总结果。
//!
//! ## 功能
//! - 扫描源目录，按扩展名（大小写不敏感）筛选候选文件
//! - 串行处理，单个文件失败不中止批处理
//! - 进度回调与汇总统计
//! - CSV 报告导出
//!
//! ## 依赖关系
//! - 被 `commands/strip.rs` 使用
//! - 使用 `tool/` 调用外部工具
//! - 使用 `walkdir` 遍历目录

pub mod report;
pub mod runner;
pub mod scanner;

pub use runner::{BatchObserver, BatchRunner, BatchSummary, ProcessResult, ProgressEvent};
pub use scanner::{Candidate, DirectoryScanner};
