//! # 批量执行器
//!
//! 按扫描顺序逐个处理候选文件，汇总成功/失败统计。
//!
//! ## 功能
//! - 处理前确保输出目录存在（自动创建父目录）
//! - 串行调用外部工具，一个文件失败不影响后续文件
//! - 每个文件处理后回调 `on_progress`，结束后回调 `on_complete`
//! - 可选删除失败调用新产生的残缺输出（调用前已存在的文件不动）
//!
//! ## 依赖关系
//! - 被 `commands/strip.rs` 调用
//! - 使用 `batch/scanner.rs` 的 `Candidate`
//! - 使用 `tool/` 的 `Transcoder` trait

use crate::batch::scanner::Candidate;
use crate::error::{Result, TagstripError};
use crate::tool::message::{truncate_reason, DEFAULT_ERROR_LIMIT};
use crate::tool::Transcoder;

use std::fs;
use std::path::{Path, PathBuf};

/// 单个文件处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessResult {
    /// 处理成功
    Success(String),
    /// 处理失败
    Failed(String, String), // (文件名, 错误信息)
}

impl ProcessResult {
    /// 是否成功
    pub fn is_success(&self) -> bool {
        matches!(self, ProcessResult::Success(_))
    }

    /// 面向用户的单行消息
    pub fn message(&self) -> String {
        match self {
            ProcessResult::Success(name) => format!("Processed: {}", name),
            ProcessResult::Failed(name, reason) => format!("Failed {}: {}", name, reason),
        }
    }
}

/// 批量处理结果统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// 成功数量
    pub success: usize,
    /// 失败数量
    pub failed: usize,
    /// 按处理顺序的逐文件结果
    pub results: Vec<ProcessResult>,
}

impl BatchSummary {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match &result {
            ProcessResult::Success(_) => self.success += 1,
            ProcessResult::Failed(_, _) => self.failed += 1,
        }
        self.results.push(result);
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.failed
    }

    /// 失败详情
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.results.iter().filter_map(|r| match r {
            ProcessResult::Failed(name, reason) => Some((name.as_str(), reason.as_str())),
            ProcessResult::Success(_) => None,
        })
    }
}

/// 单文件进度事件
#[derive(Debug)]
pub struct ProgressEvent<'a> {
    /// 从 0 开始的序号
    pub index: usize,
    /// 候选总数
    pub total: usize,
    pub candidate: &'a Candidate,
    pub result: &'a ProcessResult,
}

impl ProgressEvent<'_> {
    pub fn message(&self) -> String {
        self.result.message()
    }
}

/// 批处理回调接口
///
/// 回调返回的错误只会被记录，不会中止批处理。
pub trait BatchObserver {
    /// 第一个文件开始处理前调用
    fn on_start(&mut self, _total: usize) {}

    /// 每个文件分类完成后调用一次
    fn on_progress(&mut self, event: &ProgressEvent<'_>) -> anyhow::Result<()>;

    /// 最后一个文件之后调用一次（零个候选时也会调用）
    fn on_complete(&mut self, summary: &BatchSummary) -> anyhow::Result<()>;
}

/// 批量执行器
#[derive(Debug, Clone)]
pub struct BatchRunner {
    /// 输出目录
    output_dir: PathBuf,
    /// 失败时删除残缺输出
    remove_failed_outputs: bool,
    /// 失败信息截断上限
    error_limit: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            remove_failed_outputs: false,
            error_limit: DEFAULT_ERROR_LIMIT,
        }
    }

    /// 设置失败信息截断上限
    pub fn with_error_limit(mut self, limit: usize) -> Self {
        self.error_limit = limit.max(1);
        self
    }

    /// 设置是否删除失败文件的残缺输出
    pub fn remove_failed_outputs(mut self, remove: bool) -> Self {
        self.remove_failed_outputs = remove;
        self
    }

    /// 逐个处理候选文件
    pub fn run<T, O>(
        &self,
        candidates: &[Candidate],
        transcoder: &T,
        observer: &mut O,
    ) -> Result<BatchSummary>
    where
        T: Transcoder + ?Sized,
        O: BatchObserver + ?Sized,
    {
        self.ensure_output_dir()?;

        let total = candidates.len();
        observer.on_start(total);

        let mut summary = BatchSummary::default();
        for (index, candidate) in candidates.iter().enumerate() {
            let result = self.process_one(candidate, transcoder);

            let event = ProgressEvent {
                index,
                total,
                candidate,
                result: &result,
            };
            if let Err(e) = observer.on_progress(&event) {
                tracing::warn!(file = %candidate.name, error = %e, "progress callback failed");
            }

            summary.merge(result);
        }

        if let Err(e) = observer.on_complete(&summary) {
            tracing::warn!(error = %e, "completion callback failed");
        }

        Ok(summary)
    }

    /// 创建输出目录
    fn ensure_output_dir(&self) -> Result<()> {
        let unwritable = |source| TagstripError::OutputDirectoryUnwritable {
            path: self.output_dir.display().to_string(),
            source,
        };

        fs::create_dir_all(&self.output_dir).map_err(unwritable)?;

        // create_dir_all 对已存在的普通文件不一定报错
        if !self.output_dir.is_dir() {
            return Err(unwritable(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "path exists and is not a directory",
            )));
        }
        Ok(())
    }

    /// 处理单个候选文件
    fn process_one<T>(&self, candidate: &Candidate, transcoder: &T) -> ProcessResult
    where
        T: Transcoder + ?Sized,
    {
        let output = candidate.output_in(&self.output_dir);
        // 只清理本次调用产生的文件
        let preexisting = output.symlink_metadata().is_ok();

        match transcoder.transcode(&candidate.input, &output) {
            Ok(()) => {
                tracing::debug!(file = %candidate.name, "processed");
                ProcessResult::Success(candidate.name.clone())
            }
            Err(e) => {
                let reason = match e {
                    TagstripError::ItemTranscodeFailure { reason, .. } => reason,
                    other => truncate_reason(&other.to_string(), self.error_limit),
                };
                tracing::debug!(file = %candidate.name, %reason, "processing failed");

                if self.remove_failed_outputs && !preexisting {
                    self.remove_partial(&output);
                }
                ProcessResult::Failed(candidate.name.clone(), reason)
            }
        }
    }

    /// 删除失败调用留下的输出文件
    fn remove_partial(&self, output: &Path) {
        if !output.is_file() {
            return;
        }
        match fs::remove_file(output) {
            Ok(()) => tracing::debug!(path = %output.display(), "removed partial output"),
            Err(e) => {
                tracing::warn!(path = %output.display(), error = %e, "failed to remove partial output")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// 假转码器：文件名含 "bad" 时写一个空文件并失败，否则复制输入
    struct FakeTranscoder {
        calls: RefCell<Vec<String>>,
    }

    impl FakeTranscoder {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transcoder for FakeTranscoder {
        fn transcode(&self, input: &Path, output: &Path) -> Result<()> {
            let name = input.file_name().unwrap().to_string_lossy().to_string();
            self.calls.borrow_mut().push(name.clone());

            if name.contains("bad") {
                // 与 ffmpeg 一样不覆盖已存在的输出
                if !output.exists() {
                    fs::write(output, b"").unwrap();
                }
                return Err(TagstripError::ItemTranscodeFailure {
                    file: name,
                    reason: "exit status 1: Invalid data found".to_string(),
                });
            }
            fs::copy(input, output).unwrap();
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        started: Option<usize>,
        events: Vec<(usize, String, bool)>,
        completed: Vec<BatchSummary>,
        fail_progress: bool,
    }

    impl BatchObserver for RecordingObserver {
        fn on_start(&mut self, total: usize) {
            self.started = Some(total);
        }

        fn on_progress(&mut self, event: &ProgressEvent<'_>) -> anyhow::Result<()> {
            self.events.push((
                event.index,
                event.candidate.name.clone(),
                event.result.is_success(),
            ));
            if self.fail_progress {
                anyhow::bail!("display went away");
            }
            Ok(())
        }

        fn on_complete(&mut self, summary: &BatchSummary) -> anyhow::Result<()> {
            self.completed.push(summary.clone());
            Ok(())
        }
    }

    fn make_candidates(dir: &Path, names: &[&str]) -> Vec<Candidate> {
        names
            .iter()
            .map(|name| {
                let input = dir.join(name);
                fs::write(&input, format!("audio:{}", name)).unwrap();
                Candidate {
                    name: name.to_string(),
                    file_name: name.into(),
                    input,
                }
            })
            .collect()
    }

    #[test]
    fn test_empty_batch_creates_output_dir() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("nested").join("out");
        let transcoder = FakeTranscoder::new();
        let mut observer = RecordingObserver::default();

        let summary = BatchRunner::new(&out)
            .run(&[], &transcoder, &mut observer)
            .unwrap();

        assert!(out.is_dir());
        assert_eq!(summary, BatchSummary::default());
        assert!(transcoder.calls.borrow().is_empty());
        assert_eq!(observer.started, Some(0));
        assert!(observer.events.is_empty());
        assert_eq!(observer.completed.len(), 1);
    }

    #[test]
    fn test_success_writes_same_name_output() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir(&src).unwrap();
        let out = tmp.path().join("out");
        let candidates = make_candidates(&src, &["a.mp3"]);

        let summary = BatchRunner::new(&out)
            .run(&candidates, &FakeTranscoder::new(), &mut RecordingObserver::default())
            .unwrap();

        assert_eq!(summary.success, 1);
        assert_eq!(summary.results, vec![ProcessResult::Success("a.mp3".to_string())]);
        assert!(out.join("a.mp3").is_file());
        assert_eq!(fs::read(out.join("a.mp3")).unwrap(), b"audio:a.mp3");
    }

    #[test]
    fn test_failure_does_not_abort_batch() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir(&src).unwrap();
        let out = tmp.path().join("out");
        let candidates = make_candidates(&src, &["a.mp3", "bad.mp3", "c.mp3"]);
        let transcoder = FakeTranscoder::new();
        let mut observer = RecordingObserver::default();

        let summary = BatchRunner::new(&out)
            .run(&candidates, &transcoder, &mut observer)
            .unwrap();

        assert_eq!(summary.success, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.results.len(), candidates.len());
        assert_eq!(summary.total(), candidates.len());
        assert_eq!(
            *transcoder.calls.borrow(),
            vec!["a.mp3", "bad.mp3", "c.mp3"]
        );
        assert_eq!(
            observer.events,
            vec![
                (0, "a.mp3".to_string(), true),
                (1, "bad.mp3".to_string(), false),
                (2, "c.mp3".to_string(), true),
            ]
        );

        let failures: Vec<_> = summary.failures().collect();
        assert_eq!(failures, vec![("bad.mp3", "exit status 1: Invalid data found")]);
        assert_eq!(
            summary.results[1].message(),
            "Failed bad.mp3: exit status 1: Invalid data found"
        );

        // 默认保留残缺输出
        assert!(out.join("bad.mp3").exists());
    }

    #[test]
    fn test_remove_failed_outputs() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir(&src).unwrap();
        let out = tmp.path().join("out");
        let candidates = make_candidates(&src, &["bad.mp3", "good.mp3"]);

        let summary = BatchRunner::new(&out)
            .remove_failed_outputs(true)
            .run(&candidates, &FakeTranscoder::new(), &mut RecordingObserver::default())
            .unwrap();

        assert_eq!(summary.failed, 1);
        assert!(!out.join("bad.mp3").exists());
        assert!(out.join("good.mp3").exists());
    }

    #[test]
    fn test_callback_errors_are_ignored() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir(&src).unwrap();
        let candidates = make_candidates(&src, &["a.mp3", "b.mp3"]);
        let mut observer = RecordingObserver {
            fail_progress: true,
            ..Default::default()
        };

        let summary = BatchRunner::new(tmp.path().join("out"))
            .run(&candidates, &FakeTranscoder::new(), &mut observer)
            .unwrap();

        assert_eq!(summary.success, 2);
        assert_eq!(observer.events.len(), 2);
        assert_eq!(observer.completed.len(), 1);
    }

    #[test]
    fn test_unwritable_output_dir_prevents_progress() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir(&src).unwrap();
        let candidates = make_candidates(&src, &["a.mp3"]);

        // 输出路径的父级是普通文件
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();
        let transcoder = FakeTranscoder::new();
        let mut observer = RecordingObserver::default();

        let err = BatchRunner::new(blocker.join("out"))
            .run(&candidates, &transcoder, &mut observer)
            .unwrap_err();

        assert!(matches!(err, TagstripError::OutputDirectoryUnwritable { .. }));
        assert!(observer.started.is_none());
        assert!(observer.events.is_empty());
        assert!(observer.completed.is_empty());
        assert!(transcoder.calls.borrow().is_empty());

        // 输出路径本身是普通文件
        let err = BatchRunner::new(&blocker)
            .run(&candidates, &transcoder, &mut observer)
            .unwrap_err();
        assert!(matches!(err, TagstripError::OutputDirectoryUnwritable { .. }));
        assert!(observer.events.is_empty());
    }

    #[test]
    fn test_rerun_into_fresh_output_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir(&src).unwrap();
        let candidates = make_candidates(&src, &["a.mp3", "bad.mp3", "z.mp3"]);

        let first = BatchRunner::new(tmp.path().join("out1"))
            .run(&candidates, &FakeTranscoder::new(), &mut RecordingObserver::default())
            .unwrap();
        let second = BatchRunner::new(tmp.path().join("out2"))
            .run(&candidates, &FakeTranscoder::new(), &mut RecordingObserver::default())
            .unwrap();

        assert_eq!(first, second);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_with_real_process() {
        use crate::tool::FfmpegTool;

        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir(&src).unwrap();
        let candidates = make_candidates(&src, &["a.mp3", "b.mp3"]);

        let summary = BatchRunner::new(tmp.path().join("out"))
            .run(&candidates, &FfmpegTool::new("false"), &mut RecordingObserver::default())
            .unwrap();

        assert_eq!(summary.success, 0);
        assert_eq!(summary.failed, 2);
        assert_eq!(
            summary.results[0],
            ProcessResult::Failed("a.mp3".to_string(), "exit status 1".to_string())
        );
    }

    #[test]
    fn test_remove_failed_keeps_preexisting_output() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir(&src).unwrap();
        let out = tmp.path().join("out");
        fs::create_dir(&out).unwrap();
        fs::write(out.join("bad.mp3"), b"earlier good output").unwrap();
        let candidates = make_candidates(&src, &["bad.mp3"]);

        let summary = BatchRunner::new(&out)
            .remove_failed_outputs(true)
            .run(&candidates, &FakeTranscoder::new(), &mut RecordingObserver::default())
            .unwrap();

        assert_eq!(summary.failed, 1);
        assert_eq!(fs::read(out.join("bad.mp3")).unwrap(), b"earlier good output");
    }

    #[cfg(unix)]
    #[test]
    fn test_remove_failed_never_deletes_source_in_place() {
        use crate::batch::DirectoryScanner;
        use crate::tool::FfmpegTool;

        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("a.mp3"), b"original audio").unwrap();
        let candidates = DirectoryScanner::new("mp3").unwrap().scan(&src).unwrap();

        // 输出目录就是源目录：输出路径与输入相同
        let summary = BatchRunner::new(&src)
            .remove_failed_outputs(true)
            .run(&candidates, &FfmpegTool::new("false"), &mut RecordingObserver::default())
            .unwrap();

        assert_eq!(summary.failed, 1);
        assert_eq!(fs::read(src.join("a.mp3")).unwrap(), b"original audio");
    }

    #[test]
    fn test_other_errors_are_truncated() {
        struct Noisy;

        impl Transcoder for Noisy {
            fn transcode(&self, _input: &Path, _output: &Path) -> Result<()> {
                Err(TagstripError::InvalidArgument("z".repeat(300)))
            }
        }

        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir(&src).unwrap();
        let candidates = make_candidates(&src, &["a.mp3"]);

        let summary = BatchRunner::new(tmp.path().join("out"))
            .with_error_limit(20)
            .run(&candidates, &Noisy, &mut RecordingObserver::default())
            .unwrap();

        let (_, reason) = summary.failures().next().unwrap();
        assert_eq!(reason.chars().count(), 23);
        assert!(reason.starts_with("Invalid argument: "));
        assert!(reason.ends_with("..."));
    }
}
