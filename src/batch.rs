//! 批处理模块
//!
//! # 设计思路
//!
//! 把"选一张图 → 选保存位置 → 转换 → 再来一张"的交互循环抽象为显式的
//! `(输入, 输出)` 任务列表，与任何 UI 解耦。任务严格按顺序执行，
//! 单个任务失败（无法解码 / 无法写盘）只记录到报告里，不中断后续任务。
//!
//! # 实现思路
//!
//! - `ConversionJob`：一对输入 / 输出路径，可按输入文件名推导输出名。
//! - `Batch`：有序任务列表，可由命令行参数或 JSON 清单构建。
//! - `BatchReport`：成功输出路径 + 失败任务及其错误。

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Deserialize;

use crate::error::AppError;
use crate::image_handler::{ImageHandler, ScaledImage};
use crate::render::{RenderConfig, render_document};
use crate::svg::{render_svg, write_svg};

const OUTPUT_SUFFIX: &str = "_CRT_RGB.svg";

/// 单个转换任务。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// 清单中的一项，`output` 缺省时按输入文件名推导。
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestEntry {
    input: PathBuf,
    #[serde(default)]
    output: Option<PathBuf>,
}

/// 根据输入文件名给出建议的输出文件名：`{stem}_CRT_RGB.svg`。
pub fn suggested_output_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "image".to_string());
    format!("{}{}", stem, OUTPUT_SUFFIX)
}

/// 读取、渲染并序列化单张图片，不写盘。
pub fn render_file_to_svg(
    input: &Path,
    handler: &ImageHandler,
    config: &RenderConfig,
) -> Result<String, AppError> {
    let image = handler.load_scaled(input)?;
    render_image_to_svg(&image, &document_title(input), config)
}

fn render_image_to_svg(
    image: &ScaledImage,
    title: &str,
    config: &RenderConfig,
) -> Result<String, AppError> {
    let document = render_document(image, config, title)?;
    Ok(render_svg(&document))
}

fn document_title(input: &Path) -> String {
    input
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

impl ConversionJob {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// 输出放在 `out_dir`（若提供）或输入文件同目录下，文件名按约定推导。
    pub fn for_input(input: impl Into<PathBuf>, out_dir: Option<&Path>) -> Self {
        let input = input.into();
        let name = suggested_output_name(&input);
        let output = match out_dir {
            Some(dir) => dir.join(name),
            None => input.with_file_name(name),
        };
        Self { input, output }
    }

    /// 执行单个任务。
    pub fn run(&self, handler: &ImageHandler, config: &RenderConfig) -> Result<(), AppError> {
        let total_start = Instant::now();

        let load_start = Instant::now();
        let image = handler.load_scaled(&self.input)?;
        let load_elapsed = load_start.elapsed();

        let render_start = Instant::now();
        let svg = render_image_to_svg(&image, &document_title(&self.input), config)?;
        let render_elapsed = render_start.elapsed();

        let write_start = Instant::now();
        write_svg(&self.output, &svg)?;
        let write_elapsed = write_start.elapsed();

        log::info!(
            "✅ 转换完成 - {} -> {} load={}ms render={}ms write={}ms total={}ms",
            self.input.display(),
            self.output.display(),
            load_elapsed.as_millis(),
            render_elapsed.as_millis(),
            write_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        Ok(())
    }
}

/// 失败任务及原因。
#[derive(Debug)]
pub struct JobFailure {
    pub job: ConversionJob,
    pub error: AppError,
}

/// 批处理结果。
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<PathBuf>,
    pub failed: Vec<JobFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// 有序任务列表。
#[derive(Debug, Clone, Default)]
pub struct Batch {
    jobs: Vec<ConversionJob>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, job: ConversionJob) {
        self.jobs.push(job);
    }

    pub fn jobs(&self) -> &[ConversionJob] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// 解析 JSON 清单：`[{"input": "...", "output": "..."}]`，`output` 可省略。
    ///
    /// 清单中的相对路径以清单所在目录为基准。
    pub fn from_manifest_json(
        content: &str,
        base_dir: &Path,
        out_dir: Option<&Path>,
    ) -> Result<Self, AppError> {
        let entries: Vec<ManifestEntry> = serde_json::from_str(content)
            .map_err(|e| AppError::Config(format!("解析批处理清单失败: {}", e)))?;

        let jobs = entries
            .into_iter()
            .map(|entry| {
                let input = base_dir.join(entry.input);
                match entry.output {
                    Some(output) => ConversionJob::new(input, base_dir.join(output)),
                    None => ConversionJob::for_input(input, out_dir),
                }
            })
            .collect();

        Ok(Self { jobs })
    }

    pub fn load_manifest(path: &Path, out_dir: Option<&Path>) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("读取批处理清单 '{}' 失败: {}", path.display(), e))
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_manifest_json(&content, base_dir, out_dir)
    }

    /// 顺序执行所有任务；失败的任务记录后继续下一个。
    pub fn run(&self, handler: &ImageHandler, config: &RenderConfig) -> BatchReport {
        let mut report = BatchReport::default();

        for (index, job) in self.jobs.iter().enumerate() {
            log::info!(
                "▶️ [{}/{}] {}",
                index + 1,
                self.jobs.len(),
                job.input.display()
            );

            match job.run(handler, config) {
                Ok(()) => report.succeeded.push(job.output.clone()),
                Err(error) => {
                    log::error!("❌ 转换失败 - {}: {}", job.input.display(), error);
                    report.failed.push(JobFailure {
                        job: job.clone(),
                        error,
                    });
                }
            }
        }

        log::info!(
            "📊 批处理结束 - 成功 {} / 失败 {} / 共 {}",
            report.succeeded.len(),
            report.failed.len(),
            report.total()
        );

        report
    }
}

impl FromIterator<ConversionJob> for Batch {
    fn from_iter<I: IntoIterator<Item = ConversionJob>>(iter: I) -> Self {
        Self {
            jobs: iter.into_iter().collect(),
        }
    }
}
