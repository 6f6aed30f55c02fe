//! # CRT 扫描线绘图工具 — 命令行入口
//!
//! 本文件仅负责日志初始化、参数解析与批处理调度。
//! 转换逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use crt_scanline::batch::{Batch, BatchReport, ConversionJob};
use crt_scanline::error::AppError;
use crt_scanline::image_handler::{ImageHandler, ResampleProfile};
use crt_scanline::render::RenderConfig;
use crt_scanline::settings::Settings;

/// 把位图转换为 RGB 子像素虚线 SVG（三色笔式绘图仪）
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// 输入图片（可多个）
    #[arg(value_hint = clap::ValueHint::FilePath)]
    inputs: Vec<PathBuf>,

    /// 输出 SVG 路径（仅在恰好一个输入时可用）
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// 输出目录，文件名按 `{名称}_CRT_RGB.svg` 推导
    #[arg(short = 'd', long, value_hint = clap::ValueHint::DirPath)]
    out_dir: Option<PathBuf>,

    /// JSON 批处理清单：[{"input": "...", "output": "..."}]
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    manifest: Option<PathBuf>,

    /// JSON 设置文件
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// 不添加黑色背景矩形
    #[arg(long)]
    no_background: bool,

    /// 降采样后的最大宽度（像素）
    #[arg(long)]
    max_width: Option<u32>,

    /// 输出画面宽度（毫米，不含边距）
    #[arg(long)]
    width_mm: Option<f64>,

    /// 笔触宽度（毫米）
    #[arg(long)]
    stroke_mm: Option<f64>,

    /// 每个像素条纹的槽位数
    #[arg(long)]
    dash_steps: Option<u32>,

    /// 每个槽位中墨线所占比例 (0, 1]
    #[arg(long)]
    dash_fill: Option<f64>,

    /// 伽马
    #[arg(long)]
    gamma: Option<f64>,

    /// 重采样档位：quality / balanced / speed
    #[arg(long)]
    resample: Option<String>,
}

impl Cli {
    fn settings(&self) -> Result<Settings, AppError> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        if self.no_background {
            settings.background = false;
        }
        if let Some(v) = self.max_width {
            settings.max_width_px = v;
        }
        if let Some(v) = self.width_mm {
            settings.target_width_mm = v;
        }
        if let Some(v) = self.stroke_mm {
            settings.stroke_width_mm = v;
        }
        if let Some(v) = self.dash_steps {
            settings.dash_steps = v;
        }
        if let Some(v) = self.dash_fill {
            settings.dash_fill = v;
        }
        if let Some(v) = self.gamma {
            settings.gamma = v;
        }
        if let Some(profile) = &self.resample {
            settings.resample = ResampleProfile::from_str(profile)
                .map_err(|e| AppError::Config(e.to_string()))?;
        }

        Ok(settings)
    }

    fn batch(&self) -> Result<Batch, AppError> {
        if self.output.is_some() && (self.inputs.len() != 1 || self.manifest.is_some()) {
            return Err(AppError::Config(
                "--output 只能与恰好一个输入图片一起使用".to_string(),
            ));
        }

        let out_dir = self.out_dir.as_deref();
        let mut batch = match &self.manifest {
            Some(path) => Batch::load_manifest(path, out_dir)?,
            None => Batch::new(),
        };

        for input in &self.inputs {
            let job = match &self.output {
                Some(output) => ConversionJob::new(input.clone(), output.clone()),
                None => ConversionJob::for_input(input.clone(), out_dir),
            };
            batch.push(job);
        }

        if batch.is_empty() {
            return Err(AppError::Config("没有需要转换的图片".to_string()));
        }

        Ok(batch)
    }

    /// 启动前的全部准备：设置、参数校验、处理器与任务列表。
    ///
    /// 这里的任何失败都属于配置 / 用法错误，统一上报为 `AppError::Config`。
    fn prepare(&self) -> Result<(ImageHandler, RenderConfig, Batch), AppError> {
        let settings = self.settings()?;
        let render_config = settings.render_config();
        render_config
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;
        let handler = ImageHandler::new(settings.image_config())
            .map_err(|e| AppError::Config(e.to_string()))?;
        Ok((handler, render_config, self.batch()?))
    }
}

/// 0：全部成功；1：存在失败任务。
fn report_exit_code(report: &BatchReport) -> u8 {
    if report.is_success() { 0 } else { 1 }
}

const SETUP_FAILURE: u8 = 2;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let (handler, render_config, batch) = match cli.prepare() {
        Ok(parts) => parts,
        Err(err) => {
            log::error!("启动失败: {err}");
            return ExitCode::from(SETUP_FAILURE);
        }
    };

    let report = batch.run(&handler, &render_config);

    for failure in &report.failed {
        eprintln!("{}: {}", failure.job.input.display(), failure.error);
    }

    ExitCode::from(report_exit_code(&report))
}
