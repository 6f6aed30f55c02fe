//! 设置文件模块
//!
//! # 设计思路
//!
//! 用一个扁平的 JSON 文件描述全部可调参数，所有字段可选，缺省值与
//! `ImageConfig` / `RenderConfig` 的 `Default` 保持一致。未知字段直接报错，
//! 避免拼写错误被静默忽略。
//!
//! # 实现思路
//!
//! - `serde` 派生 + `#[serde(default)]`，`serde_json` 解析。
//! - `image_config` / `render_config` 把设置拆成两个阶段各自的不可变配置。

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::AppError;
use crate::image_handler::{ImageConfig, ResampleProfile};
use crate::render::RenderConfig;

/// 全部可调参数。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub max_width_px: u32,
    pub max_file_size: u64,
    pub max_decoded_pixels: u64,
    pub resample: ResampleProfile,
    pub target_width_mm: f64,
    pub margin_mm: f64,
    pub stroke_width_mm: f64,
    pub subpixel_offsets: [f64; 3],
    pub dash_steps: u32,
    pub dash_fill: f64,
    pub min_channel_cutoff: u8,
    pub gamma: f64,
    pub background: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let image = ImageConfig::default();
        let render = RenderConfig::default();
        Self {
            max_width_px: image.max_width_px,
            max_file_size: image.max_file_size,
            max_decoded_pixels: image.max_decoded_pixels,
            resample: image.infer_resample_profile(),
            target_width_mm: render.target_width_mm,
            margin_mm: render.margin_mm,
            stroke_width_mm: render.stroke_width_mm,
            subpixel_offsets: render.subpixel_offsets,
            dash_steps: render.dash_steps,
            dash_fill: render.dash_fill,
            min_channel_cutoff: render.min_channel_cutoff,
            gamma: render.gamma,
            background: render.background,
        }
    }
}

impl Settings {
    /// 从 JSON 字符串解析设置。
    pub fn from_json(content: &str) -> Result<Self, AppError> {
        serde_json::from_str(content)
            .map_err(|e| AppError::Config(format!("解析设置失败: {}", e)))
    }

    /// 从 JSON 文件加载设置。
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("读取设置文件 '{}' 失败: {}", path.display(), e))
        })?;
        let settings = Self::from_json(&content)?;
        log::info!("⚙️ 已加载设置文件 - {}", path.display());
        Ok(settings)
    }

    pub fn image_config(&self) -> ImageConfig {
        let mut config = ImageConfig {
            max_file_size: self.max_file_size,
            max_decoded_pixels: self.max_decoded_pixels,
            max_width_px: self.max_width_px,
            ..ImageConfig::default()
        };
        config.apply_resample_profile(self.resample);
        config
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            target_width_mm: self.target_width_mm,
            margin_mm: self.margin_mm,
            stroke_width_mm: self.stroke_width_mm,
            subpixel_offsets: self.subpixel_offsets,
            dash_steps: self.dash_steps,
            dash_fill: self.dash_fill,
            min_channel_cutoff: self.min_channel_cutoff,
            gamma: self.gamma,
            background: self.background,
        }
    }
}
