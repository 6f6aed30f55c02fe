//! # 数据源与中间模型
//!
//! ## 设计思路
//!
//! 将"外部输入"和"流水线中间结果"解耦：
//! - `RawImageData` 表示已加载但未解码的字节
//! - `ScaledImage` 表示降采样后、可直接逐像素扫描的 RGB 数据

use image::{Rgb, RgbImage};

/// 加载阶段输出：原始字节与来源标识。
pub(crate) struct RawImageData {
    /// 原始图片字节。
    pub(crate) bytes: Vec<u8>,
    /// 来源提示（用于日志与诊断）。
    pub(crate) source_hint: String,
}

/// 解码阶段输出：宽度已受 `max_width_px` 约束的 RGB 图像。
///
/// 加载后不可变，渲染阶段只读访问。
#[derive(Debug, Clone)]
pub struct ScaledImage {
    pixels: RgbImage,
}

impl ScaledImage {
    pub fn new(pixels: RgbImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// 读取 `(x, y)` 处像素的 `[r, g, b]`。
    ///
    /// 调用方需保证坐标在范围内。
    pub fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let Rgb(channels) = *self.pixels.get_pixel(x, y);
        channels
    }
}

