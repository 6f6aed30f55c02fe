//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `ImageHandler` 只负责加载阶段的流程编排，不关心渲染与输出。
//! 处理链路固定为：
//! 1. 按路径加载原始字节
//! 2. 解码并按宽度上限降采样
//!
//! ## 实现思路
//!
//! - 配置在构造时校验并固定，单次转换内不会变化。
//! - 记录 `load/decode/total` 阶段耗时，便于性能诊断。

use std::path::Path;
use std::time::Instant;

use super::{ImageConfig, ImageError, ScaledImage};

/// 图片加载器。
pub struct ImageHandler {
    config: ImageConfig,
}

impl ImageHandler {
    /// 根据配置创建加载器，配置非法时直接返回错误。
    ///
    /// # 示例
    /// ```rust
    /// use crt_scanline::image_handler::{ImageConfig, ImageHandler};
    ///
    /// let handler = ImageHandler::new(ImageConfig::default())?;
    /// assert_eq!(handler.config().max_width_px, 320);
    /// # Ok::<(), crt_scanline::image_handler::ImageError>(())
    /// ```
    pub fn new(config: ImageConfig) -> Result<Self, ImageError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ImageConfig {
        &self.config
    }

    /// 处理主入口：读取文件、解码并降采样。
    pub fn load_scaled(&self, path: &Path) -> Result<ScaledImage, ImageError> {
        let total_start = Instant::now();

        let load_start = Instant::now();
        let raw = self.load_from_file(path, &self.config)?;
        let load_elapsed = load_start.elapsed();

        let decode_start = Instant::now();
        let scaled = self.decode_and_downscale(raw, &self.config)?;
        let decode_elapsed = decode_start.elapsed();

        log::info!(
            "✅ 图片加载完成 - load={}ms decode={}ms total={}ms",
            load_elapsed.as_millis(),
            decode_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        Ok(scaled)
    }
}
