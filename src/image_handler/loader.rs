//! # 加载与校验模块
//!
//! ## 设计思路
//!
//! 负责本地文件的原始字节加载，并在"尽可能早"的阶段执行输入校验。
//! 目标是尽快失败，减少不必要内存与 CPU 消耗。
//!
//! ## 实现思路
//!
//! - 存在性检查 → metadata 体积限制 → 读取 → 格式签名校验。
//! - 所有失败统一映射到 `ImageError`，便于上层处理。

use std::path::Path;

use super::source::RawImageData;
use super::{ImageConfig, ImageError, ImageHandler};

impl ImageHandler {
    /// 从本地路径加载图片原始字节。
    pub(crate) fn load_from_file(
        &self,
        path: &Path,
        config: &ImageConfig,
    ) -> Result<RawImageData, ImageError> {
        log::info!("📁 开始读取本地图片 - 路径: {}", path.display());

        if !path.exists() {
            return Err(ImageError::FileSystem(format!(
                "文件不存在：{}",
                path.display()
            )));
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| ImageError::FileSystem(format!("无法读取文件信息：{}", e)))?;

        if !metadata.is_file() {
            return Err(ImageError::FileSystem(format!(
                "不是普通文件：{}",
                path.display()
            )));
        }

        if metadata.len() > config.max_file_size {
            return Err(ImageError::ResourceLimit(format!(
                "文件过大：{:.2} MB（限制：{:.2} MB）",
                metadata.len() as f64 / 1024.0 / 1024.0,
                config.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        let bytes = std::fs::read(path)
            .map_err(|e| ImageError::FileSystem(format!("无法读取图片文件：{}", e)))?;
        Self::validate_image_signature(&bytes)?;

        Ok(RawImageData {
            bytes,
            source_hint: path.display().to_string(),
        })
    }

    /// 通过文件头签名确认字节是可识别的图片格式。
    ///
    /// 空文件与无法识别的文件头都属于"输入不是有效图片"，按解码错误上报。
    fn validate_image_signature(bytes: &[u8]) -> Result<(), ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::Decode("图片文件为空".to_string()));
        }

        image::guess_format(bytes)
            .map(|_| ())
            .map_err(|e| ImageError::Decode(format!("无法识别的图片格式：{}", e)))
    }
}
