//! # 解码与降采样流水线模块
//!
//! ## 设计思路
//!
//! 将"字节 → 图像 → RGB"的过程集中管理，并在关键节点增加资源上限控制。
//! 优先做尺寸检查，再进行完整解码，降低异常输入触发高内存开销的风险。
//!
//! ## 实现思路
//!
//! 1. 读取 header 尺寸
//! 2. 按像素上限快速拒绝
//! 3. 完整解码并转换为 RGB（丢弃 alpha）
//! 4. 宽度超过 `max_width_px` 时按比例降采样，否则原样返回

use fast_image_resize as fr;
use image::imageops::FilterType;
use image::{DynamicImage, ImageBuffer, Rgb, RgbImage};
use std::io::Cursor;

use super::source::{RawImageData, ScaledImage};
use super::{ImageConfig, ImageError, ImageHandler};

impl ImageHandler {
    /// 将原始字节解码为宽度受限的 RGB 图像。
    pub(crate) fn decode_and_downscale(
        &self,
        raw: RawImageData,
        config: &ImageConfig,
    ) -> Result<ScaledImage, ImageError> {
        let (header_width, header_height) = Self::inspect_dimensions_from_memory(&raw.bytes)?;
        Self::validate_pixel_limits(config, header_width, header_height)?;

        let decoded = image::load_from_memory(&raw.bytes)
            .map_err(|e| ImageError::Decode(format!("图片解码失败：{}", e)))?;

        let rgb = decoded.to_rgb8();
        let (raw_width, raw_height) = rgb.dimensions();
        Self::validate_pixel_limits(config, raw_width, raw_height)?;

        let scaled = Self::downscale_to_width(rgb, config.max_width_px, config.resize_filter)?;

        log::info!(
            "✅ 图片解码成功 - 来源: {} 原始尺寸: {}x{} 输出尺寸: {}x{}",
            raw.source_hint,
            raw_width,
            raw_height,
            scaled.width(),
            scaled.height()
        );

        Ok(ScaledImage::new(scaled))
    }

    /// 仅通过内存中的图片头信息读取宽高。
    fn inspect_dimensions_from_memory(bytes: &[u8]) -> Result<(u32, u32), ImageError> {
        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| ImageError::Decode(format!("无法识别图片格式：{}", e)))?;

        reader
            .into_dimensions()
            .map_err(|e| ImageError::Decode(format!("无法读取图片尺寸：{}", e)))
    }

    fn validate_pixel_limits(
        config: &ImageConfig,
        width: u32,
        height: u32,
    ) -> Result<(), ImageError> {
        let pixels = (width as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| ImageError::ResourceLimit("图片像素数溢出".to_string()))?;

        if pixels == 0 {
            return Err(ImageError::Decode("图片尺寸为 0".to_string()));
        }

        if pixels > config.max_decoded_pixels {
            return Err(ImageError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, config.max_decoded_pixels
            )));
        }

        Ok(())
    }

    /// 计算降采样目标尺寸：宽度不超过 `max_width`，高度按比例四舍五入且至少为 1。
    pub fn scaled_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
        if width <= max_width || max_width == 0 {
            return (width, height);
        }

        let scale = max_width as f64 / width as f64;
        let target_height = ((height as f64 * scale).round() as u32).max(1);
        (max_width, target_height)
    }

    /// 宽度超过上限时按比例降采样，否则原样返回。
    pub fn downscale_to_width(
        image: RgbImage,
        max_width: u32,
        filter: FilterType,
    ) -> Result<RgbImage, ImageError> {
        let (width, height) = image.dimensions();
        let (target_width, target_height) = Self::scaled_dimensions(width, height, max_width);

        if (target_width, target_height) == (width, height) {
            return Ok(image);
        }

        log::info!(
            "🧩 降采样：{}x{} -> {}x{}（filter={:?}）",
            width,
            height,
            target_width,
            target_height,
            filter
        );

        match Self::resize_with_fast_image_resize(&image, target_width, target_height, filter) {
            Ok(resized) => Ok(resized),
            Err(err) => {
                log::warn!(
                    "⚠️ fast_image_resize 降采样失败，回退 image::resize_exact：{}",
                    err
                );
                Ok(DynamicImage::ImageRgb8(image)
                    .resize_exact(target_width, target_height, filter)
                    .to_rgb8())
            }
        }
    }

    fn resize_with_fast_image_resize(
        image: &RgbImage,
        target_width: u32,
        target_height: u32,
        filter: FilterType,
    ) -> Result<RgbImage, ImageError> {
        let (src_width, src_height) = image.dimensions();

        let src_image = fr::images::Image::from_vec_u8(
            src_width,
            src_height,
            image.as_raw().clone(),
            fr::PixelType::U8x3,
        )
        .map_err(|e| ImageError::Decode(format!("构建源图像缓冲失败：{}", e)))?;

        let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x3);

        let mut resizer = fr::Resizer::new();
        let options = fr::ResizeOptions::new().resize_alg(Self::to_fast_alg(filter));

        resizer
            .resize(&src_image, &mut dst_image, Some(&options))
            .map_err(|e| ImageError::Decode(format!("fast_image_resize 执行失败：{}", e)))?;

        ImageBuffer::<Rgb<u8>, Vec<u8>>::from_raw(target_width, target_height, dst_image.into_vec())
            .ok_or_else(|| ImageError::Decode("fast_image_resize 输出缓冲长度异常".to_string()))
    }

    fn to_fast_alg(filter: FilterType) -> fr::ResizeAlg {
        match filter {
            FilterType::Nearest => fr::ResizeAlg::Nearest,
            FilterType::Triangle => fr::ResizeAlg::Convolution(fr::FilterType::Bilinear),
            FilterType::CatmullRom => fr::ResizeAlg::Convolution(fr::FilterType::CatmullRom),
            FilterType::Gaussian => fr::ResizeAlg::Convolution(fr::FilterType::Mitchell),
            FilterType::Lanczos3 => fr::ResizeAlg::Convolution(fr::FilterType::Lanczos3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;
    use proptest::prelude::*;

    fn gradient(width: u32, height: u32) -> RgbImage {
        ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x % 255) as u8, (y % 255) as u8, ((x + y) % 255) as u8])
        })
    }

    fn encode(img: RgbImage, format: ImageFormat) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut cursor, format)
            .expect("failed to encode test image");
        cursor.into_inner()
    }

    fn raw(bytes: Vec<u8>) -> RawImageData {
        RawImageData {
            bytes,
            source_hint: "test".to_string(),
        }
    }

    #[test]
    fn narrow_image_is_returned_unchanged() {
        let img = gradient(40, 30);
        let out = ImageHandler::downscale_to_width(img.clone(), 320, FilterType::Lanczos3)
            .expect("downscale should succeed");
        assert_eq!(out, img);
    }

    #[test]
    fn wide_image_is_capped_and_keeps_aspect_ratio() {
        let handler = ImageHandler::new(ImageConfig::default()).expect("handler init failed");
        let config = ImageConfig::default();
        let png = encode(gradient(1280, 720), ImageFormat::Png);

        let scaled = handler
            .decode_and_downscale(raw(png), &config)
            .expect("decode pipeline should succeed");

        assert_eq!(scaled.width(), 320);
        assert_eq!(scaled.height(), 180);
    }

    #[test]
    fn scaled_height_never_collapses_to_zero() {
        assert_eq!(ImageHandler::scaled_dimensions(1000, 1, 10), (10, 1));
        assert_eq!(ImageHandler::scaled_dimensions(3, 7, 1), (1, 2));
    }

    #[test]
    fn truncated_png_fails_with_decode_error() {
        let handler = ImageHandler::new(ImageConfig::default()).expect("handler init failed");
        let config = ImageConfig::default();
        let mut bytes = encode(gradient(16, 16), ImageFormat::Png);
        bytes.truncate(24);

        let result = handler.decode_and_downscale(raw(bytes), &config);

        assert!(matches!(result, Err(ImageError::Decode(_))));
    }

    #[test]
    fn unrecognised_bytes_fail_with_decode_error() {
        let handler = ImageHandler::new(ImageConfig::default()).expect("handler init failed");
        let config = ImageConfig::default();

        let result = handler.decode_and_downscale(raw(b"plain text, no header".to_vec()), &config);

        assert!(matches!(result, Err(ImageError::Decode(_))));
    }

    #[test]
    fn rejects_images_above_pixel_limit() {
        let handler = ImageHandler::new(ImageConfig::default()).expect("handler init failed");
        let config = ImageConfig {
            max_decoded_pixels: 100,
            ..ImageConfig::default()
        };
        let png = encode(gradient(20, 20), ImageFormat::Png);

        let result = handler.decode_and_downscale(raw(png), &config);

        assert!(matches!(result, Err(ImageError::ResourceLimit(_))));
    }

    #[test]
    fn rgba_input_is_flattened_to_rgb() {
        let handler = ImageHandler::new(ImageConfig::default()).expect("handler init failed");
        let config = ImageConfig::default();
        let rgba = ImageBuffer::from_pixel(2, 2, image::Rgba([200u8, 100, 50, 0]));
        let mut cursor = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(rgba)
            .write_to(&mut cursor, ImageFormat::Png)
            .expect("encode rgba");

        let scaled = handler
            .decode_and_downscale(raw(cursor.into_inner()), &config)
            .expect("decode pipeline should succeed");

        assert_eq!(scaled.rgb(1, 1), [200, 100, 50]);
    }

    proptest! {
        #[test]
        fn downscale_never_exceeds_max_width(
            width in 1u32..96,
            height in 1u32..96,
            max_width in 1u32..64,
        ) {
            let out = ImageHandler::downscale_to_width(gradient(width, height), max_width, FilterType::Triangle)
                .expect("downscale should succeed");
            prop_assert!(out.width() <= max_width);
            prop_assert!(out.width() <= width);
            prop_assert!(out.height() >= 1);
            if width > max_width {
                prop_assert_eq!(out.width(), max_width);
            }
        }
    }
}
