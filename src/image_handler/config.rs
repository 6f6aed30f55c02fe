//! # 配置模块
//!
//! ## 设计思路
//!
//! 将加载与降采样阶段的"可调策略"集中到 `ImageConfig`，保证行为可观测、可测试。
//! 重采样档位（quality / balanced / speed）作为高层语义，映射到具体滤镜。
//!
//! ## 实现思路
//!
//! - `Default` 提供适合绘图仪的配置（宽度上限 320 像素，Lanczos3 滤镜）。
//! - `ResampleProfile` 负责档位字符串解析与反向输出。
//! - `apply_resample_profile` 将档位转换为具体滤镜。
//! - `infer_resample_profile` 从当前滤镜反推档位（用于日志展示）。

use image::imageops::FilterType;
use serde::Deserialize;

use super::ImageError;

/// 图片加载与降采样配置。
#[derive(Debug, Clone)]
pub struct ImageConfig {
    /// 读取原始字节时允许的最大文件体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 降采样后的最大宽度（像素），高度按比例计算。
    pub max_width_px: u32,
    /// 降采样滤镜策略。
    pub resize_filter: FilterType,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
            max_width_px: 320,
            resize_filter: FilterType::Lanczos3,
        }
    }
}

/// 重采样档位。
///
/// - `Quality`：Lanczos3，尽量保真
/// - `Balanced`：Triangle，质量与速度平衡
/// - `Speed`：Nearest，优先速度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResampleProfile {
    Quality,
    Balanced,
    Speed,
}

impl ResampleProfile {
    /// 从外部字符串解析档位。
    ///
    /// # 示例
    /// ```rust
    /// use crt_scanline::image_handler::ResampleProfile;
    ///
    /// let p = ResampleProfile::from_str("balanced")?;
    /// assert_eq!(p.as_str(), "balanced");
    /// # Ok::<(), crt_scanline::image_handler::ImageError>(())
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(profile: &str) -> Result<Self, ImageError> {
        match profile.trim().to_lowercase().as_str() {
            "quality" => Ok(Self::Quality),
            "balanced" => Ok(Self::Balanced),
            "speed" => Ok(Self::Speed),
            other => Err(ImageError::InvalidFormat(format!(
                "未知重采样档位：{}（可选：quality / balanced / speed）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Balanced => "balanced",
            Self::Speed => "speed",
        }
    }
}

impl ImageConfig {
    /// 基于当前滤镜反推重采样档位。
    pub fn infer_resample_profile(&self) -> ResampleProfile {
        match self.resize_filter {
            FilterType::Nearest => ResampleProfile::Speed,
            FilterType::Triangle => ResampleProfile::Balanced,
            _ => ResampleProfile::Quality,
        }
    }

    /// 应用指定重采样档位到实际滤镜。
    pub fn apply_resample_profile(&mut self, profile: ResampleProfile) {
        self.resize_filter = match profile {
            ResampleProfile::Quality => FilterType::Lanczos3,
            ResampleProfile::Balanced => FilterType::Triangle,
            ResampleProfile::Speed => FilterType::Nearest,
        };
    }

    /// 校验配置取值。
    pub fn validate(&self) -> Result<(), ImageError> {
        if self.max_width_px == 0 {
            return Err(ImageError::InvalidFormat("max_width_px 不能为 0".to_string()));
        }
        if self.max_file_size == 0 {
            return Err(ImageError::InvalidFormat("max_file_size 不能为 0".to_string()));
        }
        if self.max_decoded_pixels == 0 {
            return Err(ImageError::InvalidFormat("max_decoded_pixels 不能为 0".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_parse_is_case_insensitive() {
        assert_eq!(
            ResampleProfile::from_str("  SPEED ").expect("parse speed"),
            ResampleProfile::Speed
        );
        assert!(matches!(
            ResampleProfile::from_str("ultra"),
            Err(ImageError::InvalidFormat(_))
        ));
    }

    #[test]
    fn apply_then_infer_profile_is_stable() {
        let mut config = ImageConfig::default();
        assert_eq!(config.infer_resample_profile(), ResampleProfile::Quality);

        for profile in [
            ResampleProfile::Speed,
            ResampleProfile::Balanced,
            ResampleProfile::Quality,
        ] {
            config.apply_resample_profile(profile);
            assert_eq!(config.infer_resample_profile(), profile);
        }
    }

    #[test]
    fn validate_rejects_zero_width() {
        let config = ImageConfig {
            max_width_px: 0,
            ..ImageConfig::default()
        };
        assert!(matches!(config.validate(), Err(ImageError::InvalidFormat(_))));
        assert!(ImageConfig::default().validate().is_ok());
    }
}
