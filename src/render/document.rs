//! # 文档构建模块
//!
//! ## 设计思路
//!
//! 按光栅扫描顺序（自上而下逐行、每行自左向右）遍历降采样后的图像，
//! 每个像素单元内并排三条竖直条纹，分别交给 R/G/B 通道的虚线生成器。
//! 结果是一个纯数据的 `Document`，SVG 拼装与写盘都不在这里发生。

use crate::image_handler::ScaledImage;

use super::dash::{DashPattern, DashSegment, gamma_map};
use super::{Channel, RenderConfig, RenderError};

/// 渲染结果：三组按通道划分的线段 + 物理尺寸。
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// 标题（通常为输入文件名）。
    pub title: String,
    /// 含边距的画布宽度（毫米）。
    pub width_mm: f64,
    /// 含边距的画布高度（毫米）。
    pub height_mm: f64,
    pub stroke_width_mm: f64,
    pub background: bool,
    channels: [Vec<DashSegment>; 3],
}

impl Document {
    pub fn segments(&self, channel: Channel) -> &[DashSegment] {
        &self.channels[channel.index()]
    }

    pub fn segment_count(&self) -> usize {
        self.channels.iter().map(Vec::len).sum()
    }

    /// viewBox 以毫米为单位，1 个用户单位 = 1 毫米。
    pub fn view_box(&self) -> (f64, f64) {
        (self.width_mm, self.height_mm)
    }

    /// 笔触宽度换算到 SVG 用户单位。
    pub fn stroke_width_units(&self) -> f64 {
        let (view_width, _) = self.view_box();
        self.stroke_width_mm * view_width / self.width_mm
    }
}

/// 把图像渲染为三通道虚线文档。
pub fn render_document(
    image: &ScaledImage,
    config: &RenderConfig,
    title: &str,
) -> Result<Document, RenderError> {
    config.validate()?;

    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyImage);
    }

    // 方形像素
    let px = config.target_width_mm / f64::from(width);
    let margin = config.margin_mm;
    let pattern = DashPattern::new(config.dash_steps, config.dash_fill);
    let cutoff = config.min_channel_cutoff;

    let mut channels: [Vec<DashSegment>; 3] = Default::default();

    for y in 0..height {
        let y0 = margin + f64::from(y) * px;
        let y1 = y0 + px;

        for x in 0..width {
            let rgb = image.rgb(x, y);
            if rgb.iter().all(|&v| v < cutoff) {
                continue;
            }

            let x_base = margin + f64::from(x) * px;
            for channel in Channel::ALL {
                let value = channel.value(rgb);
                if value < cutoff {
                    continue;
                }
                let stripe_x = x_base + config.subpixel_offsets[channel.index()] * px;
                pattern.render_into(
                    &mut channels[channel.index()],
                    channel,
                    stripe_x,
                    y0,
                    y1,
                    gamma_map(value, config.gamma),
                );
            }
        }
    }

    let document = Document {
        title: title.to_string(),
        width_mm: margin * 2.0 + f64::from(width) * px,
        height_mm: margin * 2.0 + f64::from(height) * px,
        stroke_width_mm: config.stroke_width_mm,
        background: config.background,
        channels,
    };

    log::debug!(
        "🖊️ 渲染完成 - {}x{} 像素 → {:.1}x{:.1}mm，线段 R={} G={} B={}",
        width,
        height,
        document.width_mm,
        document.height_mm,
        document.segments(Channel::Red).len(),
        document.segments(Channel::Green).len(),
        document.segments(Channel::Blue).len()
    );

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, RgbImage};

    const EPS: f64 = 1e-9;

    fn single_pixel(rgb: [u8; 3]) -> ScaledImage {
        ScaledImage::new(ImageBuffer::from_pixel(1, 1, Rgb(rgb)))
    }

    #[test]
    fn white_pixel_fills_every_channel_with_equal_solid_segments() {
        let config = RenderConfig {
            gamma: 1.0,
            dash_steps: 4,
            ..RenderConfig::default()
        };
        let doc = render_document(&single_pixel([255, 255, 255]), &config, "white")
            .expect("render should succeed");

        let lengths: Vec<f64> = Channel::ALL
            .iter()
            .map(|&c| {
                let segs = doc.segments(c);
                assert_eq!(segs.len(), 1, "channel {:?} should be one solid dash", c);
                segs[0].length()
            })
            .collect();

        assert!((lengths[0] - config.target_width_mm).abs() < EPS);
        assert!(lengths.iter().all(|l| (l - lengths[0]).abs() < EPS));
    }

    #[test]
    fn black_pixel_produces_no_geometry() {
        let config = RenderConfig {
            min_channel_cutoff: 0,
            ..RenderConfig::default()
        };
        let doc = render_document(&single_pixel([0, 0, 0]), &config, "black")
            .expect("render should succeed");
        assert_eq!(doc.segment_count(), 0);
    }

    #[test]
    fn channels_never_mix() {
        let doc = render_document(&single_pixel([255, 0, 0]), &RenderConfig::default(), "red")
            .expect("render should succeed");

        assert_eq!(doc.segments(Channel::Red).len(), 1);
        assert!(doc.segments(Channel::Green).is_empty());
        assert!(doc.segments(Channel::Blue).is_empty());
        assert!(doc.segments(Channel::Red).iter().all(|s| s.channel == Channel::Red));
    }

    #[test]
    fn values_below_cutoff_are_dropped() {
        let config = RenderConfig {
            min_channel_cutoff: 6,
            dash_steps: 1,
            ..RenderConfig::default()
        };
        let doc = render_document(&single_pixel([5, 200, 5]), &config, "cutoff")
            .expect("render should succeed");

        assert!(doc.segments(Channel::Red).is_empty());
        assert_eq!(doc.segments(Channel::Green).len(), 1);
        assert!(doc.segments(Channel::Blue).is_empty());
    }

    #[test]
    fn geometry_follows_margin_and_subpixel_offsets() {
        let img: RgbImage = ImageBuffer::from_pixel(2, 1, Rgb([255, 255, 255]));
        let config = RenderConfig {
            target_width_mm: 20.0,
            margin_mm: 5.0,
            ..RenderConfig::default()
        };
        let doc = render_document(&ScaledImage::new(img), &config, "geom")
            .expect("render should succeed");

        assert!((doc.width_mm - 30.0).abs() < EPS);
        assert!((doc.height_mm - 20.0).abs() < EPS);

        let reds = doc.segments(Channel::Red);
        assert_eq!(reds.len(), 2);
        assert!((reds[0].x - (5.0 + 0.18 * 10.0)).abs() < EPS);
        assert!((reds[1].x - (15.0 + 0.18 * 10.0)).abs() < EPS);
        assert!((reds[0].y_start - 5.0).abs() < EPS);
        assert!((reds[0].y_end - 15.0).abs() < EPS);

        let blues = doc.segments(Channel::Blue);
        assert!((blues[0].x - (5.0 + 0.82 * 10.0)).abs() < EPS);
    }

    #[test]
    fn segments_follow_raster_scan_order() {
        let img: RgbImage = ImageBuffer::from_fn(3, 2, |_, _| Rgb([0, 255, 0]));
        let config = RenderConfig {
            dash_steps: 1,
            ..RenderConfig::default()
        };
        let doc = render_document(&ScaledImage::new(img), &config, "scan")
            .expect("render should succeed");

        let greens = doc.segments(Channel::Green);
        assert_eq!(greens.len(), 6);
        for pair in greens.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!(a.y_start < b.y_start || (a.y_start == b.y_start && a.x < b.x));
        }
    }

    #[test]
    fn invalid_config_is_rejected_before_rendering() {
        let config = RenderConfig {
            dash_steps: 0,
            ..RenderConfig::default()
        };
        let result = render_document(&single_pixel([255, 255, 255]), &config, "bad");
        assert!(matches!(result, Err(RenderError::InvalidConfig(_))));
    }

    #[test]
    fn stroke_width_units_match_millimeters() {
        let doc = render_document(&single_pixel([10, 10, 10]), &RenderConfig::default(), "sw")
            .expect("render should succeed");
        assert!((doc.stroke_width_units() - 0.28).abs() < EPS);
    }
}
