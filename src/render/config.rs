//! # 渲染配置模块
//!
//! ## 设计思路
//!
//! 所有影响几何输出的参数集中在不可变的 `RenderConfig` 中，显式传入渲染函数，
//! 不存在模块级可变全局量。相同配置 + 相同图像 ⇒ 相同输出。
//!
//! ## 实现思路
//!
//! - `Default` 提供适合 0.3mm 针管笔、260mm 宽画幅的配置。
//! - `validate` 在渲染前一次性检查取值范围，渲染阶段不再做防御判断。

use super::RenderError;

/// 每个像素条纹允许的最大槽位数。
pub const MAX_DASH_STEPS: u32 = 1024;

/// 渲染配置。
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// 输出画面宽度（毫米，不含边距），高度由图像宽高比决定。
    pub target_width_mm: f64,
    /// 画面四周边距（毫米）。
    pub margin_mm: f64,
    /// 笔触宽度（毫米）。
    pub stroke_width_mm: f64,
    /// R/G/B 条纹在像素单元内的横向位置（0..1，相对像素宽度）。
    pub subpixel_offsets: [f64; 3],
    /// 每个像素条纹被划分的槽位数。
    pub dash_steps: u32,
    /// 每个"点亮"槽位中墨线所占比例，其余为间隙。
    pub dash_fill: f64,
    /// 通道值低于该阈值时不出线，减少杂点。
    pub min_channel_cutoff: u8,
    /// 伽马：>1 压暗中间调，<1 提亮中间调。
    pub gamma: f64,
    /// 是否在最底层铺一块黑色背景矩形（仅用于预览）。
    pub background: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            target_width_mm: 260.0,
            margin_mm: 6.0,
            stroke_width_mm: 0.28,
            subpixel_offsets: [0.18, 0.50, 0.82],
            dash_steps: 9,
            dash_fill: 0.70,
            min_channel_cutoff: 6,
            gamma: 1.0,
            background: true,
        }
    }
}

impl RenderConfig {
    /// 校验配置取值范围。
    pub fn validate(&self) -> Result<(), RenderError> {
        if !self.target_width_mm.is_finite() || self.target_width_mm <= 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "target_width_mm 必须为正数：{}",
                self.target_width_mm
            )));
        }
        if !self.margin_mm.is_finite() || self.margin_mm < 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "margin_mm 不能为负数：{}",
                self.margin_mm
            )));
        }
        if !self.stroke_width_mm.is_finite() || self.stroke_width_mm <= 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "stroke_width_mm 必须为正数：{}",
                self.stroke_width_mm
            )));
        }
        if !(1..=MAX_DASH_STEPS).contains(&self.dash_steps) {
            return Err(RenderError::InvalidConfig(format!(
                "dash_steps 必须在 1~{} 之间：{}",
                MAX_DASH_STEPS, self.dash_steps
            )));
        }
        if !(self.dash_fill > 0.0 && self.dash_fill <= 1.0) {
            return Err(RenderError::InvalidConfig(format!(
                "dash_fill 必须在 (0, 1] 之间：{}",
                self.dash_fill
            )));
        }
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "gamma 必须为正数：{}",
                self.gamma
            )));
        }
        if let Some(offset) = self
            .subpixel_offsets
            .iter()
            .find(|o| !(0.0..=1.0).contains(*o))
        {
            return Err(RenderError::InvalidConfig(format!(
                "subpixel_offsets 必须在 [0, 1] 之间：{}",
                offset
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(RenderConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let cases = [
            RenderConfig {
                target_width_mm: 0.0,
                ..RenderConfig::default()
            },
            RenderConfig {
                margin_mm: -1.0,
                ..RenderConfig::default()
            },
            RenderConfig {
                stroke_width_mm: f64::NAN,
                ..RenderConfig::default()
            },
            RenderConfig {
                dash_steps: 0,
                ..RenderConfig::default()
            },
            RenderConfig {
                dash_steps: MAX_DASH_STEPS + 1,
                ..RenderConfig::default()
            },
            RenderConfig {
                dash_steps: u32::MAX,
                ..RenderConfig::default()
            },
            RenderConfig {
                dash_fill: 1.5,
                ..RenderConfig::default()
            },
            RenderConfig {
                dash_fill: 0.0,
                ..RenderConfig::default()
            },
            RenderConfig {
                gamma: -2.0,
                ..RenderConfig::default()
            },
            RenderConfig {
                subpixel_offsets: [0.1, 0.5, 1.2],
                ..RenderConfig::default()
            },
        ];

        for config in cases {
            assert!(
                matches!(config.validate(), Err(RenderError::InvalidConfig(_))),
                "expected rejection for {:?}",
                config
            );
        }
    }

    #[test]
    fn dash_steps_upper_bound_is_inclusive() {
        let at_limit = RenderConfig {
            dash_steps: MAX_DASH_STEPS,
            ..RenderConfig::default()
        };
        assert!(at_limit.validate().is_ok());

        let above = RenderConfig {
            dash_steps: MAX_DASH_STEPS + 1,
            ..RenderConfig::default()
        };
        assert!(matches!(above.validate(), Err(RenderError::InvalidConfig(_))));
    }
}
