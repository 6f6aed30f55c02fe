//! # 虚线生成模块
//!
//! ## 设计思路
//!
//! 单个通道的亮度决定该像素条纹的"墨量"：条纹被均分为 `dash_steps` 个槽位，
//! 其中 `round(亮度 × 槽位数)` 个槽位画线，其余留空。
//!
//! ## 实现思路
//!
//! - 亮度为 0 或点亮槽位数为 0：不产生任何几何。
//! - 全部槽位点亮：输出一条贯穿 `y0..y1` 的实线，没有间隙。
//! - 其余情况用误差累积把点亮槽位均匀撒开，每个槽位内画一段居中的短线，
//!   长度为 `slot × dash_fill`。

use super::Channel;

/// 一段竖直墨线，位于某一扫描行的像素条纹内，坐标单位为毫米。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashSegment {
    pub channel: Channel,
    pub x: f64,
    pub y_start: f64,
    pub y_end: f64,
}

impl DashSegment {
    pub fn length(&self) -> f64 {
        self.y_end - self.y_start
    }
}

/// 通道值（0..=255）经伽马映射后的亮度（0..=1）。
pub fn gamma_map(value: u8, gamma: f64) -> f64 {
    let v = f64::from(value) / 255.0;
    if gamma != 1.0 { v.powf(gamma) } else { v }
}

/// 虚线样式：槽位数与每槽墨线占比。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashPattern {
    pub steps: u32,
    pub fill: f64,
}

impl DashPattern {
    pub fn new(steps: u32, fill: f64) -> Self {
        Self {
            steps: steps.max(1),
            fill,
        }
    }

    /// 给定亮度应点亮的槽位数（四舍六入五成双，与整体取整规则保持一致）。
    pub fn on_slots(&self, intensity: f64) -> u32 {
        if intensity <= 0.0 {
            return 0;
        }
        let on = (intensity * f64::from(self.steps)).round_ties_even();
        on.clamp(0.0, f64::from(self.steps)) as u32
    }

    /// 把 `[y0, y1]` 上一条条纹的虚线追加到 `out`。
    pub fn render_into(
        &self,
        out: &mut Vec<DashSegment>,
        channel: Channel,
        x: f64,
        y0: f64,
        y1: f64,
        intensity: f64,
    ) {
        let on = self.on_slots(intensity);
        if on == 0 {
            return;
        }

        if on >= self.steps {
            out.push(DashSegment {
                channel,
                x,
                y_start: y0,
                y_end: y1,
            });
            return;
        }

        let slot = (y1 - y0) / f64::from(self.steps);
        let dash_len = slot * self.fill;
        let steps = u64::from(self.steps);
        let mut err = 0u64;
        for i in 0..self.steps {
            err += u64::from(on);
            if err >= steps {
                err -= steps;
                let y_start = y0 + f64::from(i) * slot + (slot - dash_len) * 0.5;
                out.push(DashSegment {
                    channel,
                    x,
                    y_start,
                    y_end: y_start + dash_len,
                });
            }
        }
    }

    /// `render_into` 的便捷版本，返回新分配的线段列表。
    pub fn segments(
        &self,
        channel: Channel,
        x: f64,
        y0: f64,
        y1: f64,
        intensity: f64,
    ) -> Vec<DashSegment> {
        let mut out = Vec::new();
        self.render_into(&mut out, channel, x, y0, y1, intensity);
        out
    }
}
