//! # CRT 扫描线绘图工具 — 库入口
//!
//! 把位图转换为由彩色虚线构成的 SVG，供只装有红 / 绿 / 蓝三支笔的绘图仪在黑纸上绘制。
//! 每个像素变成三条竖直的子像素条纹，条纹的墨量由对应通道的亮度决定。
//!
//! ## 架构总览
//!
//! ```text
//! ┌─────────────── image_handler ───────────────┐
//! │  loader（读取 + 校验） → pipeline（解码 + 降采样） │
//! └──────────────────────┬──────────────────────┘
//!                        ↓ ScaledImage
//! ┌──────────────────── render ─────────────────┐
//! │  channel（R/G/B 拆分） → dash（亮度 → 虚线）      │
//! └──────────────────────┬──────────────────────┘
//!                        ↓ Document
//! ┌───────────────────── svg ───────────────────┐
//! │  render_svg（三组 path） → write_svg（写盘）      │
//! └─────────────────────────────────────────────┘
//!          ↑ 由 batch 按 (输入, 输出) 顺序驱动
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError` |
//! | [`settings`] | JSON 设置文件 → 各阶段不可变配置 |
//! | [`image_handler`] | 图片加载、解码、按宽度降采样 |
//! | [`render`] | 通道拆分与虚线渲染，输出 `Document` |
//! | [`svg`] | SVG 拼装与写盘 |
//! | [`batch`] | 批量任务列表与执行报告 |

pub mod batch;
pub mod error;
pub mod image_handler;
pub mod render;
pub mod settings;
pub mod svg;
