//! # 渲染模块（render）
//!
//! 对应流水线中的 Channel Splitter 与 Dash Renderer 两个阶段：
//! 输入 `ScaledImage` + `RenderConfig`，输出纯数据的 `Document`。
//!
//! - `channel`：R/G/B 通道及其固定笔色
//! - `dash`：亮度 → 虚线槽位的映射
//! - `document`：光栅扫描与画布几何
//! - `config`：不可变渲染配置

mod channel;
mod config;
mod dash;
mod document;

pub use channel::Channel;
pub use config::RenderConfig;
pub use dash::{DashPattern, DashSegment, gamma_map};
pub use document::{Document, render_document};

/// 渲染阶段错误。
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("渲染配置错误：{0}")]
    InvalidConfig(String),

    #[error("图像尺寸为 0，无法渲染")]
    EmptyImage,
}
