//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义全局统一的 `AppError` 枚举，各阶段的模块级错误通过 `From` 上转，
//! 批处理层与 CLI 只需要面对这一种错误类型。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `ImageError` / `RenderError` 提供 `From` 转换，无需手动 map。
//! - 写盘失败单独成为 `Write` 分支并携带路径，便于批处理报告定位。

use std::path::PathBuf;

use crate::image_handler::ImageError;
use crate::render::RenderError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 图片加载 / 解码 / 降采样错误
    #[error("{0}")]
    Image(#[from] ImageError),

    /// 渲染阶段错误
    #[error("{0}")]
    Render(#[from] RenderError),

    /// 输出文件写入失败
    #[error("写入 SVG 失败（{}）: {message}", .path.display())]
    Write { path: PathBuf, message: String },

    /// 配置文件或命令行参数错误
    #[error("配置错误: {0}")]
    Config(String),
}

impl AppError {
    /// 是否属于输入加载 / 解码阶段的错误。
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Image(_))
    }

    pub fn is_write(&self) -> bool {
        matches!(self, Self::Write { .. })
    }
}

