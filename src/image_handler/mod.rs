//! # 图片处理模块（image_handler）
//!
//! ## 设计思路
//!
//! 该模块将"文件加载校验 → 解码 → 按宽度降采样"按职责拆分为多个子模块，
//! 对应转换流水线中的 Image Loader 与 Downscaler 两个阶段。
//!
//! - `handler`：编排加载流程 + 阶段耗时日志
//! - `loader`：文件存在性、体积与格式签名校验
//! - `pipeline`：解码、像素限制、降采样
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 调用链
//!
//! ```text
//! batch.rs
//!    ↓
//! handler.rs（load_scaled）
//!    ├─ loader.rs（读取 + 校验）
//!    └─ pipeline.rs（解码 + 降采样）
//!    ↓
//! ScaledImage → render
//! ```

mod config;
mod error;
mod handler;
mod loader;
mod pipeline;
mod source;

pub use config::{ImageConfig, ResampleProfile};
pub use error::ImageError;
pub use handler::ImageHandler;
pub use source::ScaledImage;
