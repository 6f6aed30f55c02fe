//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载"加载 → 解码 → 降采样"链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。

/// 图片处理统一错误类型。
///
/// 该类型会在批处理层被上转为 `AppError`，最终写入 `BatchReport`。
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// 输入不是有效图片：空文件、无法识别的文件头、损坏或截断的数据。
    #[error("解码错误：{0}")]
    Decode(String),

    /// 处理参数非法（尺寸上限为 0、未知的重采样档位等），与输入文件无关。
    #[error("格式错误：{0}")]
    InvalidFormat(String),

    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),
}

