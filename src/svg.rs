//! SVG 拼装与写盘模块
//!
//! # 设计思路
//!
//! 把 `Document` 序列化为单个 SVG 文本：可选的黑色背景矩形在最底层，
//! 其后依次是 `red` / `green` / `blue` 三个分组，每组一条合并的 `<path>`。
//! SVG 按纯文本处理，不引入 DOM。
//!
//! # 实现思路
//!
//! - viewBox 以毫米为单位，坐标保留 4 位小数，输出完全确定。
//! - 三个分组始终输出；某通道没有线段时分组内不写 `<path>`。
//! - 写盘时自动创建父目录，失败统一映射为 `AppError::Write`。

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::AppError;
use crate::render::{Channel, Document};

/// XML 文本转义。
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// 把文档序列化为 SVG 字符串。
pub fn render_svg(doc: &Document) -> String {
    let (view_width, view_height) = doc.view_box();
    let mut lines: Vec<String> = Vec::with_capacity(16);

    lines.push(r#"<?xml version="1.0" encoding="UTF-8"?>"#.to_string());
    lines.push(format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.3}mm" height="{:.3}mm" viewBox="0 0 {:.6} {:.6}">"#,
        doc.width_mm, doc.height_mm, view_width, view_height
    ));
    lines.push(format!("<title>{} CRT raster RGB</title>", escape(&doc.title)));

    if doc.background {
        lines.push(format!(
            r#"<rect x="0" y="0" width="{:.6}" height="{:.6}" fill="black"/>"#,
            view_width, view_height
        ));
    }

    let common = format!(
        r#"fill="none" stroke-linecap="round" stroke-width="{:.3}""#,
        doc.stroke_width_units()
    );

    for channel in Channel::ALL {
        lines.push(format!(
            r#"<g id="{}" {} stroke="{}">"#,
            channel.id(),
            common,
            channel.stroke()
        ));
        let segments = doc.segments(channel);
        if !segments.is_empty() {
            lines.push(format!(r#"  <path d="{}"/>"#, path_data(doc, channel)));
        }
        lines.push("</g>".to_string());
    }

    lines.push("</svg>".to_string());
    lines.join("\n")
}

/// 单个通道的 path `d` 属性：每段一个 `M x y L x y`。
fn path_data(doc: &Document, channel: Channel) -> String {
    let segments = doc.segments(channel);
    let mut d = String::with_capacity(segments.len() * 40);
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            d.push(' ');
        }
        // 写入 String 不会失败
        let _ = write!(
            d,
            "M {:.4} {:.4} L {:.4} {:.4}",
            segment.x, segment.y_start, segment.x, segment.y_end
        );
    }
    d
}

/// 写出 SVG 文本，必要时创建父目录。
pub fn write_svg(path: &Path, contents: &str) -> Result<(), AppError> {
    let to_write_error = |e: std::io::Error| AppError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(to_write_error)?;
        }
    }

    fs::write(path, contents).map_err(to_write_error)?;
    log::debug!("💾 已写入 SVG - {} ({} bytes)", path.display(), contents.len());
    Ok(())
}
