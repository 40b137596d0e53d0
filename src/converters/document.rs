//! DOCX / TXT / Markdown 轉 PDF，以段落流式排版輸出。

use std::fs;
use std::path::Path;

use log::debug;
use pulldown_cmark::{html, Parser};

use crate::converters::office::docx_paragraphs;
use crate::error::{ConvertError, Result};
use crate::models::format::lowercase_extension;
use crate::utils::pdf::{DrawingSurface, ParagraphStyle, PdfCanvas, Story};

/// 段落之間與空白行的間距
const PARAGRAPH_SPACING: f32 = 12.0;

pub fn convert(input: &Path, output: &Path) -> Result<()> {
    match lowercase_extension(input).as_deref() {
        Some("docx") => convert_docx(input, output),
        Some("txt") => convert_txt(input, output),
        Some("md") => convert_markdown(input, output),
        other => Err(ConvertError::Unsupported(other.unwrap_or_default().to_string())),
    }
}

/// 讀取文件的純文字內容：TXT/MD 為原文，DOCX 為段落以換行連接
pub fn read_text(input: &Path) -> Result<String> {
    match lowercase_extension(input).as_deref() {
        Some("docx") => Ok(docx_paragraphs(input)?.join("\n")),
        Some("txt") | Some("md") => Ok(fs::read_to_string(input)?),
        other => Err(ConvertError::Unsupported(other.unwrap_or_default().to_string())),
    }
}

/// Markdown 轉 HTML
pub fn markdown_to_html(markdown: &str) -> String {
    let mut output = String::new();
    html::push_html(&mut output, Parser::new(markdown));
    output
}

pub fn docx_story(paragraphs: &[String]) -> Story {
    let mut story = Story::new();
    for paragraph in paragraphs.iter().filter(|p| !p.trim().is_empty()) {
        story.paragraph(paragraph, ParagraphStyle::NORMAL);
        story.spacer(PARAGRAPH_SPACING);
    }
    story
}

/// 每個非空白行一段，空白行轉為間距；沒有任何文字時回傳 None
pub fn text_story(content: &str) -> Option<Story> {
    if content.lines().all(|line| line.trim().is_empty()) {
        return None;
    }
    let mut story = Story::new();
    for line in content.split('\n') {
        if line.trim().is_empty() {
            story.spacer(PARAGRAPH_SPACING);
        } else {
            story.paragraph(line, ParagraphStyle::NORMAL);
        }
    }
    Some(story)
}

/// 整份 HTML 作為單一段落
pub fn markdown_story(markdown: &str) -> Story {
    let mut story = Story::new();
    story.paragraph(&markdown_to_html(markdown), ParagraphStyle::NORMAL);
    story
}

fn convert_docx(input: &Path, output: &Path) -> Result<()> {
    let paragraphs = docx_paragraphs(input)?;
    let story = docx_story(&paragraphs);
    debug!("DOCX {}：{} 個段落", input.display(), paragraphs.len());
    if story.is_empty() {
        write_empty_notice(input, output)
    } else {
        story.build(&file_name(input), output)
    }
}

fn convert_txt(input: &Path, output: &Path) -> Result<()> {
    let content = fs::read_to_string(input)?;
    match text_story(&content) {
        Some(story) => story.build(&file_name(input), output),
        None => write_empty_notice(input, output),
    }
}

fn convert_markdown(input: &Path, output: &Path) -> Result<()> {
    let markdown = fs::read_to_string(input)?;
    markdown_story(&markdown).build(&file_name(input), output)
}

/// 沒有內容時輸出單頁說明
fn write_empty_notice(input: &Path, output: &Path) -> Result<()> {
    let name = file_name(input);
    let mut canvas = PdfCanvas::a4(&name)?;
    canvas.draw_string(100.0, 750.0, &format!("Converted from: {}", name));
    canvas.draw_string(100.0, 730.0, "No readable content found");
    canvas.save(output)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}
