//! DOCX / PPTX 文字擷取。
//!
//! 兩者都是 Open XML 壓縮檔：DOCX 的內容在 `word/document.xml`，
//! PPTX 的投影片順序記在 `ppt/presentation.xml` 的 `sldIdLst`，
//! 透過 `ppt/_rels/presentation.xml.rels` 對應到各個投影片檔。只擷取純文字，不保留樣式。

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use log::{debug, warn};
use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::Result;

const DOCUMENT_XML: &str = "word/document.xml";
const PRESENTATION_XML: &str = "ppt/presentation.xml";
const PRESENTATION_RELS: &str = "ppt/_rels/presentation.xml.rels";
const SLIDE_PREFIX: &str = "ppt/slides/slide";

fn open_archive(path: &Path) -> Result<ZipArchive<BufReader<File>>> {
    let file = File::open(path)?;
    Ok(ZipArchive::new(BufReader::new(file))?)
}

fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<String> {
    let mut entry = archive.by_name(name)?;
    let mut content = String::new();
    entry.read_to_string(&mut content)?;
    Ok(content)
}

/// 讀取 DOCX 本文段落文字（不含表格、文字方塊內容）
pub fn docx_paragraphs(path: &Path) -> Result<Vec<String>> {
    let mut archive = open_archive(path)?;
    let xml = read_entry(&mut archive, DOCUMENT_XML)?;
    parse_document_xml(&xml)
}

pub fn parse_document_xml(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut buf = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut table_depth = 0usize;
    let mut paragraph_depth = 0usize;
    let mut in_run = false;
    let mut in_text = false;

    loop {
        let collecting = table_depth == 0 && paragraph_depth == 1;
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"tbl" => table_depth += 1,
                b"p" => {
                    paragraph_depth += 1;
                    if paragraph_depth == 1 {
                        current.clear();
                    }
                }
                b"r" => in_run = true,
                b"t" => in_text = true,
                _ => {}
            },
            Event::End(ref e) => match e.local_name().as_ref() {
                b"tbl" => table_depth = table_depth.saturating_sub(1),
                b"p" => {
                    if collecting {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                }
                b"r" => in_run = false,
                b"t" => in_text = false,
                _ => {}
            },
            Event::Empty(ref e) => match e.local_name().as_ref() {
                b"p" if table_depth == 0 && paragraph_depth == 0 => paragraphs.push(String::new()),
                b"tab" if collecting && in_run => current.push('\t'),
                b"br" | b"cr" if collecting && in_run => current.push('\n'),
                _ => {}
            },
            Event::Text(e) => {
                if collecting && in_text {
                    current.push_str(&e.unescape()?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

/// 一張投影片中每個含文字圖形的文字
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideText {
    pub shapes: Vec<String>,
}

/// 依簡報中的播放順序讀取所有投影片文字
pub fn pptx_slides(path: &Path) -> Result<Vec<SlideText>> {
    let mut archive = open_archive(path)?;

    let entries = match archive.index_for_name(PRESENTATION_XML) {
        Some(_) => {
            let presentation = read_entry(&mut archive, PRESENTATION_XML)?;
            let rels = read_entry(&mut archive, PRESENTATION_RELS)?;
            deck_order(&presentation, &rels)?
        }
        None => {
            debug!("{} 缺少 {}，改依檔名編號排序", path.display(), PRESENTATION_XML);
            numbered_slides(archive.file_names())
        }
    };

    let mut slides = Vec::with_capacity(entries.len());
    for name in entries {
        let xml = read_entry(&mut archive, &name)?;
        slides.push(SlideText {
            shapes: parse_slide_xml(&xml)?,
        });
    }
    Ok(slides)
}

/// `sldIdLst` 中每個 `r:id` 對應的投影片檔名，依清單順序
pub fn deck_order(presentation_xml: &str, rels_xml: &str) -> Result<Vec<String>> {
    let targets = relationship_targets(rels_xml)?;

    let mut reader = Reader::from_str(presentation_xml);
    let mut buf = Vec::new();
    let mut in_list = false;
    let mut order = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if e.local_name().as_ref() == b"sldIdLst" => in_list = true,
            Event::End(ref e) if e.local_name().as_ref() == b"sldIdLst" => in_list = false,
            Event::Start(ref e) | Event::Empty(ref e) if in_list && e.local_name().as_ref() == b"sldId" => {
                for attr in e.attributes().flatten() {
                    // 未帶前綴的 `id` 是投影片編號，關聯 id 是 `r:id`
                    if attr.key.prefix().is_some() && attr.key.local_name().as_ref() == b"id" {
                        let id = attr.decode_and_unescape_value(&reader)?;
                        match targets.iter().find(|(rel_id, _)| *rel_id == id) {
                            Some((_, target)) => order.push(resolve_target(target)),
                            None => warn!("找不到投影片關聯 {}", id),
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(order)
}

// (Id, Target) pairs from a .rels part
fn relationship_targets(rels_xml: &str) -> Result<Vec<(String, String)>> {
    let mut reader = Reader::from_str(rels_xml);
    let mut buf = Vec::new();
    let mut targets = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) if e.local_name().as_ref() == b"Relationship" => {
                let mut id = None;
                let mut target = None;
                for attr in e.attributes().flatten() {
                    match attr.key.local_name().as_ref() {
                        b"Id" => id = Some(attr.decode_and_unescape_value(&reader)?.to_string()),
                        b"Target" => target = Some(attr.decode_and_unescape_value(&reader)?.to_string()),
                        _ => {}
                    }
                }
                if let (Some(id), Some(target)) = (id, target) {
                    targets.push((id, target));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(targets)
}

// 關聯目標相對於 `ppt/`，以 `/` 開頭者相對於壓縮檔根目錄
fn resolve_target(target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }
    let mut parts: Vec<&str> = vec!["ppt"];
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    parts.join("/")
}

fn numbered_slides<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut numbered: Vec<(usize, String)> = names
        .filter_map(|name| slide_number(name).map(|number| (number, name.to_string())))
        .collect();
    numbered.sort();
    numbered.into_iter().map(|(_, name)| name).collect()
}

// "ppt/slides/slide12.xml" -> 12
fn slide_number(name: &str) -> Option<usize> {
    name.strip_prefix(SLIDE_PREFIX)?
        .strip_suffix(".xml")?
        .parse()
        .ok()
}

/// 擷取最上層圖形（不含群組內）的文字，段落以換行連接
pub fn parse_slide_xml(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut buf = Vec::new();
    let mut shapes = Vec::new();
    let mut group_depth = 0usize;
    let mut in_shape = false;
    let mut in_body = false;
    let mut in_text = false;
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"grpSp" => group_depth += 1,
                b"sp" if group_depth == 0 => {
                    in_shape = true;
                    paragraphs.clear();
                }
                b"txBody" if in_shape => in_body = true,
                b"p" if in_body => current.clear(),
                b"t" if in_body => in_text = true,
                _ => {}
            },
            Event::End(ref e) => match e.local_name().as_ref() {
                b"grpSp" => group_depth = group_depth.saturating_sub(1),
                b"sp" if in_shape => {
                    in_shape = false;
                    let text = paragraphs.join("\n");
                    if !text.is_empty() {
                        shapes.push(text);
                    }
                }
                b"txBody" => in_body = false,
                b"p" if in_body => paragraphs.push(std::mem::take(&mut current)),
                b"t" => in_text = false,
                _ => {}
            },
            Event::Empty(ref e) => match e.local_name().as_ref() {
                b"p" if in_body => paragraphs.push(String::new()),
                b"br" if in_body => current.push('\n'),
                _ => {}
            },
            Event::Text(e) => {
                if in_text {
                    current.push_str(&e.unescape()?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(shapes)
}
