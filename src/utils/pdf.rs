//! PDF 繪圖層。
//!
//! `DrawingSurface` 是所有轉換器繪圖的介面：以左下角為原點、單位為 pt 的畫布，
//! 可切換內建字型、寫字、放圖片與換頁。`PdfCanvas` 以 printpdf 實作，
//! `Story` 則在畫布上做段落流式排版。

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::DynamicImage;
use log::debug;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference,
};

use crate::error::{pdf_error, Result};
use crate::utils::text::{markup_to_text, to_builtin_charset, wrap_text};

/// A4 尺寸（pt）
pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;

/// 畫布繪製：起始位置距頂端、左側 x 與換頁門檻
pub const CANVAS_TOP_OFFSET: f32 = 50.0;
pub const CANVAS_LEFT: f32 = 50.0;
pub const BOTTOM_MARGIN: f32 = 50.0;
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// 試算表與簡報每行最多字元數
pub const MAX_LINE_CHARS: usize = 80;

/// 流式排版的頁邊距
pub const STORY_MARGIN: f32 = 72.0;

const LAYER_NAME: &str = "Layer 1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Regular,
    Bold,
    Italic,
}

/// 轉換器繪圖介面
pub trait DrawingSurface {
    fn page_size(&self) -> (f32, f32);
    fn set_font(&mut self, face: FontFace, size: f32);
    fn draw_string(&mut self, x: f32, y: f32, text: &str);
    /// 以 (x, y) 為左下角，縮放至 width × height
    fn draw_image(&mut self, image: &DynamicImage, x: f32, y: f32, width: f32, height: f32);
    fn show_page(&mut self);
}

fn mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

/// printpdf 畫布，建立時即有第一頁
pub struct PdfCanvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    face: FontFace,
    font_size: f32,
    width: f32,
    height: f32,
    pages: usize,
}

impl PdfCanvas {
    pub fn a4(title: &str) -> Result<Self> {
        Self::new(title, PAGE_WIDTH, PAGE_HEIGHT)
    }

    pub fn new(title: &str, width: f32, height: f32) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, mm(width), mm(height), LAYER_NAME);
        let fonts = Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?,
            italic: doc.add_builtin_font(BuiltinFont::HelveticaOblique).map_err(pdf_error)?,
        };
        let layer = doc.get_page(page).get_layer(layer);
        Ok(PdfCanvas {
            doc,
            layer,
            fonts,
            face: FontFace::Regular,
            font_size: DEFAULT_FONT_SIZE,
            width,
            height,
            pages: 1,
        })
    }

    pub fn save(self, output: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(output)?);
        self.doc.save(&mut writer).map_err(pdf_error)?;
        debug!("寫入 PDF：{}，共 {} 頁", output.display(), self.pages);
        Ok(())
    }

    fn font(&self) -> &IndirectFontRef {
        match self.face {
            FontFace::Regular => &self.fonts.regular,
            FontFace::Bold => &self.fonts.bold,
            FontFace::Italic => &self.fonts.italic,
        }
    }
}

impl DrawingSurface for PdfCanvas {
    fn page_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn set_font(&mut self, face: FontFace, size: f32) {
        self.face = face;
        self.font_size = size;
    }

    fn draw_string(&mut self, x: f32, y: f32, text: &str) {
        let text = to_builtin_charset(text);
        if text.is_empty() {
            return;
        }
        self.layer
            .use_text(text, self.font_size, mm(x), mm(y), self.font());
    }

    fn draw_image(&mut self, image: &DynamicImage, x: f32, y: f32, width: f32, height: f32) {
        if image.width() == 0 || image.height() == 0 {
            return;
        }
        // 72 DPI 時一個像素即一個 pt
        let transform = ImageTransform {
            translate_x: Some(mm(x)),
            translate_y: Some(mm(y)),
            scale_x: Some(width / image.width() as f32),
            scale_y: Some(height / image.height() as f32),
            dpi: Some(72.0),
            ..Default::default()
        };
        Image::from_dynamic_image(image).add_to_layer(self.layer.clone(), transform);
    }

    fn show_page(&mut self) {
        let (page, layer) = self.doc.add_page(mm(self.width), mm(self.height), LAYER_NAME);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.pages += 1;
    }
}

/// 段落樣式
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParagraphStyle {
    pub face: FontFace,
    pub font_size: f32,
    pub leading: f32,
    pub space_before: f32,
    pub space_after: f32,
}

impl ParagraphStyle {
    /// 一般內文
    pub const NORMAL: ParagraphStyle = ParagraphStyle {
        face: FontFace::Regular,
        font_size: 10.0,
        leading: 12.0,
        space_before: 0.0,
        space_after: 0.0,
    };

    pub fn with_space_after(mut self, space_after: f32) -> Self {
        self.space_after = space_after;
        self
    }

    pub fn with_face(mut self, face: FontFace) -> Self {
        self.face = face;
        self
    }
}

/// 流式排版元素
pub enum Flowable {
    Paragraph { text: String, style: ParagraphStyle },
    Spacer(f32),
    PageBreak,
    Image(DynamicImage),
}

/// 依序排版的元素清單，寫出時自動分頁
#[derive(Default)]
pub struct Story {
    items: Vec<Flowable>,
}

impl Story {
    pub fn new() -> Self {
        Story { items: Vec::new() }
    }

    /// 加入段落；內容為標記文字，標籤會被移除、實體會被解碼
    pub fn paragraph(&mut self, markup: &str, style: ParagraphStyle) {
        self.items.push(Flowable::Paragraph {
            text: markup_to_text(markup),
            style,
        });
    }

    pub fn spacer(&mut self, height: f32) {
        self.items.push(Flowable::Spacer(height));
    }

    pub fn page_break(&mut self) {
        self.items.push(Flowable::PageBreak);
    }

    pub fn image(&mut self, image: DynamicImage) {
        self.items.push(Flowable::Image(image));
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// 在畫布上排版，回傳使用的頁數
    pub fn layout<S: DrawingSurface>(&self, surface: &mut S) -> usize {
        let (width, height) = surface.page_size();
        let mut frame = Frame::new(width, height);

        for item in &self.items {
            match item {
                Flowable::Paragraph { text, style } => frame.paragraph(surface, text, style),
                Flowable::Spacer(space) => frame.spacer(surface, *space),
                Flowable::PageBreak => frame.page_break(surface),
                Flowable::Image(image) => frame.image(surface, image),
            }
        }
        frame.pages
    }

    pub fn build(&self, title: &str, output: &Path) -> Result<()> {
        let mut canvas = PdfCanvas::a4(title)?;
        let pages = self.layout(&mut canvas);
        debug!("排版完成：{} 個元素，{} 頁", self.items.len(), pages);
        canvas.save(output)
    }
}

// 排版游標，追蹤目前頁面剩餘空間
struct Frame {
    left: f32,
    top: f32,
    bottom: f32,
    width: f32,
    cursor: f32,
    pages: usize,
}

impl Frame {
    fn new(page_width: f32, page_height: f32) -> Self {
        let top = page_height - STORY_MARGIN;
        Frame {
            left: STORY_MARGIN,
            top,
            bottom: STORY_MARGIN,
            width: page_width - 2.0 * STORY_MARGIN,
            cursor: top,
            pages: 1,
        }
    }

    fn at_top(&self) -> bool {
        self.cursor >= self.top
    }

    fn new_page<S: DrawingSurface>(&mut self, surface: &mut S) {
        surface.show_page();
        self.cursor = self.top;
        self.pages += 1;
    }

    fn paragraph<S: DrawingSurface>(&mut self, surface: &mut S, text: &str, style: &ParagraphStyle) {
        if !self.at_top() {
            self.cursor -= style.space_before;
        }
        surface.set_font(style.face, style.font_size);
        for line in wrap_text(text, style.font_size, self.width) {
            if self.cursor - style.leading < self.bottom && !self.at_top() {
                self.new_page(surface);
            }
            self.cursor -= style.leading;
            // 基線位於行高底部上方
            let baseline = self.cursor + (style.leading - style.font_size);
            surface.draw_string(self.left, baseline, &line);
        }
        self.cursor -= style.space_after;
    }

    fn spacer<S: DrawingSurface>(&mut self, surface: &mut S, space: f32) {
        if self.at_top() {
            return;
        }
        if self.cursor - space < self.bottom {
            self.new_page(surface);
        } else {
            self.cursor -= space;
        }
    }

    fn page_break<S: DrawingSurface>(&mut self, surface: &mut S) {
        if !self.at_top() {
            self.new_page(surface);
        }
    }

    fn image<S: DrawingSurface>(&mut self, surface: &mut S, image: &DynamicImage) {
        let (mut width, mut height) = (image.width() as f32, image.height() as f32);
        let frame_height = self.top - self.bottom;
        let scale = (self.width / width).min(frame_height / height).min(1.0);
        width *= scale;
        height *= scale;

        if self.cursor - height < self.bottom && !self.at_top() {
            self.new_page(surface);
        }
        self.cursor -= height;
        surface.draw_image(image, self.left, self.cursor, width, height);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// 記錄繪圖呼叫的畫布
    #[derive(Default)]
    pub struct RecordingSurface {
        pub strings: Vec<(usize, f32, String)>,
        pub images: Vec<(usize, f32, f32)>,
        pub page_breaks: usize,
    }

    impl DrawingSurface for RecordingSurface {
        fn page_size(&self) -> (f32, f32) {
            (PAGE_WIDTH, PAGE_HEIGHT)
        }

        fn set_font(&mut self, _face: FontFace, _size: f32) {}

        fn draw_string(&mut self, _x: f32, y: f32, text: &str) {
            self.strings.push((self.page_breaks + 1, y, text.to_string()));
        }

        fn draw_image(&mut self, _image: &DynamicImage, _x: f32, _y: f32, width: f32, height: f32) {
            self.images.push((self.page_breaks + 1, width, height));
        }

        fn show_page(&mut self) {
            self.page_breaks += 1;
        }
    }

    #[test]
    fn long_story_spills_onto_more_pages() {
        let mut story = Story::new();
        for i in 0..200 {
            story.paragraph(&format!("Line {}", i), ParagraphStyle::NORMAL);
        }
        let mut surface = RecordingSurface::default();
        let pages = story.layout(&mut surface);

        assert_eq!(surface.strings.len(), 200);
        assert_eq!(pages, surface.page_breaks + 1);
        // (841.89 - 144) / 12 行
        assert!(pages >= 4);
        for (_, y, _) in &surface.strings {
            assert!(*y >= STORY_MARGIN - 0.01);
        }
    }

    #[test]
    fn page_break_on_empty_page_is_ignored() {
        let mut story = Story::new();
        story.page_break();
        story.paragraph("first", ParagraphStyle::NORMAL);
        story.page_break();
        story.paragraph("second", ParagraphStyle::NORMAL);
        let mut surface = RecordingSurface::default();

        assert_eq!(story.layout(&mut surface), 2);
        assert_eq!(surface.strings[0].0, 1);
        assert_eq!(surface.strings[1].0, 2);
    }

    #[test]
    fn oversized_image_is_scaled_into_frame() {
        let mut story = Story::new();
        story.image(DynamicImage::new_rgb8(2000, 1000));
        let mut surface = RecordingSurface::default();
        story.layout(&mut surface);

        let (_, width, height) = surface.images[0];
        assert!((width - (PAGE_WIDTH - 2.0 * STORY_MARGIN)).abs() < 0.01);
        assert!((width / height - 2.0).abs() < 0.01);
    }

    #[test]
    fn paragraph_markup_is_flattened() {
        let mut story = Story::new();
        story.paragraph("<p>Hello <em>there</em> &amp; welcome</p>", ParagraphStyle::NORMAL);
        let mut surface = RecordingSurface::default();
        story.layout(&mut surface);

        assert_eq!(surface.strings.len(), 1);
        assert_eq!(surface.strings[0].2, "Hello there & welcome");
    }
}
