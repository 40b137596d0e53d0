//! PPTX 轉 PDF：封面加上每張投影片一頁的文字。

use std::path::Path;

use log::debug;

use crate::converters::office::{pptx_slides, SlideText};
use crate::error::Result;
use crate::utils::pdf::{
    DrawingSurface, PdfCanvas, BOTTOM_MARGIN, CANVAS_LEFT, CANVAS_TOP_OFFSET, MAX_LINE_CHARS,
};
use crate::utils::text::truncate_chars;

const LINE_HEIGHT: f32 = 20.0;

pub fn layout_presentation<S: DrawingSurface>(surface: &mut S, file_name: &str, slides: &[SlideText]) {
    let (_, height) = surface.page_size();
    let top = height - CANVAS_TOP_OFFSET;

    surface.draw_string(CANVAS_LEFT, top, &format!("PowerPoint: {}", file_name));

    // 依播放順序編號
    for (index, slide) in slides.iter().enumerate() {
        surface.show_page();
        surface.draw_string(CANVAS_LEFT, top, &format!("Slide {}", index + 1));
        let mut y = top - 30.0;

        for line in slide.shapes.iter().flat_map(|text| text.split('\n')) {
            if y < BOTTOM_MARGIN {
                surface.show_page();
                y = top;
            }
            surface.draw_string(CANVAS_LEFT, y, &truncate_chars(line, MAX_LINE_CHARS));
            y -= LINE_HEIGHT;
        }
    }
}

pub fn convert(input: &Path, output: &Path) -> Result<()> {
    let slides = pptx_slides(input)?;
    debug!("簡報 {}：{} 張投影片", input.display(), slides.len());

    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    let mut canvas = PdfCanvas::a4(&file_name)?;
    layout_presentation(&mut canvas, &file_name, &slides);
    canvas.save(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::pdf::tests::RecordingSurface;

    #[test]
    fn cover_then_one_page_per_slide() {
        let slides = vec![
            SlideText {
                shapes: vec!["Title".to_string(), "a\nb".to_string()],
            },
            SlideText { shapes: Vec::new() },
        ];
        let mut surface = RecordingSurface::default();
        layout_presentation(&mut surface, "deck.pptx", &slides);

        assert_eq!(surface.page_breaks, 2);
        let texts: Vec<(usize, &str)> = surface
            .strings
            .iter()
            .map(|(page, _, text)| (*page, text.as_str()))
            .collect();
        assert_eq!(
            texts,
            vec![
                (1, "PowerPoint: deck.pptx"),
                (2, "Slide 1"),
                (2, "Title"),
                (2, "a"),
                (2, "b"),
                (3, "Slide 2"),
            ]
        );
    }

    #[test]
    fn long_slide_overflows() {
        let text = (0..50).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");
        let slides = vec![SlideText { shapes: vec![text] }];
        let mut surface = RecordingSurface::default();
        layout_presentation(&mut surface, "deck.pptx", &slides);

        assert_eq!(surface.page_breaks, 2);
        assert_eq!(surface.strings.len(), 52);
        assert!(surface.strings.iter().all(|(_, y, _)| *y >= BOTTOM_MARGIN));
    }
}
