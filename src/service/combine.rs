use std::fs;
use std::path::Path;

use log::{debug, error, info};

use crate::converters::{document, raster};
use crate::error::Result;
use crate::models::file::SourceFile;
use crate::models::format::FileCategory;
use crate::service::traits::i_service::CombineServiceTrait;
use crate::utils::pdf::{FontFace, ParagraphStyle, Story, PAGE_HEIGHT, PAGE_WIDTH};
use crate::utils::text::escape_markup;

/// 每幾個檔案強制換頁
const ENTRIES_PER_PAGE: usize = 5;
const SEPARATOR_WIDTH: usize = 50;
/// 圖片四周各留 1 英吋
const IMAGE_INSET: f32 = 144.0;

const TITLE_STYLE: ParagraphStyle = ParagraphStyle {
    face: FontFace::Bold,
    font_size: 16.0,
    leading: 20.0,
    space_before: 10.0,
    space_after: 12.0,
};

fn body_style() -> ParagraphStyle {
    ParagraphStyle::NORMAL.with_space_after(6.0)
}

fn note_style() -> ParagraphStyle {
    body_style().with_face(FontFace::Italic)
}

pub struct CombineService;

impl CombineService {
    pub fn new() -> Self {
        CombineService
    }

    /// 組出合併文件的所有段落
    pub fn build_story(&self, files: &[SourceFile], base_dir: &Path) -> Story {
        let mut story = Story::new();
        let total = files.len();

        for (index, file) in files.iter().enumerate() {
            let position = index + 1;
            debug!("[{:3}/{}] 加入：{}", position, total, file.relative.display());

            if let Err(e) = append_entry(&mut story, file, base_dir) {
                story.paragraph(
                    &escape_markup(&format!("Error processing {}: {}", file_name(&file.path), e)),
                    note_style(),
                );
                story.spacer(12.0);
                continue;
            }

            if position % ENTRIES_PER_PAGE == 0 && position < total {
                story.page_break();
            }
        }
        story
    }
}

impl Default for CombineService {
    fn default() -> Self {
        Self::new()
    }
}

impl CombineServiceTrait for CombineService {
    fn combine(&self, files: &[SourceFile], output: &Path, base_dir: &Path) -> bool {
        info!("建立合併 PDF：{}（{} 個檔案）", output.display(), files.len());
        let story = self.build_story(files, base_dir);
        let title = output
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();

        match story.build(&title, output) {
            Ok(()) => true,
            Err(e) => {
                error!("建立合併 PDF 失敗：{}", e);
                false
            }
        }
    }
}

fn append_entry(story: &mut Story, file: &SourceFile, base_dir: &Path) -> Result<()> {
    let relative = file.path.strip_prefix(base_dir).unwrap_or(&file.relative);
    story.paragraph(&escape_markup(&relative.display().to_string()), TITLE_STYLE);
    story.spacer(6.0);

    let name = file_name(&file.path);
    match file.category {
        FileCategory::Images => {
            note(story, &format!("Image file: {}", name));
            note(story, &format!("Size: {} bytes", file_size(&file.path)?));
            match embeddable_image(&file.path) {
                Ok(image) => {
                    story.image(image);
                    story.spacer(12.0);
                }
                Err(e) => note(story, &format!("Could not embed image: {}", e)),
            }
        }
        FileCategory::Documents => match document::read_text(&file.path) {
            Ok(content) => {
                for line in content.split('\n') {
                    if line.trim().is_empty() {
                        story.spacer(6.0);
                    } else {
                        story.paragraph(&escape_markup(line), body_style());
                    }
                }
            }
            Err(e) => note(story, &format!("Could not read document: {}", e)),
        },
        FileCategory::Spreadsheets => {
            note(story, &format!("Spreadsheet file: {}", name));
            note(story, &format!("Size: {} bytes", file_size(&file.path)?));
            note(story, "Note: Spreadsheet content not fully displayed in combined PDF");
        }
        FileCategory::Presentations => {
            note(story, &format!("Presentation file: {}", name));
            note(story, &format!("Size: {} bytes", file_size(&file.path)?));
            note(story, "Note: Presentation content not fully displayed in combined PDF");
        }
        FileCategory::Pdf => {
            note(story, &format!("Existing PDF file: {}", name));
            note(story, &format!("Size: {} bytes", file_size(&file.path)?));
            note(story, "Note: PDF content not embedded in combined PDF");
        }
    }

    story.spacer(12.0);
    story.paragraph(&"-".repeat(SEPARATOR_WIDTH), body_style());
    story.spacer(12.0);
    Ok(())
}

fn embeddable_image(path: &Path) -> Result<image::DynamicImage> {
    let image = raster::load_rgb(path)?;
    Ok(raster::fit_within(
        image,
        (PAGE_WIDTH - IMAGE_INSET) as u32,
        (PAGE_HEIGHT - IMAGE_INSET) as u32,
    ))
}

fn note(story: &mut Story, text: &str) {
    story.paragraph(&escape_markup(text), note_style());
}

fn file_size(path: &Path) -> Result<u64> {
    Ok(fs::metadata(path)?.len())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}
