use std::path::Path;

use log::{debug, error};

use crate::converters::{copy, document, presentation, raster, spreadsheet};
use crate::error::Result;
use crate::models::conversion::ConversionJob;
use crate::models::format::FileCategory;
use crate::service::traits::i_service::RenderServiceTrait;

/// 依類別選擇轉換器
pub fn render(category: FileCategory, input: &Path, output: &Path) -> Result<()> {
    match category {
        FileCategory::Images => raster::convert(input, output),
        FileCategory::Documents => document::convert(input, output),
        FileCategory::Spreadsheets => spreadsheet::convert(input, output),
        FileCategory::Presentations => presentation::convert(input, output),
        FileCategory::Pdf => copy::convert(input, output),
    }
}

pub struct RenderService;

impl RenderService {
    pub fn new() -> Self {
        RenderService
    }
}

impl Default for RenderService {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderServiceTrait for RenderService {
    fn convert_file(&self, category: FileCategory, job: &ConversionJob) -> bool {
        debug!(
            "轉換 {}（{}）→ {}",
            job.source.display(),
            category,
            job.destination.display()
        );
        match render(category, &job.source, &job.destination) {
            Ok(()) => true,
            Err(e) => {
                error!("轉換 {} 失敗：{}", job.source.display(), e);
                false
            }
        }
    }
}
