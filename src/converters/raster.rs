//! 圖片轉 PDF。

use std::path::Path;

use image::imageops::FilterType;
use image::io::Reader as ImageReader;
use image::DynamicImage;
use log::debug;

use crate::error::Result;
use crate::utils::pdf::{DrawingSurface, PdfCanvas};

/// 單頁圖片 PDF 的解析度
pub const IMAGE_DPI: f32 = 100.0;

/// 依內容判斷格式並解碼，統一轉為 8 位元 RGB
pub fn load_rgb(path: &Path) -> Result<DynamicImage> {
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(DynamicImage::ImageRgb8(image.to_rgb8()))
}

/// 等比例縮小至指定範圍內，不放大
pub fn fit_within(image: DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    if image.width() <= max_width && image.height() <= max_height {
        return image;
    }
    image.resize(max_width, max_height, FilterType::Lanczos3)
}

/// 圖片在 100 DPI 下的頁面尺寸（pt）
pub fn page_size_for(image: &DynamicImage) -> (f32, f32) {
    let scale = 72.0 / IMAGE_DPI;
    (image.width() as f32 * scale, image.height() as f32 * scale)
}

pub fn convert(input: &Path, output: &Path) -> Result<()> {
    let image = load_rgb(input)?;
    let (width, height) = page_size_for(&image);
    debug!(
        "圖片 {}：{}x{} 像素，頁面 {:.1}x{:.1} pt",
        input.display(),
        image.width(),
        image.height(),
        width,
        height
    );

    let title = input
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    let mut canvas = PdfCanvas::new(&title, width, height)?;
    canvas.draw_image(&image, 0.0, 0.0, width, height);
    canvas.save(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_matches_image_at_100_dpi() {
        let image = DynamicImage::new_rgb8(200, 100);
        let (width, height) = page_size_for(&image);
        assert!((width - 144.0).abs() < 0.001);
        assert!((height - 72.0).abs() < 0.001);
    }

    #[test]
    fn fit_within_preserves_aspect_ratio() {
        let image = DynamicImage::new_rgb8(1000, 500);
        let fitted = fit_within(image, 400, 400);
        assert_eq!(fitted.width(), 400);
        assert_eq!(fitted.height(), 200);
    }

    #[test]
    fn fit_within_never_upscales() {
        let image = DynamicImage::new_rgb8(40, 30);
        let fitted = fit_within(image, 400, 400);
        assert_eq!((fitted.width(), fitted.height()), (40, 30));
    }
}
