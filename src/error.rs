//! 轉換器錯誤型別。
//!
//! 單一檔案轉換失敗時由各轉換器回傳，在 `RenderService` 邊界記錄並轉為失敗計數。

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("IO 錯誤: {0}")]
    Io(#[from] std::io::Error),

    #[error("圖片解碼失敗: {0}")]
    Image(#[from] image::ImageError),

    #[error("無法開啟壓縮檔: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("XML 解析錯誤: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("試算表讀取失敗: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("PDF 產生失敗: {0}")]
    Pdf(String),

    #[error("不支援的副檔名: {0}")]
    Unsupported(String),

    #[error("來源與目的地為同一檔案: {}", .0.display())]
    SameFile(PathBuf),
}

/// 將 printpdf 的錯誤轉為 `ConvertError::Pdf`
pub fn pdf_error<E: std::fmt::Debug>(e: E) -> ConvertError {
    ConvertError::Pdf(format!("{:?}", e))
}
