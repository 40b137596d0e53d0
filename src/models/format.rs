use std::fmt;
use std::path::Path;

/// 可轉換檔案的類別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileCategory {
    Images,
    Documents,
    Spreadsheets,
    Presentations,
    Pdf,
}

// 類別與副檔名對照表（全部小寫、不含點）
pub const SUPPORTED_FORMATS: &[(FileCategory, &[&str])] = &[
    (FileCategory::Images, &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp"]),
    (FileCategory::Documents, &["docx", "txt", "md"]),
    (FileCategory::Spreadsheets, &["xlsx", "xls"]),
    (FileCategory::Presentations, &["pptx"]),
    (FileCategory::Pdf, &["pdf"]),
];

impl FileCategory {
    pub fn name(&self) -> &'static str {
        match self {
            FileCategory::Images => "images",
            FileCategory::Documents => "documents",
            FileCategory::Spreadsheets => "spreadsheets",
            FileCategory::Presentations => "presentations",
            FileCategory::Pdf => "pdf",
        }
    }

    /// 顯示用名稱
    pub fn label(&self) -> &'static str {
        match self {
            FileCategory::Images => "圖片",
            FileCategory::Documents => "文件",
            FileCategory::Spreadsheets => "試算表",
            FileCategory::Presentations => "簡報",
            FileCategory::Pdf => "PDF",
        }
    }

    pub fn extensions(&self) -> &'static [&'static str] {
        SUPPORTED_FORMATS
            .iter()
            .find(|(category, _)| category == self)
            .map(|(_, extensions)| *extensions)
            .unwrap_or(&[])
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 以小寫副檔名判斷檔案類別，不支援的格式回傳 None
pub fn classify(path: &Path) -> Option<FileCategory> {
    let extension = path.extension()?.to_str()?.to_lowercase();
    SUPPORTED_FORMATS
        .iter()
        .find(|(_, extensions)| extensions.contains(&extension.as_str()))
        .map(|(category, _)| *category)
}

/// 取得小寫副檔名（不含點）
pub fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// 支援格式說明，無可轉換檔案時顯示
pub fn supported_formats_summary() -> Vec<String> {
    SUPPORTED_FORMATS
        .iter()
        .map(|(category, extensions)| {
            let list = extensions
                .iter()
                .map(|ext| ext.to_uppercase())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}：{}", category.label(), list)
        })
        .collect()
}
