use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::models::format::FileCategory;

#[derive(Clone, Debug)]
pub struct FileCollectInput {
    pub root: PathBuf,
    /// 不走訪的子目錄（輸出目錄位於來源目錄內時）
    pub skip_dir: Option<PathBuf>,
}

/// 走訪時找到的可轉換檔案
#[derive(Clone, Debug, PartialEq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub relative: PathBuf,
    pub category: FileCategory,
}

#[derive(Debug, Default)]
pub struct FileCollectOutput {
    pub files: Vec<SourceFile>,
    pub skipped_unsupported: usize,
}

impl FileCollectOutput {
    /// 依類別統計檔案數量
    pub fn category_counts(&self) -> BTreeMap<FileCategory, usize> {
        let mut counts = BTreeMap::new();
        for file in &self.files {
            *counts.entry(file.category).or_insert(0) += 1;
        }
        counts
    }
}
