use std::io;
use std::path::Path;
use crate::models::conversion::ConversionJob;
use crate::models::file::{FileCollectInput, FileCollectOutput, SourceFile};
use crate::models::format::FileCategory;

// File 服務接口，負責走訪來源目錄並篩選可轉換檔案
pub trait FileServiceTrait: Send + Sync {
    /// 收集所有支援格式的檔案
    /// # 參數
    /// - input: 來源根目錄與要略過的子目錄
    /// # 回傳
    /// - 成功時返回依檔名排序的檔案列表，根目錄無法讀取時返回 IO 錯誤
    fn collect_files(&self, input: FileCollectInput) -> io::Result<FileCollectOutput>;
}

// Render 服務接口，負責單一檔案轉 PDF
pub trait RenderServiceTrait: Send + Sync {
    /// 依類別轉換單一檔案
    /// # 回傳
    /// - 成功寫出 PDF 時返回 true；失敗會記錄錯誤並返回 false
    fn convert_file(&self, category: FileCategory, job: &ConversionJob) -> bool;
}

// Combine 服務接口，負責將多個檔案合併成單一 PDF
pub trait CombineServiceTrait: Send + Sync {
    /// 依序將檔案寫入同一份 PDF，每個檔案前加上相對路徑標題
    /// # 參數
    /// - files: 要合併的檔案
    /// - output: 合併後的 PDF 路徑
    /// - base_dir: 計算標題相對路徑的基準目錄
    /// # 回傳
    /// - 只有在產生或寫出 PDF 失敗時返回 false
    fn combine(&self, files: &[SourceFile], output: &Path, base_dir: &Path) -> bool;
}
