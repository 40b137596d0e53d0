use std::path::PathBuf;

/// 批次處理過程中回報給前端的事件
#[derive(Clone, Debug, PartialEq)]
pub enum ProgressEvent {
    /// 走訪完成，列出所有可轉換檔案（相對路徑）
    Scanned {
        files: Vec<PathBuf>,
        output_dir: PathBuf,
    },
    FileStarted {
        index: usize,
        total: usize,
        relative: PathBuf,
    },
    FileFinished {
        index: usize,
        total: usize,
        relative: PathBuf,
        destination: Option<PathBuf>,
        success: bool,
    },
    Combining {
        total: usize,
        destination: PathBuf,
    },
    Combined {
        destination: PathBuf,
        success: bool,
    },
}
