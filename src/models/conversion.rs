use std::path::PathBuf;

/// 輸出目錄結構模式
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OutputLayout {
    /// 保留來源目錄結構
    Mirror,
    /// 所有 PDF 放在同一層目錄
    Flat,
}

impl OutputLayout {
    pub fn description(&self) -> &'static str {
        match self {
            OutputLayout::Mirror => "保留目錄結構",
            OutputLayout::Flat => "平面清單",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ConversionInput {
    pub source_dir: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub layout: OutputLayout,
    pub combine: bool,
}

/// 單一檔案的轉換工作：來源與目的地
#[derive(Clone, Debug, PartialEq)]
pub struct ConversionJob {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// 批次結果的分類
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchOutcome {
    NoFiles,
    AllFailed,
    Completed,
    Combined,
    CombineFailed,
}

#[derive(Clone, Debug)]
pub struct ConversionOutput {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub total_files: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub combined_path: Option<PathBuf>,
}

impl ConversionOutput {
    pub fn empty(source_dir: PathBuf, output_dir: PathBuf) -> Self {
        ConversionOutput {
            source_dir,
            output_dir,
            total_files: 0,
            succeeded: 0,
            failed: 0,
            combined_path: None,
        }
    }

    pub fn outcome(&self) -> BatchOutcome {
        if self.total_files == 0 {
            return BatchOutcome::NoFiles;
        }
        match (&self.combined_path, self.succeeded) {
            (Some(_), 0) => BatchOutcome::CombineFailed,
            (Some(_), _) => BatchOutcome::Combined,
            (None, 0) => BatchOutcome::AllFailed,
            (None, _) => BatchOutcome::Completed,
        }
    }

    /// 至少一個檔案轉換成功，或合併成功
    pub fn is_success(&self) -> bool {
        matches!(self.outcome(), BatchOutcome::Completed | BatchOutcome::Combined)
    }
}
