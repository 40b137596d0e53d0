use std::io;
use std::path::PathBuf;
use crate::models::conversion::{ConversionOutput, OutputLayout};
use crate::models::progress::ProgressEvent;

// 應用配置結構體，封裝所有參數
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub layout: OutputLayout,
    pub combine: bool,
    pub verbose: bool,
    pub no_progress: bool,
    pub log_level: String,
}

// 配置來源的 Port
pub trait ConfigPort {
    fn get_config(&self) -> io::Result<AppConfig>;
}

// 轉換執行的 Port
pub trait ConversionPort {
    fn execute(&self, config: AppConfig, progress: &dyn ProgressPort) -> io::Result<ConversionOutput>;
}

// 進度回報的 Port，互動模式下於背景執行緒使用
pub trait ProgressPort: Send {
    fn report(&self, event: &ProgressEvent);
}

// 不回報任何進度
pub struct SilentProgress;

impl ProgressPort for SilentProgress {
    fn report(&self, _event: &ProgressEvent) {}
}
