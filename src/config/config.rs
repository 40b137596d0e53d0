use clap::Parser;
use std::io;
use std::path::Path;

#[derive(Parser, Clone, Debug)]
#[command(
    name = "file_to_pdf",
    version,
    about = "將目錄中的文件、圖片、試算表與簡報批次轉換為 PDF",
    long_about = "一個批次轉換 PDF 的工具，會遞迴走訪指定目錄，將支援的檔案逐一轉為 PDF。\n預設保留原始目錄結構並輸出至 <目錄>/pdf；--flat 將所有 PDF 放在同一層；--combine 將所有檔案合併成單一 PDF。\n不帶任何參數執行時進入互動模式。",
    after_help = "範例：\n  file_to_pdf ./documents\n  file_to_pdf ./documents --flat\n  file_to_pdf ./documents --output ./pdfs\n  file_to_pdf ./documents --flat --verbose\n  file_to_pdf ./documents --combine\n\n支援格式：\n  • 圖片：JPG、PNG、GIF、BMP、TIFF、WebP\n  • 文件：DOCX、TXT、Markdown\n  • 試算表：XLSX、XLS\n  • 簡報：PPTX\n  • PDF：直接複製"
)]
pub struct Cli {
    /// 要轉換的來源目錄
    pub directory: String,
    /// 所有 PDF 輸出在同一層目錄（預設保留目錄結構）
    #[arg(long, default_value_t = false)]
    pub flat: bool,
    /// 輸出目錄（預設為 <來源目錄>/pdf）
    #[arg(short, long)]
    pub output: Option<String>,
    /// 列出找到的檔案與輸出位置
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
    /// 將所有檔案合併成單一 PDF
    #[arg(short, long, default_value_t = false)]
    pub combine: bool,
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
    #[arg(long, default_value = "info", value_parser = ["info", "warn", "error", "debug"])]
    pub log_level: String,
}

pub fn validate_input_path(input: &str) -> io::Result<&Path> {
    let path = Path::new(input);
    if !path.exists() {
        log::error!("輸入路徑不存在：{}", input);
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("目錄 '{}' 不存在", input)
        ));
    }
    if !path.is_dir() {
        log::error!("輸入路徑不是目錄：{}", input);
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("'{}' 不是目錄", input)
        ));
    }
    Ok(path)
}
