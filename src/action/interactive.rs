use dialoguer::{Confirm, Input, Select};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use std::thread;

use chrono::Local;

use crate::action::cli::{describe_event, structure_mode, summary_lines};
use crate::config::ports::{AppConfig, ConfigPort, ConversionPort, ProgressPort};
use crate::models::conversion::{ConversionOutput, OutputLayout};
use crate::models::file::{FileCollectInput, FileCollectOutput};
use crate::models::progress::ProgressEvent;
use crate::service::config_service::{ConfigService, DefaultConfigAdapter};
use crate::service::conversion_service::ConversionAdapter;
use crate::service::file::{nested_output_dir, resolve_output_dir, FileService};
use crate::service::traits::i_service::FileServiceTrait;
use crate::utils::utils::{setup_logging, ProgressManager};

pub fn process_interactive_mode() -> io::Result<ConversionOutput> {
    println!("=== 歡迎使用互動模式 ===");
    let use_default_config = get_default_config_option()?;
    let input = get_input_path()?;

    let config_port: Box<dyn ConfigPort> = if use_default_config {
        println!("使用預設配置：保留目錄結構，輸出至 <目錄>/pdf");
        Box::new(DefaultConfigAdapter::new(input.clone()))
    } else {
        Box::new(InteractiveConfigAdapter::new(input.clone()))
    };
    let config = ConfigService::new(config_port).get_config()?;
    setup_logging(&config.log_level)?;

    print_preview(&preview_files(&config)?);
    println!("輸出模式：{}", structure_mode(&config));
    if !get_start_confirmation()? {
        return Err(io::Error::new(io::ErrorKind::Interrupted, "使用者取消轉換"));
    }

    let output = run_in_background(config.clone())?;
    println!();
    for line in summary_lines(&output, &config) {
        println!("{}", line);
    }
    Ok(output)
}

/// 在背景執行緒執行批次轉換，主執行緒透過通道接收進度並顯示
pub fn run_in_background(config: AppConfig) -> io::Result<ConversionOutput> {
    let (sender, receiver) = mpsc::channel();
    let worker_config = config.clone();
    let worker = thread::Builder::new()
        .name("conversion".to_string())
        .spawn(move || {
            let reporter = ChannelReporter::new(sender);
            ConversionAdapter::default().execute(worker_config, &reporter)
        })?;

    let mut progress: Option<ProgressManager> = None;
    let mut output_dir = PathBuf::new();
    // 背景執行緒結束時傳送端被釋放，迴圈隨之結束
    for event in receiver {
        if let ProgressEvent::Scanned { files, output_dir: dir } = &event {
            output_dir = dir.clone();
            if !files.is_empty() && !config.combine {
                progress = Some(ProgressManager::new(files.len() as u64, config.no_progress));
            }
        }

        for line in describe_event(&event, config.layout, config.verbose, &output_dir) {
            let line = timestamped(&line);
            match &progress {
                Some(progress) => progress.println(&line),
                None => println!("{}", line),
            }
        }
        if let (ProgressEvent::FileFinished { index, .. }, Some(progress)) = (&event, &progress) {
            progress.update(*index as u64, "轉換");
        }
    }

    let output = worker
        .join()
        .map_err(|_| io::Error::new(io::ErrorKind::Other, "轉換執行緒異常結束"))??;
    if let Some(progress) = &progress {
        progress.finish(output.succeeded, output.failed);
    }
    Ok(output)
}

fn timestamped(line: &str) -> String {
    format!("[{}] {}", Local::now().format("%H:%M:%S"), line)
}

// 將進度事件送往主執行緒
pub struct ChannelReporter {
    sender: Sender<ProgressEvent>,
}

impl ChannelReporter {
    pub fn new(sender: Sender<ProgressEvent>) -> Self {
        ChannelReporter { sender }
    }
}

impl ProgressPort for ChannelReporter {
    fn report(&self, event: &ProgressEvent) {
        // 接收端已關閉時不再回報
        let _ = self.sender.send(event.clone());
    }
}

/// 以實際執行時相同的略過規則預覽可轉換檔案
pub fn preview_files(config: &AppConfig) -> io::Result<FileCollectOutput> {
    let root = fs::canonicalize(&config.input)?;
    let output_dir = resolve_output_dir(&root, config.output.as_deref())?;
    FileService::new().collect_files(FileCollectInput {
        skip_dir: nested_output_dir(&root, &output_dir),
        root,
    })
}

fn print_preview(preview: &FileCollectOutput) {
    println!("📋 找到 {} 個可轉換檔案", preview.files.len());
    for (category, count) in preview.category_counts() {
        println!("   • {}：{} 個", category.label(), count);
    }
    if preview.skipped_unsupported > 0 {
        println!("   （略過 {} 個不支援的檔案）", preview.skipped_unsupported);
    }
}

pub fn get_default_config_option() -> io::Result<bool> {
    Confirm::new()
        .with_prompt("是否使用預設配置？（保留目錄結構、輸出至 <目錄>/pdf，僅需指定來源目錄）")
        .default(true)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("預設配置選擇失敗: {}", e)))
}

pub fn get_input_path() -> io::Result<PathBuf> {
    Input::<String>::new()
        .with_prompt("請輸入要轉換的目錄路徑（例如：./documents）")
        .validate_with(|input: &String| -> Result<(), String> {
            let path = Path::new(input);
            if !path.exists() {
                Err(format!("目錄 '{}' 不存在", input))
            } else if !path.is_dir() {
                Err(format!("'{}' 不是目錄", input))
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map(PathBuf::from)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}

pub fn get_combine_option() -> io::Result<bool> {
    Confirm::new()
        .with_prompt("是否將所有檔案合併成單一 PDF？")
        .default(false)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("合併選項輸入失敗: {}", e)))
}

pub fn get_output_layout() -> io::Result<OutputLayout> {
    let selection = Select::new()
        .with_prompt("選擇輸出結構（使用方向鍵選擇，按 Enter 確認）")
        .items(&["保留目錄結構（預設）", "平面清單 - 所有 PDF 放在同一層"])
        .default(0)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("輸出結構選擇失敗: {}", e)))?;
    Ok(if selection == 1 { OutputLayout::Flat } else { OutputLayout::Mirror })
}

pub fn get_output_path() -> io::Result<Option<PathBuf>> {
    let output = Input::<String>::new()
        .with_prompt("輸入輸出目錄（留空則使用 <目錄>/pdf）")
        .allow_empty(true)
        .default(String::new())
        .show_default(false)
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    let output = output.trim();
    Ok(if output.is_empty() { None } else { Some(PathBuf::from(output)) })
}

pub fn get_verbose_option() -> io::Result<bool> {
    Confirm::new()
        .with_prompt("是否顯示每個檔案的輸出位置？")
        .default(false)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("詳細輸出選項輸入失敗: {}", e)))
}

pub fn get_log_level_option() -> io::Result<String> {
    let levels = ["info", "warn", "error", "debug"];
    let selection = Select::new()
        .with_prompt("選擇日誌層級")
        .items(&levels)
        .default(0)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("日誌層級選擇失敗: {}", e)))?;
    Ok(levels[selection].to_string())
}

pub fn get_start_confirmation() -> io::Result<bool> {
    Confirm::new()
        .with_prompt("開始轉換？")
        .default(true)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("確認輸入失敗: {}", e)))
}

// 交互配置適配器
pub struct InteractiveConfigAdapter {
    input: PathBuf,
}

impl InteractiveConfigAdapter {
    pub fn new(input: PathBuf) -> Self {
        InteractiveConfigAdapter { input }
    }
}

impl ConfigPort for InteractiveConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        let combine = get_combine_option()?;
        // 合併模式只產生一個檔案，不需選擇結構
        let layout = if combine { OutputLayout::Mirror } else { get_output_layout()? };
        let output = get_output_path()?;
        let verbose = get_verbose_option()?;
        let log_level = get_log_level_option()?;

        Ok(AppConfig {
            input: self.input.clone(),
            output,
            layout,
            combine,
            verbose,
            no_progress: false,
            log_level,
        })
    }
}
