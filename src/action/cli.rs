use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use clap::Parser;
use pathdiff::diff_paths;
use crate::action::interactive::process_interactive_mode;
use crate::config::config::{validate_input_path, Cli};
use crate::config::ports::{AppConfig, ConfigPort, ConversionPort, ProgressPort};
use crate::models::conversion::{BatchOutcome, ConversionOutput, OutputLayout};
use crate::models::format::supported_formats_summary;
use crate::models::progress::ProgressEvent;
use crate::service::config_service::{ConfigService, DefaultConfigAdapter};
use crate::service::conversion_service::ConversionAdapter;
use crate::utils::utils::{setup_logging, ProgressManager};

pub fn process_args(args: Vec<String>) -> io::Result<ConversionOutput> {
    if args.len() == 1 {
        process_interactive_mode()
    } else {
        process_cli_mode()
    }
}

pub fn process_cli_mode() -> io::Result<ConversionOutput> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level)?;

    // 僅提供來源目錄時使用預設配置
    let is_default_config = !cli.flat
        && cli.output.is_none()
        && !cli.verbose
        && !cli.combine
        && !cli.no_progress;

    let config_port: Box<dyn ConfigPort> = if is_default_config {
        validate_input_path(&cli.directory)?;
        log::info!("未提供選項參數，使用預設配置：保留目錄結構，輸出至 <目錄>/pdf");
        Box::new(DefaultConfigAdapter::new(PathBuf::from(&cli.directory)))
    } else {
        Box::new(CliConfigAdapter::new(cli.clone()))
    };

    let config_service = ConfigService::new(config_port);
    let config = config_service.get_config()?;

    print_header(&config);
    let reporter = ConsoleReporter::new(&config);
    let conversion_port: Box<dyn ConversionPort> = Box::new(ConversionAdapter::default());
    let output = conversion_port.execute(config.clone(), &reporter)?;
    reporter.finish(&output);

    print_summary(&output, &config);
    Ok(output)
}

// CLI 配置適配器
pub struct CliConfigAdapter {
    cli: Cli,
}

impl CliConfigAdapter {
    pub fn new(cli: Cli) -> Self {
        CliConfigAdapter { cli }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        validate_input_path(&self.cli.directory)?;

        if self.cli.combine && self.cli.flat {
            log::warn!("--combine 會輸出單一 PDF，忽略 --flat");
        }

        Ok(AppConfig {
            input: PathBuf::from(&self.cli.directory),
            output: self.cli.output.as_ref().map(PathBuf::from),
            layout: if self.cli.flat { OutputLayout::Flat } else { OutputLayout::Mirror },
            combine: self.cli.combine,
            verbose: self.cli.verbose,
            no_progress: self.cli.no_progress,
            log_level: self.cli.log_level.clone(),
        })
    }
}

/// 輸出模式的顯示名稱
pub fn structure_mode(config: &AppConfig) -> &'static str {
    if config.combine {
        "合併為單一 PDF"
    } else {
        config.layout.description()
    }
}

fn print_header(config: &AppConfig) {
    println!("🔄 PDF 轉換器 - 命令列");
    println!("📁 來源目錄：{}", config.input.display());
    match &config.output {
        Some(output) => println!("💾 輸出目錄：{}", output.display()),
        None => println!("💾 輸出目錄：{}", Path::new(&config.input).join("pdf").display()),
    }
    println!("🏗️  輸出模式：{}", structure_mode(config));
    println!();
}

/// 將進度事件轉為要顯示的文字行
pub fn describe_event(event: &ProgressEvent, layout: OutputLayout, verbose: bool, output_dir: &Path) -> Vec<String> {
    match event {
        ProgressEvent::Scanned { files, .. } => {
            let mut lines = vec![format!("📋 找到 {} 個可轉換檔案", files.len())];
            if verbose {
                lines.extend(files.iter().map(|file| format!("   • {}", file.display())));
            } else if !files.is_empty() {
                lines.push("   使用 --verbose 顯示檔案清單".to_string());
            }
            lines
        }
        ProgressEvent::FileStarted { .. } => Vec::new(),
        ProgressEvent::FileFinished { index, total, relative, destination, success } => {
            let prefix = format!("[{:3}/{}] 轉換：{}", index, total, relative.display());
            if !success {
                return vec![format!("{} ❌", prefix)];
            }
            match (layout, destination) {
                (OutputLayout::Flat, Some(destination)) => {
                    let name = destination.file_name().unwrap_or_default().to_string_lossy();
                    vec![format!("{} ✅ → {}", prefix, name)]
                }
                (OutputLayout::Mirror, Some(destination)) if verbose => {
                    let shown = diff_paths(destination, output_dir).unwrap_or_else(|| destination.clone());
                    vec![format!("{} ✅", prefix), format!("           → {}", shown.display())]
                }
                _ => vec![format!("{} ✅", prefix)],
            }
        }
        ProgressEvent::Combining { total, destination } => vec![
            format!("📄 合併 {} 個檔案為單一 PDF...", total),
            format!("📄 輸出檔案：{}", destination.display()),
        ],
        ProgressEvent::Combined { success: true, .. } => vec!["✅ 合併 PDF 建立成功！".to_string()],
        ProgressEvent::Combined { success: false, .. } => vec!["❌ 合併 PDF 建立失敗".to_string()],
    }
}

/// 結束時的統計摘要
pub fn summary_lines(output: &ConversionOutput, config: &AppConfig) -> Vec<String> {
    match output.outcome() {
        BatchOutcome::NoFiles => {
            let mut lines = vec!["❌ 目錄中沒有支援的檔案".to_string(), String::new(), "支援格式：".to_string()];
            lines.extend(supported_formats_summary().into_iter().map(|line| format!("• {}", line)));
            lines
        }
        BatchOutcome::Combined => vec![format!(
            "📁 合併 PDF 已儲存至：{}",
            output.combined_path.as_deref().unwrap_or(output.output_dir.as_path()).display()
        )],
        BatchOutcome::CombineFailed => vec!["💔 無法建立合併 PDF".to_string()],
        outcome => {
            let mut lines = vec![
                "📊 轉換摘要：".to_string(),
                format!("   ✅ 成功：{}", output.succeeded),
                format!("   ❌ 失敗：{}", output.failed),
                format!("   📁 PDF 儲存於：{}", output.output_dir.display()),
                format!("   🏗️  結構：{}", structure_mode(config)),
                String::new(),
            ];
            if outcome == BatchOutcome::Completed {
                lines.push("🎉 轉換完成！".to_string());
            } else {
                lines.push("💔 沒有任何檔案轉換成功".to_string());
            }
            lines
        }
    }
}

fn print_summary(output: &ConversionOutput, config: &AppConfig) {
    println!();
    for line in summary_lines(output, config) {
        println!("{}", line);
    }
}

// 終端機進度回報：進度條加上逐檔結果
pub struct ConsoleReporter {
    layout: OutputLayout,
    combine: bool,
    verbose: bool,
    no_progress: bool,
    state: Mutex<ReporterState>,
}

#[derive(Default)]
struct ReporterState {
    progress: Option<ProgressManager>,
    output_dir: PathBuf,
}

impl ConsoleReporter {
    pub fn new(config: &AppConfig) -> Self {
        ConsoleReporter {
            layout: config.layout,
            combine: config.combine,
            verbose: config.verbose,
            no_progress: config.no_progress,
            state: Mutex::new(ReporterState::default()),
        }
    }

    pub fn finish(&self, output: &ConversionOutput) {
        if let Ok(state) = self.state.lock() {
            if let Some(progress) = &state.progress {
                progress.finish(output.succeeded, output.failed);
            }
        }
    }
}

impl ProgressPort for ConsoleReporter {
    fn report(&self, event: &ProgressEvent) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        match event {
            ProgressEvent::Scanned { files, output_dir } => {
                state.output_dir = output_dir.clone();
                // 合併模式只有一個步驟，不顯示進度條
                if !files.is_empty() && !self.combine {
                    state.progress = Some(ProgressManager::new(files.len() as u64, self.no_progress));
                }
            }
            _ => {}
        }

        let lines = describe_event(event, self.layout, self.verbose, &state.output_dir);
        for line in &lines {
            match &state.progress {
                Some(progress) => progress.println(line),
                None => println!("{}", line),
            }
        }
        if let (ProgressEvent::FileFinished { index, .. }, Some(progress)) = (event, &state.progress) {
            progress.update(*index as u64, "轉換");
        }
    }
}
