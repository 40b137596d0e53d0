use std::io;
use std::thread;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

pub fn setup_logging(log_level: &str) -> io::Result<()> {
    let log_level_filter = match log_level {
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("日誌初始化失敗: {}", e)))
}

pub struct ProgressManager {
    pb: ProgressBar,
    no_progress: bool,
    start: Instant,
}

impl ProgressManager {
    pub fn new(total: u64, no_progress: bool) -> Self {
        let pb = if no_progress {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{msg} [{bar:40}] {pos}/{len} ETA: {eta_precise}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("##-"),
            );
            pb
        };
        ProgressManager {
            pb,
            no_progress,
            start: Instant::now(),
        }
    }

    /// 在進度條上方輸出一行，不打斷進度條
    pub fn println(&self, line: &str) {
        if self.no_progress {
            println!("{}", line);
        } else {
            self.pb.println(line);
        }
    }

    pub fn update(&self, count: u64, action: &str) {
        if self.no_progress {
            return;
        }
        let elapsed = self.start.elapsed().as_secs_f64();
        let speed = if elapsed > 0.0 { count as f64 / elapsed } else { 0.0 };
        self.pb.set_message(format!("{}：{} 檔案，速度：{:.1} 檔案/秒", action, count, speed));
        self.pb.set_position(count);
    }

    pub fn finish(&self, succeeded: usize, failed: usize) {
        if self.no_progress {
            return;
        }
        self.pb.finish_with_message(format!(
            "完成，成功 {} 個，失敗 {} 個，耗時 {:.1} 秒",
            succeeded,
            failed,
            self.start.elapsed().as_secs_f64()
        ));
    }
}

/// 在獨立執行緒上等待 Ctrl-C，收到後顯示中斷訊息並以代碼 1 結束
pub fn install_interrupt_handler() -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    thread::Builder::new()
        .name("interrupt".to_string())
        .spawn(move || {
            if runtime.block_on(tokio::signal::ctrl_c()).is_ok() {
                eprintln!("\n⚠️  使用者中斷轉換");
                std::process::exit(1);
            }
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_progress_does_not_panic() {
        let pm = ProgressManager::new(3, true);
        pm.update(1, "轉換");
        pm.finish(1, 0);
    }
}
