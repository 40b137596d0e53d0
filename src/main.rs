use std::process::ExitCode;

use file_to_pdf::action::cli::process_args;
use file_to_pdf::utils::utils::install_interrupt_handler;

fn main() -> ExitCode {
    if let Err(e) = install_interrupt_handler() {
        eprintln!("無法註冊中斷處理：{}", e);
    }

    let args: Vec<String> = std::env::args().collect();
    match process_args(args) {
        Ok(output) => {
            log::info!("程式執行完成，輸出目錄：{}", output.output_dir.display());
            if output.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("❌ 錯誤：{}", e);
            ExitCode::FAILURE
        }
    }
}
