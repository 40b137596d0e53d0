use std::io;
use std::path::PathBuf;
use crate::config::ports::{AppConfig, ConfigPort};
use crate::models::conversion::OutputLayout;

// 配置服務，負責選擇適當的配置適配器
pub struct ConfigService {
    config_port: Box<dyn ConfigPort>,
}

impl ConfigService {
    pub fn new(config_port: Box<dyn ConfigPort>) -> Self {
        ConfigService { config_port }
    }

    pub fn get_config(&self) -> io::Result<AppConfig> {
        self.config_port.get_config()
    }
}

// 預設配置適配器：保留目錄結構、不合併、輸出至 <來源目錄>/pdf
pub struct DefaultConfigAdapter {
    input: PathBuf,
}

impl DefaultConfigAdapter {
    pub fn new(input: PathBuf) -> Self {
        DefaultConfigAdapter { input }
    }
}

impl ConfigPort for DefaultConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        Ok(AppConfig {
            input: self.input.clone(),
            output: None,
            layout: OutputLayout::Mirror,
            combine: false,
            verbose: false,
            no_progress: false,
            log_level: "info".to_string(),
        })
    }
}
