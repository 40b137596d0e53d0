use std::io;
use log::info;
use crate::config::ports::{AppConfig, ConversionPort, ProgressPort};
use crate::facade::conversion_facade::ConversionFacade;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::{ConversionInput, ConversionOutput};

// 轉換適配器，將配置交給 Facade 執行
pub struct ConversionAdapter {
    facade: Box<dyn ConversionFacadeTrait>,
}

impl ConversionAdapter {
    pub fn new(facade: Box<dyn ConversionFacadeTrait>) -> Self {
        ConversionAdapter { facade }
    }
}

impl Default for ConversionAdapter {
    fn default() -> Self {
        ConversionAdapter::new(Box::new(ConversionFacade::default()))
    }
}

impl ConversionPort for ConversionAdapter {
    fn execute(&self, config: AppConfig, progress: &dyn ProgressPort) -> io::Result<ConversionOutput> {
        let input = ConversionInput {
            source_dir: config.input.clone(),
            output_dir: config.output.clone(),
            layout: config.layout,
            combine: config.combine,
        };
        if config.combine {
            info!("開始合併轉換：{}", input.source_dir.display());
        } else {
            info!("開始批次轉換（{}）：{}", config.layout.description(), input.source_dir.display());
        }
        self.facade.execute_conversion(input, progress)
    }
}
