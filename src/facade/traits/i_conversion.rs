use std::io;
use crate::config::ports::ProgressPort;
use crate::models::conversion::{ConversionInput, ConversionOutput};

// Facade 接口，負責協調批次轉換流程
pub trait ConversionFacadeTrait: Send + Sync {
    /// 走訪來源目錄並依輸出模式轉換或合併所有支援的檔案
    /// # 參數
    /// - input: 來源目錄、輸出目錄與輸出模式
    /// - progress: 接收每個步驟的進度事件
    /// # 回傳
    /// - 成功時返回批次統計；來源目錄不存在或輸出目錄無法建立時返回 IO 錯誤
    fn execute_conversion(&self, input: ConversionInput, progress: &dyn ProgressPort) -> io::Result<ConversionOutput>;
}
