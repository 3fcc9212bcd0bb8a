use crate::error::ConversionError;
use crate::models::conversion::{ConversionInput, ConversionOutput};
use crate::models::event::ProgressEvent;

// Facade 接口，負責協調檔案轉換流程
pub trait ConversionFacadeTrait: Send + Sync {
    /// 探索輸入檔案並逐一轉換
    /// # 參數
    /// - input: 轉換所需的輸入參數
    /// - on_progress: 每個進度事件呼叫一次
    /// # 回傳
    /// - 成功時返回批次結果；找不到任何 WebP 檔案時返回 NoInputFiles
    fn execute_conversion(
        &self,
        input: ConversionInput,
        on_progress: &mut dyn FnMut(&ProgressEvent),
    ) -> Result<ConversionOutput, ConversionError>;
}
