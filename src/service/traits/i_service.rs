use std::io;
use std::path::Path;
use image::DynamicImage;
use log::Level;
use crate::error::ConversionError;
use crate::models::file::{FileCollectInput, FileCollectOutput};
use crate::models::decoded::DecodedImage;

// File 服務接口，負責探索輸入檔案
pub trait FileServiceTrait: Send + Sync {
    /// 收集符合條件的 WebP 檔案
    /// # 參數
    /// - input: 輸入路徑清單與是否遞迴探索
    /// # 回傳
    /// - 去除重複並排序後的檔案列表和總大小，失敗時返回 IO 錯誤
    fn collect_files(&self, input: FileCollectInput) -> io::Result<FileCollectOutput>;
}

// 影像編解碼接口，轉換引擎只依賴此契約
pub trait ImageCodecTrait: Send + Sync {
    /// 解碼來源檔案
    /// # 回傳
    /// - 解碼器判定的格式、像素資料與附帶資訊
    fn decode(&self, source: &Path) -> Result<DecodedImage, ConversionError>;

    /// 以 PNG 格式寫出影像，僅在編碼成功後才會出現在目的路徑
    fn encode(&self, image: &DynamicImage, destination: &Path) -> Result<(), ConversionError>;
}

// 訊息回報接口，取代全域日誌設定，由呼叫端注入
pub trait ReporterTrait: Send + Sync {
    fn report(&self, level: Level, message: &str);

    fn debug(&self, message: &str) {
        self.report(Level::Debug, message);
    }

    fn info(&self, message: &str) {
        self.report(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.report(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.report(Level::Error, message);
    }
}
