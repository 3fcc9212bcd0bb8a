use std::path::PathBuf;
use std::sync::Arc;
use image::{ColorType, DynamicImage, ImageFormat};
use crate::error::ConversionError;
use crate::models::conversion::ConversionRequest;
use crate::service::path::{ensure_output_dir, generate_output_path, resolve_collision};
use crate::service::traits::i_service::{ImageCodecTrait, ReporterTrait};
use crate::service::validator::{validate_input_file, validate_output_path, MAX_FILE_SIZE};

/// 轉換引擎：驗證、解碼、色彩模式正規化、編碼為 PNG
pub struct ConversionService {
    codec: Box<dyn ImageCodecTrait>,
    reporter: Arc<dyn ReporterTrait>,
    max_file_size: u64,
}

impl ConversionService {
    pub fn new(codec: Box<dyn ImageCodecTrait>, reporter: Arc<dyn ReporterTrait>) -> Self {
        ConversionService {
            codec,
            reporter,
            max_file_size: MAX_FILE_SIZE,
        }
    }

    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// 將一個 WebP 檔轉為 PNG，回傳實際寫入的路徑
    pub fn convert(&self, request: &ConversionRequest) -> Result<PathBuf, ConversionError> {
        let input_path = &request.source;
        validate_input_file(input_path, self.max_file_size)?;

        let candidate = match &request.destination {
            Some(destination) => destination.clone(),
            None => generate_output_path(input_path, None),
        };

        if ensure_output_dir(&candidate).map_err(|e| ConversionError::io(&candidate, e))? {
            self.reporter
                .debug(&format!("建立輸出目錄：{}", candidate.display()));
        }

        let output_path = resolve_collision(&candidate, request.overwrite);
        if output_path != candidate {
            self.reporter
                .info(&format!("檔案已存在，改用：{}", output_path.display()));
        } else if request.overwrite && output_path.exists() {
            self.reporter
                .info(&format!("覆寫既有檔案：{}", output_path.display()));
        }

        validate_output_path(&output_path, request.overwrite)?;

        self.reporter
            .debug(&format!("開啟 WebP 檔案：{}", input_path.display()));
        let decoded = self.codec.decode(input_path)?;
        let (width, height) = decoded.dimensions();
        self.reporter.debug(&format!(
            "解碼完成：{}x{}，格式 {:?}，色彩模式 {:?}",
            width,
            height,
            decoded.format,
            decoded.color()
        ));
        if decoded.format != ImageFormat::WebP {
            return Err(ConversionError::FormatMismatch {
                path: input_path.clone(),
                detected: format!("{:?}", decoded.format),
            });
        }

        if request.preserve_metadata {
            for (key, value) in &decoded.ancillary {
                self.reporter.debug(&format!(
                    "保留附帶資訊 {}（{} 位元組），PNG 輸出不寫回",
                    key,
                    value.len()
                ));
            }
        }

        let image = if decoded.color() != ColorType::Rgba8 {
            self.reporter
                .debug(&format!("色彩模式由 {:?} 轉為 Rgba8", decoded.color()));
            DynamicImage::ImageRgba8(decoded.image.to_rgba8())
        } else {
            decoded.image
        };

        self.reporter
            .debug(&format!("寫入 PNG 檔案：{}", output_path.display()));
        self.codec.encode(&image, &output_path)?;

        self.reporter.info(&format!(
            "轉換成功：{} -> {}",
            input_path.display(),
            output_path.display()
        ));
        Ok(output_path)
    }
}
