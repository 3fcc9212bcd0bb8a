use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ImageDecoder, ImageEncoder, ImageReader};
use tempfile::{Builder, NamedTempFile};
use crate::error::ConversionError;
use crate::models::decoded::DecodedImage;
use crate::service::path::parent_dir;
use crate::service::traits::i_service::ImageCodecTrait;

pub const ICC_PROFILE_KEY: &str = "icc_profile";

const STAGING_PREFIX: &str = ".webp2png_";

/// 在目的目錄建立暫存檔，權限與一般建立的檔案相同（0666 再經 umask 遮罩）
fn staging_file(dir: &Path) -> io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(STAGING_PREFIX).suffix(".png.tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    builder.tempfile_in(dir)
}

/// 以 image crate 實作的編解碼器
pub struct ImageCodec;

impl ImageCodec {
    pub fn new() -> Self {
        ImageCodec
    }
}

impl Default for ImageCodec {
    fn default() -> Self {
        ImageCodec::new()
    }
}

impl ImageCodecTrait for ImageCodec {
    fn decode(&self, source: &Path) -> Result<DecodedImage, ConversionError> {
        let file = File::open(source).map_err(|e| ConversionError::io(source, e))?;
        let reader = ImageReader::new(BufReader::new(file))
            .with_guessed_format()
            .map_err(|e| ConversionError::io(source, e))?;

        // 格式由內容判定，副檔名不參與
        let format = reader.format().ok_or_else(|| ConversionError::FormatMismatch {
            path: source.to_path_buf(),
            detected: "unknown".to_string(),
        })?;

        let mut decoder = reader.into_decoder().map_err(|e| ConversionError::Decode {
            path: source.to_path_buf(),
            source: e,
        })?;

        let mut ancillary = BTreeMap::new();
        if let Ok(Some(icc_profile)) = decoder.icc_profile() {
            ancillary.insert(ICC_PROFILE_KEY.to_string(), icc_profile);
        }

        let image = DynamicImage::from_decoder(decoder).map_err(|e| ConversionError::Decode {
            path: source.to_path_buf(),
            source: e,
        })?;

        Ok(DecodedImage {
            format,
            image,
            ancillary,
        })
    }

    fn encode(&self, image: &DynamicImage, destination: &Path) -> Result<(), ConversionError> {
        let dir = parent_dir(destination);
        let mut staged = staging_file(dir).map_err(|e| ConversionError::io(dir, e))?;

        {
            let mut writer = BufWriter::new(staged.as_file_mut());
            let encoder =
                PngEncoder::new_with_quality(&mut writer, CompressionType::Best, FilterType::Adaptive);
            encoder
                .write_image(image.as_bytes(), image.width(), image.height(), image.color().into())
                .map_err(|e| ConversionError::Encode {
                    path: destination.to_path_buf(),
                    source: e,
                })?;
            writer.flush().map_err(|e| ConversionError::io(destination, e))?;
        }

        // 編碼完成才移到目的路徑，失敗時暫存檔隨 drop 刪除
        staged
            .persist(destination)
            .map_err(|e| ConversionError::io(destination, e.error))?;
        Ok(())
    }
}
