use std::io;
use std::path::PathBuf;
use thiserror::Error;

fn mib(bytes: &u64) -> f64 {
    *bytes as f64 / 1_048_576.0
}

/// 輸入檔案驗證失敗的原因，依檢查順序排列
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputRejection {
    #[error("檔案不存在：{0}")]
    NotFound(PathBuf),

    #[error("不是一般檔案：{0}")]
    NotAFile(PathBuf),

    #[error("沒有讀取權限：{0}")]
    NotReadable(PathBuf),

    #[error("檔案為空：{0}")]
    Empty(PathBuf),

    #[error("檔案過大（{:.2} MB > {:.2} MB）：{}", mib(.size), mib(.max), .path.display())]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("不是有效的 WebP 檔案：{0}")]
    NotWebp(PathBuf),
}

/// 輸出位置驗證失敗的原因
#[derive(Error, Debug)]
pub enum OutputRejection {
    #[error("輸出目錄不是目錄：{0}")]
    NotADirectory(PathBuf),

    #[error("沒有建立目錄的權限：{0}")]
    CreateDirDenied(PathBuf),

    #[error("無法建立目錄 {path}：{source}")]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("目錄沒有寫入權限：{0}")]
    WriteDenied(PathBuf),

    #[error("無法寫入目錄 {path}：{source}")]
    NotWritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("輸出檔案已存在（使用 --force 覆寫）：{0}")]
    AlreadyExists(PathBuf),
}

/// 單一檔案轉換失敗時回傳的錯誤，訊息一律包含出問題的路徑
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("找不到任何 WebP 檔案")]
    NoInputFiles,

    #[error(transparent)]
    InvalidInput(#[from] InputRejection),

    #[error(transparent)]
    InvalidOutput(#[from] OutputRejection),

    #[error("影像格式不是 WebP（解碼器判定為 {detected}）：{path}")]
    FormatMismatch { path: PathBuf, detected: String },

    #[error("解碼 {path} 失敗：{source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("編碼 {path} 失敗：{source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("處理 {path} 時發生 IO 錯誤：{source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("轉換 {path} 時發生未預期的錯誤：{message}")]
    Unexpected { path: PathBuf, message: String },
}

impl ConversionError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ConversionError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<ConversionError> for io::Error {
    fn from(err: ConversionError) -> Self {
        let kind = match &err {
            ConversionError::NoInputFiles => io::ErrorKind::NotFound,
            ConversionError::InvalidInput(InputRejection::NotFound(_)) => io::ErrorKind::NotFound,
            ConversionError::InvalidInput(_) => io::ErrorKind::InvalidInput,
            ConversionError::InvalidOutput(OutputRejection::AlreadyExists(_)) => {
                io::ErrorKind::AlreadyExists
            }
            ConversionError::InvalidOutput(OutputRejection::CreateDirDenied(_))
            | ConversionError::InvalidOutput(OutputRejection::WriteDenied(_)) => {
                io::ErrorKind::PermissionDenied
            }
            ConversionError::Io { source, .. } => source.kind(),
            _ => io::ErrorKind::Other,
        };
        io::Error::new(kind, err)
    }
}
