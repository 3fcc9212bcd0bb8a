use image::ImageFormat;
use std::path::PathBuf;

/// 已通過輸入驗證的來源檔案；格式由檔頭判定，不採信副檔名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub size: u64,
    pub format: ImageFormat,
}

#[derive(Clone)]
pub struct FileCollectInput {
    pub input_paths: Vec<PathBuf>,
    pub recursive: bool,
}

#[derive(Debug)]
pub struct FileCollectOutput {
    pub files: Vec<PathBuf>,
    pub total_size: u64,
}
