use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser, Clone, Debug)]
#[command(
    name = "webp2png",
    version,
    about = "將 WebP 圖片轉換為 PNG 格式",
    long_about = "將 WebP 圖片轉換為 PNG 格式的工具，可指定多個檔案或目錄。\n\n範例：\n  webp2png image.webp -o output.png\n  webp2png *.webp --output-dir ./png_output/\n  webp2png -r ./images/ --output-dir ./converted/\n\n不帶任何參數執行時進入互動模式。"
)]
pub struct Cli {
    /// WebP 檔案或目錄（可指定多個）
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
    /// 輸出檔名（僅單一檔案時有效）
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// 輸出目錄
    #[arg(short = 'd', long)]
    pub output_dir: Option<PathBuf>,
    /// 遞迴探索目錄
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,
    /// 覆寫既有檔案
    #[arg(short, long, default_value_t = false)]
    pub force: bool,
    /// 僅輸出錯誤
    #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
    pub quiet: bool,
    /// 輸出詳細日誌
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
    /// 單一檔案大小上限（MB）
    #[arg(long, default_value_t = 100.0)]
    pub max_size: f64,
    /// 不擷取 ICC 等附帶資訊
    #[arg(long, default_value_t = false)]
    pub no_metadata: bool,
}

pub fn validate_input_paths(inputs: &[PathBuf]) -> io::Result<()> {
    for input in inputs {
        validate_input_path(input)?;
    }
    Ok(())
}

pub fn validate_input_path(input: &Path) -> io::Result<&Path> {
    if !input.exists() {
        log::error!("輸入路徑不存在：{}", input.display());
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("輸入路徑 '{}' 不存在", input.display())
        ));
    }
    Ok(input)
}

/// 將 MB 上限轉為位元組
pub fn validate_max_size(max_size: f64) -> io::Result<u64> {
    if !max_size.is_finite() || max_size <= 0.0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("無效的大小上限: {}", max_size)
        ));
    }
    Ok((max_size * 1_048_576.0) as u64)
}
