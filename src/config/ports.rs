use std::io;
use std::path::PathBuf;

// 應用配置結構體，封裝所有參數
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub inputs: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub recursive: bool,
    pub force: bool,
    pub preserve_metadata: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub no_progress: bool,
    /// 位元組
    pub max_file_size: u64,
}

// 配置來源的 Port
pub trait ConfigPort {
    fn get_config(&self) -> io::Result<AppConfig>;
}
