use std::io;
use std::path::PathBuf;
use crate::config::ports::{AppConfig, ConfigPort};
use crate::service::validator::MAX_FILE_SIZE;

// 配置服務，負責選擇適當的配置適配器
pub struct ConfigService {
    config_port: Box<dyn ConfigPort>,
}

impl ConfigService {
    pub fn new(config_port: Box<dyn ConfigPort>) -> Self {
        ConfigService { config_port }
    }

    pub fn get_config(&self) -> io::Result<AppConfig> {
        self.config_port.get_config()
    }
}

// 預設配置適配器：輸出到來源旁、不遞迴、不覆寫
pub struct DefaultConfigAdapter {
    inputs: Vec<PathBuf>,
    output_dir: Option<PathBuf>,
}

impl DefaultConfigAdapter {
    pub fn new(inputs: Vec<PathBuf>, output_dir: Option<PathBuf>) -> Self {
        DefaultConfigAdapter { inputs, output_dir }
    }
}

impl ConfigPort for DefaultConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        Ok(AppConfig {
            inputs: self.inputs.clone(),
            output: None,
            output_dir: self.output_dir.clone(),
            recursive: false,
            force: false,
            preserve_metadata: true,
            quiet: false,
            verbose: false,
            no_progress: false,
            max_file_size: MAX_FILE_SIZE,
        })
    }
}
