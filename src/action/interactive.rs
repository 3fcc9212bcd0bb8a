use dialoguer::{Confirm, Input};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc;
use std::sync::Arc;

use crate::action::cli::print_summary;
use crate::config::ports::{AppConfig, ConfigPort};
use crate::facade::conversion_facade::{spawn_conversion, ConversionFacade};
use crate::models::conversion::ConversionInput;
use crate::models::event::ProgressEvent;
use crate::service::config_service::{ConfigService, DefaultConfigAdapter};
use crate::service::reporter::ChannelReporter;
use crate::service::traits::i_service::ReporterTrait;
use crate::service::validator::MAX_FILE_SIZE;
use crate::utils::utils::{create_progress_bar, setup_logging};

pub fn process_interactive_mode() -> io::Result<ExitCode> {
    println!("=== WebP 轉 PNG 互動模式 ===");
    let inputs = get_input_paths()?;
    let output_dir = get_output_dir()?;
    let use_default_config = get_default_config_option()?;

    let config_port: Box<dyn ConfigPort> = if use_default_config {
        println!("使用預設配置：不遞迴、不覆寫既有檔案");
        Box::new(DefaultConfigAdapter::new(inputs, output_dir))
    } else {
        Box::new(InteractiveConfigAdapter::new(inputs, output_dir))
    };
    let config = ConfigService::new(config_port).get_config()?;
    setup_logging(config.quiet, config.verbose)?;

    run_in_background(&config)
}

/// 轉換在背景執行緒進行，前景只從通道接收事件並更新進度
fn run_in_background(config: &AppConfig) -> io::Result<ExitCode> {
    let (sender, receiver) = mpsc::channel();
    let reporter: Arc<dyn ReporterTrait> = Arc::new(ChannelReporter::new(sender.clone()));
    let facade = ConversionFacade::with_defaults(reporter, config.max_file_size);
    let handle = spawn_conversion(facade, ConversionInput::from(config), sender);

    let pb = create_progress_bar(0, config.no_progress);
    for event in receiver {
        match event {
            ProgressEvent::Started { total } => pb.set_total(total as u64),
            // 失敗原因已由 ChannelReporter 以日誌事件送出
            ProgressEvent::FileFinished { index, source, .. } => pb.update(index as u64 + 1, &source),
            ProgressEvent::Log { level, message } => log::log!(target: "webp2png", level, "{}", message),
            ProgressEvent::Finished { succeeded, failed } => pb.finish(succeeded, failed),
        }
    }

    let output = handle
        .join()
        .map_err(|_| io::Error::new(io::ErrorKind::Other, "轉換執行緒異常結束"))??;
    Ok(print_summary(&output, config.quiet))
}

pub fn get_input_paths() -> io::Result<Vec<PathBuf>> {
    let raw: String = Input::new()
        .with_prompt("請輸入 WebP 檔案或目錄路徑，多個以逗號分隔（例如：./a.webp,./images）")
        .validate_with(|input: &String| -> Result<(), String> {
            let paths = split_paths(input);
            if paths.is_empty() {
                return Err("至少需要一個路徑".to_string());
            }
            match paths.iter().find(|p| !p.exists()) {
                Some(missing) => Err(format!("路徑 '{}' 不存在", missing.display())),
                None => Ok(()),
            }
        })
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    Ok(split_paths(&raw))
}

pub fn get_output_dir() -> io::Result<Option<PathBuf>> {
    let raw: String = Input::new()
        .with_prompt("輸入輸出目錄（留空則輸出到來源檔旁邊）")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    let trimmed = raw.trim();
    Ok(if trimmed.is_empty() { None } else { Some(Path::new(trimmed).to_path_buf()) })
}

pub fn get_default_config_option() -> io::Result<bool> {
    Confirm::new()
        .with_prompt("是否使用預設配置？（不遞迴、不覆寫、一般日誌）")
        .default(true)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("預設配置選擇失敗: {}", e)))
}

fn confirm(prompt: &str, default: bool) -> io::Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("選項輸入失敗: {}", e)))
}

pub fn split_paths(raw: &str) -> Vec<PathBuf> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

// 交互配置適配器
pub struct InteractiveConfigAdapter {
    inputs: Vec<PathBuf>,
    output_dir: Option<PathBuf>,
}

impl InteractiveConfigAdapter {
    pub fn new(inputs: Vec<PathBuf>, output_dir: Option<PathBuf>) -> Self {
        InteractiveConfigAdapter { inputs, output_dir }
    }
}

impl ConfigPort for InteractiveConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        let recursive = confirm("是否遞迴探索目錄？", false)?;
        let force = confirm("是否覆寫既有檔案？", false)?;
        let verbose = confirm("是否輸出詳細日誌？", false)?;

        Ok(AppConfig {
            inputs: self.inputs.clone(),
            output: None,
            output_dir: self.output_dir.clone(),
            recursive,
            force,
            preserve_metadata: true,
            quiet: false,
            verbose,
            no_progress: false,
            max_file_size: MAX_FILE_SIZE,
        })
    }
}
