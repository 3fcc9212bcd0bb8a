use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use rand::distr::Alphanumeric;
use rand::Rng;

/// 依 quiet / verbose 設定日誌層級；重複呼叫時保留第一次的設定
pub fn setup_logging(quiet: bool, verbose: bool) -> io::Result<()> {
    let log_level_filter = if quiet {
        log::LevelFilter::Error
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let result = env_logger::Builder::new()
        .filter_level(log_level_filter)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {} - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.target(),
                record.level(),
                record.args()
            )
        })
        .try_init();
    if result.is_err() {
        log::debug!("日誌已初始化，沿用既有設定");
    }
    Ok(())
}

pub struct ProgressManager {
    pb: ProgressBar,
    hidden: bool,
    start: Instant,
}

impl ProgressManager {
    pub fn new(total: u64, hidden: bool) -> Self {
        let pb = if hidden {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(total);
            let style = ProgressStyle::default_bar()
                .template("{msg} [{bar:40}] {pos}/{len} ETA: {eta_precise}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("##-");
            pb.set_style(style);
            pb
        };
        ProgressManager {
            pb,
            hidden,
            start: Instant::now(),
        }
    }

    pub fn set_total(&self, total: u64) {
        self.pb.set_length(total);
    }

    pub fn update(&self, count: u64, file_path: &Path) {
        if self.hidden {
            return;
        }
        let elapsed = self.start.elapsed().as_secs_f64();
        let speed = if elapsed > 0.0 { count as f64 / elapsed } else { 0.0 };
        self.pb.set_message(format!(
            "轉換中：{}，速度：{:.1} 檔案/秒",
            file_path.file_name().unwrap_or_default().to_string_lossy(),
            speed
        ));
        self.pb.set_position(count);
    }

    pub fn finish(&self, succeeded: usize, failed: usize) {
        if self.hidden {
            return;
        }
        self.pb.finish_with_message(format!(
            "完成，成功 {} 個，失敗 {} 個",
            succeeded, failed
        ));
    }
}

pub fn create_progress_bar(total: u64, hidden: bool) -> ProgressManager {
    ProgressManager::new(total, hidden)
}

pub fn random_suffix(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

pub fn format_file_size(size: u64) -> String {
    if size < 1024 * 1024 {
        format!("{:.2} KB", size as f64 / 1024.0)
    } else {
        format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
    }
}
