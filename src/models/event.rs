use log::Level;
use std::path::PathBuf;

/// 批次進度事件，依探索順序送出，每個檔案完成時一筆 FileFinished
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    Started {
        total: usize,
    },
    FileFinished {
        index: usize,
        total: usize,
        source: PathBuf,
        outcome: Result<PathBuf, String>,
    },
    Log {
        level: Level,
        message: String,
    },
    Finished {
        succeeded: usize,
        failed: usize,
    },
}
