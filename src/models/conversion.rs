use std::path::{Path, PathBuf};

/// 單一檔案的轉換請求，建立後不再變動
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub source: PathBuf,
    pub destination: Option<PathBuf>,
    pub overwrite: bool,
    pub preserve_metadata: bool,
}

impl ConversionRequest {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        ConversionRequest {
            source: source.into(),
            destination: None,
            overwrite: false,
            preserve_metadata: true,
        }
    }

    pub fn with_destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn preserve_metadata(mut self, preserve_metadata: bool) -> Self {
        self.preserve_metadata = preserve_metadata;
        self
    }
}

/// 批次轉換共用的選項
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub output_dir: Option<PathBuf>,
    pub overwrite: bool,
    pub preserve_metadata: bool,
}

impl BatchOptions {
    /// 依批次選項為單一來源建立請求
    pub fn request_for(&self, source: &Path) -> ConversionRequest {
        let destination = self
            .output_dir
            .as_deref()
            .map(|dir| crate::service::path::generate_output_path(source, Some(dir)));
        ConversionRequest {
            source: source.to_path_buf(),
            destination,
            overwrite: self.overwrite,
            preserve_metadata: self.preserve_metadata,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub source: PathBuf,
    pub outcome: Result<PathBuf, String>,
}

impl BatchEntry {
    pub fn destination(&self) -> Option<&Path> {
        self.outcome.as_ref().ok().map(PathBuf::as_path)
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// 批次結果：依探索順序記錄每個來源檔案的轉換結果
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    entries: Vec<BatchEntry>,
}

impl BatchReport {
    pub fn new() -> Self {
        BatchReport::default()
    }

    pub fn push(&mut self, source: PathBuf, outcome: Result<PathBuf, String>) {
        self.entries.push(BatchEntry { source, outcome });
    }

    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    pub fn get(&self, source: &Path) -> Option<&BatchEntry> {
        self.entries.iter().find(|entry| entry.source == source)
    }

    pub fn failures(&self) -> impl Iterator<Item = &BatchEntry> {
        self.entries.iter().filter(|entry| !entry.is_success())
    }

    pub fn succeeded(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.entries.len() - self.succeeded()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ConversionInput {
    pub inputs: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub recursive: bool,
    pub force: bool,
    pub preserve_metadata: bool,
}

impl From<&crate::config::ports::AppConfig> for ConversionInput {
    fn from(config: &crate::config::ports::AppConfig) -> Self {
        ConversionInput {
            inputs: config.inputs.clone(),
            output: config.output.clone(),
            output_dir: config.output_dir.clone(),
            recursive: config.recursive,
            force: config.force,
            preserve_metadata: config.preserve_metadata,
        }
    }
}

#[derive(Debug)]
pub struct ConversionOutput {
    pub report: BatchReport,
    /// 以 --output 指定單一輸出檔時為 true
    pub single: bool,
}
