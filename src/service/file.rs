use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;
use crate::models::file::{FileCollectInput, FileCollectOutput};
use crate::service::path::has_source_extension;
use crate::service::traits::i_service::{FileServiceTrait, ReporterTrait};

/// WebP 檔頭長度："RIFF" + 4 位元組長度 + "WEBP"
pub const WEBP_HEADER_LEN: usize = 12;

pub fn is_webp_header(header: &[u8]) -> bool {
    header.len() >= WEBP_HEADER_LEN && &header[0..4] == b"RIFF" && &header[8..12] == b"WEBP"
}

/// 以檔頭判定是否為 WebP，任何讀取錯誤都視為否
pub fn is_webp_file(file_path: &Path) -> bool {
    read_header(file_path)
        .map(|header| is_webp_header(&header))
        .unwrap_or(false)
}

fn read_header(file_path: &Path) -> io::Result<Vec<u8>> {
    let file = File::open(file_path)?;
    let mut header = Vec::with_capacity(WEBP_HEADER_LEN);
    file.take(WEBP_HEADER_LEN as u64).read_to_end(&mut header)?;
    Ok(header)
}

/// File 服務，負責將輸入路徑展開為 WebP 檔案列表
pub struct FileService {
    reporter: Arc<dyn ReporterTrait>,
}

impl FileService {
    pub fn new(reporter: Arc<dyn ReporterTrait>) -> Self {
        FileService { reporter }
    }

    fn collect_dir(&self, dir: &Path, recursive: bool, files: &mut BTreeSet<PathBuf>) {
        let walker = WalkDir::new(dir).min_depth(1);
        let walker = if recursive { walker } else { walker.max_depth(1) };
        for entry in walker {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    // 目錄項目的型別來自讀取目錄本身，符號連結才需要再追蹤
                    let is_file = entry.file_type().is_file()
                        || (entry.path_is_symlink() && path.is_file());
                    if is_file && has_source_extension(path) {
                        files.insert(path.to_path_buf());
                    }
                }
                Err(e) => self.reporter.warn(&format!("略過無法讀取的項目：{}", e)),
            }
        }
    }
}

impl FileServiceTrait for FileService {
    fn collect_files(&self, input: FileCollectInput) -> io::Result<FileCollectOutput> {
        let mut files = BTreeSet::new();

        for path in &input.input_paths {
            if !path.exists() {
                self.reporter.warn(&format!("路徑不存在：{}", path.display()));
                continue;
            }
            if path.is_file() {
                if has_source_extension(path) {
                    files.insert(path.clone());
                } else {
                    self.reporter.warn(&format!("不是 WebP 檔案：{}", path.display()));
                }
            } else if path.is_dir() {
                self.collect_dir(path, input.recursive, &mut files);
            }
        }

        let mut collected = Vec::with_capacity(files.len());
        let mut total_size = 0;
        for file_path in files {
            match fs::metadata(&file_path) {
                Ok(metadata) => {
                    total_size += metadata.len();
                    collected.push(file_path);
                }
                Err(e) => self.reporter.warn(&format!(
                    "無法取得檔案資訊，略過：{}（{}）",
                    file_path.display(),
                    e
                )),
            }
        }
        let files = collected;
        self.reporter.debug(&format!(
            "找到 {} 個 WebP 檔案，總大小：{} 位元組",
            files.len(),
            total_size
        ));

        Ok(FileCollectOutput { files, total_size })
    }
}
