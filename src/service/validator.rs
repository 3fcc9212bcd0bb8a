use std::fs::{self, File};
use std::io;
use std::path::Path;
use image::ImageFormat;
use crate::error::{InputRejection, OutputRejection};
use crate::models::file::SourceFile;
use crate::service::file::is_webp_file;
use crate::service::path::parent_dir;
use crate::utils::utils::random_suffix;

/// 預設的檔案大小上限（100 MiB）
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

const WRITE_TEST_PREFIX: &str = ".webp2png_write_test_";

/// 驗證輸入檔案
///
/// 依序檢查：存在、一般檔案、讀取權限、非空、大小上限、WebP 檔頭。
/// 遇到第一個失敗即回傳，不修改檔案系統。
pub fn validate_input_file(file_path: &Path, max_size: u64) -> Result<SourceFile, InputRejection> {
    if !file_path.exists() {
        return Err(InputRejection::NotFound(file_path.to_path_buf()));
    }

    let metadata = fs::metadata(file_path)
        .map_err(|_| InputRejection::NotFound(file_path.to_path_buf()))?;
    if !metadata.is_file() {
        return Err(InputRejection::NotAFile(file_path.to_path_buf()));
    }

    if !is_readable(file_path) {
        return Err(InputRejection::NotReadable(file_path.to_path_buf()));
    }

    let size = metadata.len();
    if size == 0 {
        return Err(InputRejection::Empty(file_path.to_path_buf()));
    }
    if size > max_size {
        return Err(InputRejection::TooLarge {
            path: file_path.to_path_buf(),
            size,
            max: max_size,
        });
    }

    if !is_webp_file(file_path) {
        return Err(InputRejection::NotWebp(file_path.to_path_buf()));
    }

    Ok(SourceFile {
        path: file_path.to_path_buf(),
        size,
        format: ImageFormat::WebP,
    })
}

#[cfg(unix)]
fn is_readable(file_path: &Path) -> bool {
    rustix::fs::access(file_path, rustix::fs::Access::READ_OK).is_ok()
}

#[cfg(not(unix))]
fn is_readable(file_path: &Path) -> bool {
    File::open(file_path).is_ok()
}

/// 驗證輸出路徑
///
/// 上層目錄不存在時會遞迴建立，接著以隱藏的測試檔確認可寫入，
/// 最後在不允許覆寫時拒絕已存在的目的檔。
pub fn validate_output_path(output_path: &Path, overwrite: bool) -> Result<(), OutputRejection> {
    let output_dir = parent_dir(output_path);

    match fs::metadata(output_dir) {
        Ok(metadata) if !metadata.is_dir() => {
            return Err(OutputRejection::NotADirectory(output_dir.to_path_buf()));
        }
        Ok(_) => {}
        Err(_) => fs::create_dir_all(output_dir).map_err(|e| match e.kind() {
            io::ErrorKind::PermissionDenied => {
                OutputRejection::CreateDirDenied(output_dir.to_path_buf())
            }
            _ => OutputRejection::CreateDirFailed {
                path: output_dir.to_path_buf(),
                source: e,
            },
        })?,
    }

    probe_writable(output_dir)?;

    if output_path.exists() && !overwrite {
        return Err(OutputRejection::AlreadyExists(output_path.to_path_buf()));
    }

    Ok(())
}

fn probe_writable(dir: &Path) -> Result<(), OutputRejection> {
    let to_rejection = |e: io::Error| match e.kind() {
        io::ErrorKind::PermissionDenied => OutputRejection::WriteDenied(dir.to_path_buf()),
        _ => OutputRejection::NotWritable {
            path: dir.to_path_buf(),
            source: e,
        },
    };

    let test_file = dir.join(format!("{}{}", WRITE_TEST_PREFIX, random_suffix(8)));
    File::create(&test_file).map_err(to_rejection)?;
    fs::remove_file(&test_file).map_err(to_rejection)?;
    Ok(())
}
