use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const SOURCE_EXTENSION: &str = "webp";
pub const TARGET_EXTENSION: &str = "png";

/// 副檔名是否為 webp（不分大小寫）
pub fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION))
}

/// 由輸入檔產生輸出路徑；未指定輸出目錄時放在輸入檔旁邊
pub fn generate_output_path(input_path: &Path, output_dir: Option<&Path>) -> PathBuf {
    match output_dir {
        Some(dir) => {
            let mut file_name = input_path
                .file_stem()
                .map(|stem| stem.to_os_string())
                .unwrap_or_else(|| OsString::from("output"));
            file_name.push(".");
            file_name.push(TARGET_EXTENSION);
            dir.join(file_name)
        }
        None => input_path.with_extension(TARGET_EXTENSION),
    }
}

/// 路徑的上層目錄；相對檔名的上層視為目前目錄
pub fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// 確保輸出目錄存在，回傳是否新建了目錄
pub fn ensure_output_dir(output_path: &Path) -> io::Result<bool> {
    let dir = parent_dir(output_path);
    if dir.exists() {
        return Ok(false);
    }
    fs::create_dir_all(dir)?;
    Ok(true)
}

/// 處理檔名衝突
///
/// 目的檔不存在或允許覆寫時原樣回傳；否則在副檔名前加上 `_1`、`_2`…
/// 直到找到未使用的名稱。
pub fn resolve_collision(output_path: &Path, overwrite: bool) -> PathBuf {
    if !output_path.exists() || overwrite {
        return output_path.to_path_buf();
    }

    let stem = output_path.file_stem().unwrap_or_default();
    let extension = output_path.extension();

    let mut counter: u64 = 1;
    loop {
        let mut file_name = stem.to_os_string();
        file_name.push(format!("_{}", counter));
        if let Some(ext) = extension {
            file_name.push(".");
            file_name.push(ext);
        }
        let candidate = output_path.with_file_name(file_name);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}
