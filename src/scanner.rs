//! 画像ファイル列挙
//!
//! データフォルダ以下の画像ファイルを再帰的に集める。
//! パースや索引構築はここでは行わない。

use crate::error::{CarQuizError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// データフォルダ以下の画像ファイルを再帰的に列挙する
pub fn scan_images(data_dir: &Path) -> Result<Vec<PathBuf>> {
    if !data_dir.exists() {
        return Err(CarQuizError::FolderNotFound(data_dir.display().to_string()));
    }

    let mut paths = Vec::new();

    for entry in WalkDir::new(data_dir).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if let Some(ext) = path.extension() {
            let ext = ext.to_string_lossy().to_lowercase();
            if IMAGE_EXTENSIONS.iter().any(|&e| e == ext) {
                paths.push(path.to_path_buf());
            }
        }
    }

    Ok(paths)
}
