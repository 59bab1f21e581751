//! サムネイル生成
//!
//! UI層へ渡す表示用画像を用意する。生成に失敗した場合は
//! 元画像パスへフォールバックする（致命的エラーにはしない）。

use crate::error::{CarQuizError, Result};
use crate::models::CarRecord;
use image::ImageReader;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::warn;

const THUMBNAIL_EXT: &str = "jpg";
const JPEG_QUALITY: u8 = 90;

pub const DEFAULT_THUMBNAIL_SIZE: u32 = 512;

/// 表示用サムネイルのパスを返す。未生成なら生成する
pub fn ensure_thumbnail(record: &CarRecord, thumb_dir: &Path, size: u32) -> PathBuf {
    let thumb_path = thumb_dir.join(format!("{}.{}", record.id, THUMBNAIL_EXT));
    if thumb_path.exists() {
        return thumb_path;
    }

    match generate(&record.path, &thumb_path, size) {
        Ok(()) => thumb_path,
        Err(e) => {
            warn!("サムネイル生成に失敗 {}: {}", record.path.display(), e);
            record.path.clone()
        }
    }
}

fn generate(source: &Path, thumb_path: &Path, size: u32) -> Result<()> {
    if let Some(parent) = thumb_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let img = ImageReader::open(source)?
        .decode()
        .map_err(|e| CarQuizError::ImageLoad(format!("{}: {}", source.display(), e)))?;

    let thumb = img.thumbnail(size, size).into_rgb8();

    let file = File::create(thumb_path)?;
    let mut writer = BufWriter::new(file);
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
    thumb
        .write_with_encoder(encoder)
        .map_err(|e| CarQuizError::ImageLoad(format!("{}: {}", thumb_path.display(), e)))?;

    Ok(())
}
