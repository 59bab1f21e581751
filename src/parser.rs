//! ファイル名パーサー
//!
//! データセットのファイル名（`_`区切りトークン）をCarRecordへ変換する。
//! スキーマに合わないファイルはスキップする（debugログのみ、エラーにしない）。

use crate::models::CarRecord;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// ファイル名に位置エンコードされる16個のスペックキー（定義順）
pub const SPEC_KEYS: [&str; 16] = [
    "make",
    "model",
    "year",
    "msrp",
    "front_wheel_size_in",
    "sae_net_hp_rpm",
    "displacement",
    "engine_type",
    "width_in",
    "height_in",
    "length_in",
    "gas_mileage",
    "drivetrain",
    "passenger_capacity",
    "passenger_doors",
    "body_style",
];

/// スペックキー16個 + ランダムサフィックス1個
pub const TOKEN_COUNT: usize = SPEC_KEYS.len() + 1;

/// ファイル名をCarRecordへパースする
///
/// スキーマ: stemを`_`で分割し、先頭16トークンをSPEC_KEYSへ位置で対応付け、
/// 17個目をランダムサフィックスとして扱う。トークン不足・年式が整数でない
/// 場合はNoneを返す。メーカー名・モデル名の内容は検証しない（未知の文字列も
/// 正当なデータセット内容として通す）。
pub fn parse_filename(path: &Path) -> Option<CarRecord> {
    let stem = path.file_stem()?.to_string_lossy();
    let parts: Vec<&str> = stem.split('_').collect();

    if parts.len() < TOKEN_COUNT {
        debug!(
            "スキップ {}: トークン数不足 ({} / {})",
            path.display(),
            parts.len(),
            TOKEN_COUNT
        );
        return None;
    }

    let year: i32 = match parts[2].parse() {
        Ok(y) => y,
        Err(_) => {
            debug!("スキップ {}: 年式が整数ではない '{}'", path.display(), parts[2]);
            return None;
        }
    };

    let mut specs = BTreeMap::new();
    for (key, value) in SPEC_KEYS.iter().zip(parts.iter()) {
        specs.insert((*key).to_string(), (*value).to_string());
    }

    Some(CarRecord {
        id: stem.to_string(),
        path: path.to_path_buf(),
        make: parts[0].to_string(),
        model: parts[1].to_string(),
        year,
        random_id: parts[SPEC_KEYS.len()].to_string(),
        specs,
    })
}
