//! データセット索引
//!
//! 画像列挙 → ダイジェスト照合 → （ヒット）スナップショット復元 /
//! （ミス）ファイル名パース → グルーピング → スナップショット保存。
//! 索引は構築後は読み取り専用で、データセット変更時は丸ごと作り直す。

pub mod cache;
pub mod thumbs;

use crate::error::{CarQuizError, Result};
use crate::models::CarRecord;
use crate::parser::parse_filename;
use crate::scanner::scan_images;
use cache::SnapshotFile;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// メモリ上のデータセット索引
///
/// by_make / by_make_model はレコード列からの純粋な射影で、
/// グループ内の並びは元の挿入順を保つ。
#[derive(Debug, Clone)]
pub struct DatasetIndex {
    records: Vec<CarRecord>,
    by_make: HashMap<String, Vec<CarRecord>>,
    by_make_model: HashMap<(String, String), Vec<CarRecord>>,
}

impl DatasetIndex {
    /// レコード列からグルーピング索引を構築する
    pub fn build(records: Vec<CarRecord>) -> Self {
        let mut by_make: HashMap<String, Vec<CarRecord>> = HashMap::new();
        let mut by_make_model: HashMap<(String, String), Vec<CarRecord>> = HashMap::new();

        for record in &records {
            by_make
                .entry(record.make.clone())
                .or_default()
                .push(record.clone());
            by_make_model
                .entry((record.make.clone(), record.model.clone()))
                .or_default()
                .push(record.clone());
        }

        Self {
            records,
            by_make,
            by_make_model,
        }
    }

    pub fn all_records(&self) -> &[CarRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// メーカー数
    pub fn make_count(&self) -> usize {
        self.by_make.len()
    }

    pub fn get_by_make(&self, make: &str) -> &[CarRecord] {
        self.by_make
            .get(make)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn get_by_make_model(&self, make: &str, model: &str) -> &[CarRecord] {
        self.by_make_model
            .get(&(make.to_string(), model.to_string()))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

/// 索引をキャッシュから復元する。無効なら構築し直して保存する
///
/// 1. 画像列挙（0枚なら `EmptyDataset`）
/// 2. ダイジェスト計算
/// 3. スナップショットが有効（version一致 && digest一致）なら復元
/// 4. ミスなら全ファイルをパース（有効レコード0件なら `NoValidRecords`）
/// 5. 新しいスナップショットを保存
pub fn load_index(data_dir: &Path, cache_dir: &Path, force_rebuild: bool) -> Result<DatasetIndex> {
    let image_paths = scan_images(data_dir)?;
    if image_paths.is_empty() {
        return Err(CarQuizError::EmptyDataset(data_dir.display().to_string()));
    }

    let digest = cache::compute_digest(&image_paths);

    if !force_rebuild {
        if let Some(snapshot) = SnapshotFile::load(cache_dir) {
            if snapshot.is_valid_for(&digest) {
                info!("キャッシュから索引を復元 ({}件)", snapshot.len());
                return Ok(DatasetIndex::build(snapshot.records));
            }
        }
    }

    info!("{}枚の画像から索引を構築", image_paths.len());
    let records: Vec<CarRecord> = image_paths
        .iter()
        .filter_map(|path| parse_filename(path))
        .collect();

    if records.is_empty() {
        return Err(CarQuizError::NoValidRecords);
    }

    let snapshot = SnapshotFile::new(digest, records);
    snapshot.save(cache_dir)?;
    info!("索引を構築してキャッシュに保存 ({}件)", snapshot.len());

    Ok(DatasetIndex::build(snapshot.records))
}
