//! データセットダイジェストとスナップショット永続化
//!
//! データセット全体のfingerprint（パス+mtime+サイズ）をSHA-256で計算し、
//! パース済みレコードを単一のJSONスナップショットとしてキャッシュする。
//! ファイル単位ではなくデータセット丸ごとのキャッシュなので、どこか1枚でも
//! 追加・削除・変更されれば全体が無効になる。
//! バージョン不一致・ダイジェスト不一致・破損はすべてミス扱い（再構築）。

use crate::error::Result;
use crate::models::CarRecord;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::warn;

const CACHE_FILE_NAME: &str = "index.json";

/// スナップショットのスキーマバージョン
pub const SNAPSHOT_VERSION: u32 = 1;

/// データセット全体のダイジェストを計算する
///
/// パスを辞書順にソートしてから `path:mtime_ns:size` を順に流し込むため、
/// 列挙順に依存しない。statに失敗したパス（列挙後に消えた等）は読み飛ばす。
pub fn compute_digest(paths: &[PathBuf]) -> String {
    let mut sorted: Vec<&PathBuf> = paths.iter().collect();
    sorted.sort();

    let mut hasher = Sha256::new();
    for path in sorted {
        let meta = match std::fs::metadata(path) {
            Ok(m) => m,
            Err(_) => continue,
        };
        let mtime_ns = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let entry = format!("{}:{}:{}", path.display(), mtime_ns, meta.len());
        hasher.update(entry.as_bytes());
    }

    hex::encode(hasher.finalize())
}

/// 永続化するスナップショット
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub version: u32,
    pub digest: String,
    pub records: Vec<CarRecord>,
}

impl SnapshotFile {
    pub fn new(digest: String, records: Vec<CarRecord>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            digest,
            records,
        }
    }

    pub fn cache_path(cache_dir: &Path) -> PathBuf {
        cache_dir.join(CACHE_FILE_NAME)
    }

    /// スナップショットを読み込む。存在しない・壊れている場合はNone
    pub fn load(cache_dir: &Path) -> Option<Self> {
        let path = Self::cache_path(cache_dir);
        if !path.exists() {
            return None;
        }

        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) => {
                warn!("キャッシュを開けません {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("キャッシュが壊れています、再構築します {}: {}", path.display(), e);
                None
            }
        }
    }

    /// 現在のデータセットに対して有効なスナップショットか
    pub fn is_valid_for(&self, digest: &str) -> bool {
        self.version == SNAPSHOT_VERSION && self.digest == digest && !self.records.is_empty()
    }

    /// スナップショットを保存する（ファイル丸ごと置き換え）
    pub fn save(&self, cache_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(cache_dir)?;
        let file = File::create(Self::cache_path(cache_dir))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// スナップショットを削除する。存在しなかった場合はfalse
    pub fn clear(cache_dir: &Path) -> Result<bool> {
        let path = Self::cache_path(cache_dir);
        if path.exists() {
            std::fs::remove_file(path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_digest_order_independent() {
        let dir = tempdir().expect("Failed to create temp dir");
        let a = dir.path().join("a.jpg");
        let b = dir.path().join("b.jpg");
        std::fs::write(&a, b"aaa").unwrap();
        std::fs::write(&b, b"bbbb").unwrap();

        let d1 = compute_digest(&[a.clone(), b.clone()]);
        let d2 = compute_digest(&[b, a]);
        assert_eq!(d1, d2);
    }

    #[test]
    fn test_digest_sensitive_to_size() {
        let dir = tempdir().expect("Failed to create temp dir");
        let a = dir.path().join("a.jpg");
        std::fs::write(&a, b"aaa").unwrap();
        let before = compute_digest(&[a.clone()]);

        std::fs::write(&a, b"aaaa").unwrap();
        let after = compute_digest(&[a]);
        assert_ne!(before, after);
    }

    #[test]
    fn test_digest_skips_vanished_paths() {
        let dir = tempdir().expect("Failed to create temp dir");
        let a = dir.path().join("a.jpg");
        std::fs::write(&a, b"aaa").unwrap();

        let only_a = compute_digest(&[a.clone()]);
        let with_ghost = compute_digest(&[a, dir.path().join("gone.jpg")]);
        assert_eq!(only_a, with_ghost);
    }

    #[test]
    fn test_load_missing_returns_none() {
        let dir = tempdir().expect("Failed to create temp dir");
        assert!(SnapshotFile::load(dir.path()).is_none());
    }

    #[test]
    fn test_load_corrupted_returns_none() {
        let dir = tempdir().expect("Failed to create temp dir");
        std::fs::write(SnapshotFile::cache_path(dir.path()), "{ invalid json }").unwrap();
        assert!(SnapshotFile::load(dir.path()).is_none());
    }

    #[test]
    fn test_is_valid_for_checks_version_and_digest() {
        let snapshot = SnapshotFile {
            version: SNAPSHOT_VERSION,
            digest: "abc".to_string(),
            records: vec![],
        };
        // レコードが空のスナップショットは無効
        assert!(!snapshot.is_valid_for("abc"));

        let mut snapshot = snapshot;
        snapshot.records.push(crate::models::CarRecord {
            id: "x".into(),
            path: "x.jpg".into(),
            make: "Ford".into(),
            model: "Focus".into(),
            year: 2012,
            random_id: "a1b2".into(),
            specs: Default::default(),
        });
        assert!(snapshot.is_valid_for("abc"));
        assert!(!snapshot.is_valid_for("def"));

        snapshot.version = 2;
        assert!(!snapshot.is_valid_for("abc"));
    }
}
