//! アプリ設定
//!
//! データフォルダ・キャッシュ位置・クイズのデフォルト値を
//! `~/.config/car-quiz/config.json` に永続化する。

use crate::error::{CarQuizError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
    pub thumb_dir: Option<PathBuf>,
    pub total_questions: usize,
    pub duration_seconds: u64,
    pub choice_count: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            cache_dir: None,
            thumb_dir: None,
            total_questions: 10,
            duration_seconds: 600,
            choice_count: 10,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CarQuizError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("car-quiz").join("config.json"))
    }

    /// キャッシュディレクトリ（未設定ならOSのキャッシュ領域）
    ///
    /// 別のデータセットに切り替えるとダイジェスト不一致で再構築されるだけで、
    /// 誤ったヒットにはならない。
    pub fn cache_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.cache_dir {
            return Ok(dir.clone());
        }
        let base = dirs::cache_dir()
            .ok_or_else(|| CarQuizError::Config("キャッシュディレクトリが見つかりません".into()))?;
        Ok(base.join("car-quiz"))
    }

    /// サムネイル出力先（未設定ならキャッシュ配下）
    ///
    /// データフォルダ配下には置かない。生成したjpgがスキャン対象に
    /// 混ざるとダイジェストが毎回変わってしまう。
    pub fn thumb_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.thumb_dir {
            return Ok(dir.clone());
        }
        Ok(self.cache_dir()?.join("thumbs"))
    }

    pub fn resolve_cache_dir(&self, override_dir: Option<&Path>) -> Result<PathBuf> {
        match override_dir {
            Some(dir) => Ok(dir.to_path_buf()),
            None => self.cache_dir(),
        }
    }
}
