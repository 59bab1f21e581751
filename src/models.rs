//! クイズドメインの型定義
//!
//! データセットレコード・出題・採点結果・セッション状態など、
//! エンジン全体で共有する値型をまとめる。

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::time::Instant;

/// クイズモード（出題の粒度）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizMode {
    /// メーカーのみ
    Make,
    /// メーカー + モデル
    MakeModel,
    /// メーカー + モデル + 年式
    #[default]
    MakeModelYear,
}

impl QuizMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            QuizMode::Make => "Make Only",
            QuizMode::MakeModel => "Make + Model",
            QuizMode::MakeModelYear => "Make + Model + Year",
        }
    }
}

impl std::str::FromStr for QuizMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "make" => Ok(QuizMode::Make),
            "make_model" | "make-model" => Ok(QuizMode::MakeModel),
            "make_model_year" | "make-model-year" => Ok(QuizMode::MakeModelYear),
            _ => Err(format!(
                "Unknown mode: {}. Use make, make_model, or make_model_year",
                s
            )),
        }
    }
}

impl std::fmt::Display for QuizMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizMode::Make => write!(f, "make"),
            QuizMode::MakeModel => write!(f, "make_model"),
            QuizMode::MakeModelYear => write!(f, "make_model_year"),
        }
    }
}

/// 1枚の車画像のメタデータ
///
/// `id` はファイル名のstem全体。末尾のランダムサフィックスにより
/// データセット内で一意になる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarRecord {
    pub id: String,
    pub path: PathBuf,
    pub make: String,
    pub model: String,
    pub year: i32,
    #[serde(default)]
    pub random_id: String,
    #[serde(default)]
    pub specs: BTreeMap<String, String>,
}

impl CarRecord {
    /// スペックをファイル名スキーマの定義順で返す
    pub fn spec_pairs(&self) -> Vec<(&'static str, &str)> {
        crate::parser::SPEC_KEYS
            .iter()
            .filter_map(|&key| self.specs.get(key).map(|v| (key, v.as_str())))
            .collect()
    }
}

/// 1つの答えの選択肢（表示ラベル + 対応レコード）
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerChoice {
    pub id: String,
    pub label: String,
    pub car: CarRecord,
}

/// 出題1問分（問題画像 + 選択肢）
#[derive(Debug, Clone, PartialEq)]
pub struct QuizQuestion {
    pub number: usize,
    pub car: CarRecord,
    pub choices: Vec<AnswerChoice>,
}

/// 1問の採点結果
///
/// 正誤フラグは階層的: `year_correct` が真なら `model_correct` も真、
/// `model_correct` が真なら `make_correct` も真。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreDetail {
    pub points: f64,
    pub max_points: f64,
    pub make_correct: bool,
    pub model_correct: bool,
    pub year_correct: bool,
    pub mode: QuizMode,
}

/// 回答済み1問の記録
#[derive(Debug, Clone)]
pub struct QuestionResult {
    pub question: QuizQuestion,
    pub selected_choice: AnswerChoice,
    pub score: ScoreDetail,
}

/// クイズセッションの可変状態
///
/// グローバルに持たず、エンジン関数へ明示的に受け渡す。
/// 乱数源はセッション専有で、シード指定により再現可能。
#[derive(Debug)]
pub struct QuizState {
    pub mode: QuizMode,
    pub total_questions: usize,
    pub duration_seconds: u64,
    pub used_ids: HashSet<String>,
    pub history: Vec<QuestionResult>,
    pub current_question: Option<QuizQuestion>,
    pub score: f64,
    pub start_time: Option<Instant>,
    pub completed: bool,
    pub rng_seed: u64,
    pub rng: StdRng,
}
