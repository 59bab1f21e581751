//! car-quiz-rust コアライブラリ
//!
//! 画像ファイル名に埋め込まれた車両メタデータの索引・キャッシュと、
//! 多肢選択クイズの出題・採点を提供する。UI層が必要とするのは
//! `load_index` / `ensure_thumbnail` / `generate_choices` / `compute_score`
//! と、セッション操作（`engine`）だけ。

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod models;
pub mod options;
pub mod parser;
pub mod scanner;
pub mod scoring;
