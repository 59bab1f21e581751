use crate::models::QuizMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "car-quiz")]
#[command(about = "車当てクイズ - 画像ファイル名索引・出題・採点エンジン", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像フォルダを索引化してキャッシュを更新
    Index {
        /// 画像フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// キャッシュディレクトリ（デフォルト: OSキャッシュ領域）
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// キャッシュを無視して再構築
        #[arg(long)]
        force: bool,
    },

    /// クイズを開始
    Quiz {
        /// 画像フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// 出題モード (make/make_model/make_model_year)
        #[arg(short, long, default_value = "make_model_year")]
        mode: QuizMode,

        /// 出題数
        #[arg(short, long, default_value = "10")]
        questions: usize,

        /// 選択肢の数
        #[arg(short, long, default_value = "10")]
        choices: usize,

        /// 制限時間（秒）
        #[arg(short, long, default_value = "600")]
        duration: u64,

        /// 乱数シード（同じシードで同じ出題列を再現）
        #[arg(long)]
        seed: Option<u64>,

        /// キャッシュディレクトリ
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// サムネイルを生成して表示する
        #[arg(long)]
        thumbnails: bool,
    },

    /// キャッシュ情報の表示・削除
    Cache {
        /// キャッシュディレクトリ
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// キャッシュを削除
        #[arg(long)]
        clear: bool,

        /// キャッシュ情報を表示
        #[arg(long)]
        info: bool,
    },
}
