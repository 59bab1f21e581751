use thiserror::Error;

#[derive(Error, Debug)]
pub enum CarQuizError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像が見つかりません: {0}")]
    EmptyDataset(String),

    #[error("有効なレコードがありません（ファイル名スキーマを確認してください）")]
    NoValidRecords,

    #[error("選択肢数が不正です: {0}（最低2つ必要）")]
    InvalidChoiceCount(usize),

    #[error("出題中の問題がありません")]
    NoActiveQuestion,

    #[error("選択肢が見つかりません: {0}")]
    ChoiceNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CarQuizError>;
