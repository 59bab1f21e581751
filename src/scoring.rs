//! 採点エンジン
//!
//! 正解レコードと選択レコードをモード別に比較し、階層的な部分点を与える。
//! どの入力でも必ず有効なScoreDetailを返す（エラー経路なし）。

use crate::models::{CarRecord, QuizMode, ScoreDetail};

/// 選択レコードを採点する
///
/// 正誤フラグは階層的: モデルはメーカーが合っているときだけ、
/// 年式はモデルまで合っているときだけ正解になりうる。
/// 満点はモードによらず常に1.0。
pub fn compute_score(correct: &CarRecord, guess: &CarRecord, mode: QuizMode) -> ScoreDetail {
    let make_correct = guess.make == correct.make;
    let model_correct = make_correct && guess.model == correct.model;
    let year_correct = model_correct && guess.year == correct.year;

    let points = match mode {
        QuizMode::Make => {
            if make_correct {
                1.0
            } else {
                0.0
            }
        }
        QuizMode::MakeModel => {
            let mut points = 0.0;
            if make_correct {
                points += 0.5;
                if model_correct {
                    points += 0.5;
                }
            }
            points
        }
        QuizMode::MakeModelYear => {
            let mut points = 0.0;
            if make_correct {
                points += 0.3;
                if model_correct {
                    points += 0.4;
                    if year_correct {
                        points += 0.3;
                    }
                }
            }
            points
        }
    };

    ScoreDetail {
        points,
        max_points: 1.0,
        make_correct,
        model_correct,
        year_correct,
        mode,
    }
}
