//! クイズセッションエンジン
//!
//! セッション状態（QuizState）を明示的に受け渡しするAPI。
//! 状態の生成・出題・回答・残り時間の問い合わせをここに集約する。
//! 乱数源はセッションごとに1つ保持し、シード指定で出題列を再現できる。

use crate::error::{CarQuizError, Result};
use crate::index::DatasetIndex;
use crate::models::{CarRecord, QuestionResult, QuizMode, QuizQuestion, QuizState, ScoreDetail};
use crate::options::generate_choices;
use crate::scoring::compute_score;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::time::Instant;

pub const DEFAULT_TOTAL_QUESTIONS: usize = 10;
pub const DEFAULT_DURATION_SECONDS: u64 = 10 * 60;
pub const DEFAULT_CHOICE_COUNT: usize = 10;

/// 新しいセッション状態を作る
///
/// シード未指定時は現在時刻から導出する。使ったシードは
/// `rng_seed` に記録され、同じシードで出題列を再現できる。
pub fn create_quiz_state(
    mode: QuizMode,
    total_questions: usize,
    duration_seconds: u64,
    seed: Option<u64>,
) -> QuizState {
    let seed = seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });

    QuizState {
        mode,
        total_questions,
        duration_seconds,
        used_ids: HashSet::new(),
        history: Vec::new(),
        current_question: None,
        score: 0.0,
        start_time: Some(Instant::now()),
        completed: false,
        rng_seed: seed,
        rng: StdRng::seed_from_u64(seed),
    }
}

/// セッションを初期化し直す（履歴・スコア・使用済みIDをクリア）
pub fn reset_quiz_state(
    state: &mut QuizState,
    mode: QuizMode,
    duration_seconds: u64,
    seed: Option<u64>,
) {
    *state = create_quiz_state(mode, state.total_questions, duration_seconds, seed);
}

/// 現在の問題を返す。未出題なら新しく作る
///
/// セッション完了・時間切れ・出題数到達のときはNone。
pub fn ensure_question(state: &mut QuizState, index: &DatasetIndex) -> Result<Option<QuizQuestion>> {
    ensure_question_with(state, index, DEFAULT_CHOICE_COUNT)
}

/// 選択肢数を指定して出題する
pub fn ensure_question_with(
    state: &mut QuizState,
    index: &DatasetIndex,
    choice_count: usize,
) -> Result<Option<QuizQuestion>> {
    if state.completed {
        return Ok(None);
    }

    if is_time_up(state) {
        state.completed = true;
        return Ok(None);
    }

    if let Some(question) = &state.current_question {
        return Ok(Some(question.clone()));
    }

    if state.history.len() >= state.total_questions {
        state.completed = true;
        return Ok(None);
    }

    let car = select_car(index, state)?;
    let choices = generate_choices(&car, index, state.mode, choice_count, &mut state.rng)?;
    let question = QuizQuestion {
        number: state.history.len() + 1,
        car: car.clone(),
        choices,
    };

    state.used_ids.insert(car.id);
    state.current_question = Some(question.clone());
    Ok(Some(question))
}

/// 回答を採点してセッションへ記録する
///
/// 出題中の問題がない場合は `NoActiveQuestion`、
/// choice_idが選択肢に含まれない場合は `ChoiceNotFound`
/// （この場合、出題中の問題は消費されない）。
pub fn submit_answer(state: &mut QuizState, choice_id: &str) -> Result<ScoreDetail> {
    let question = state
        .current_question
        .clone()
        .ok_or(CarQuizError::NoActiveQuestion)?;

    let selected = question
        .choices
        .iter()
        .find(|c| c.id == choice_id)
        .cloned()
        .ok_or_else(|| CarQuizError::ChoiceNotFound(choice_id.to_string()))?;

    let detail = compute_score(&question.car, &selected.car, state.mode);

    state.score += detail.points;
    state.history.push(QuestionResult {
        question,
        selected_choice: selected,
        score: detail,
    });
    state.current_question = None;

    if state.history.len() >= state.total_questions || is_time_up(state) {
        state.completed = true;
    }

    Ok(detail)
}

pub fn remaining_questions(state: &QuizState) -> usize {
    state.total_questions.saturating_sub(state.history.len())
}

pub fn is_time_up(state: &QuizState) -> bool {
    match state.start_time {
        Some(start) => start.elapsed().as_secs_f64() >= state.duration_seconds as f64,
        None => false,
    }
}

pub fn remaining_seconds(state: &QuizState) -> f64 {
    match state.start_time {
        Some(start) => (state.duration_seconds as f64 - start.elapsed().as_secs_f64()).max(0.0),
        None => state.duration_seconds as f64,
    }
}

/// 未出題のレコードを1件選ぶ
///
/// 全件出題済みのときは使用済みセットをリセットして再出題を許す
/// （セッションを打ち切るよりも出題を続ける）。
fn select_car(index: &DatasetIndex, state: &mut QuizState) -> Result<CarRecord> {
    let pool = index.all_records();
    if pool.is_empty() {
        return Err(CarQuizError::NoValidRecords);
    }

    if state.used_ids.len() >= pool.len() {
        state.used_ids.clear();
    }

    for _ in 0..256 {
        let candidate = &pool[state.rng.gen_range(0..pool.len())];
        if !state.used_ids.contains(&candidate.id) {
            return Ok(candidate.clone());
        }
    }

    // 乱数で引けなかった場合の決定的フォールバック
    let candidate = pool
        .iter()
        .find(|c| !state.used_ids.contains(&c.id))
        .unwrap_or(&pool[0]);
    Ok(candidate.clone())
}
