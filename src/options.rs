//! 選択肢生成
//!
//! 正解1件 + 紛らわしい順のティア別ディストラクタでN択を組み立てる。
//! ティア内はセッションの乱数源でシャッフルし、ラベル・IDが未使用の
//! 候補から貪欲に採用する。全ティアを使い切っても足りない場合だけ、
//! ラベル重複を許す最終フォールバックで必ず規定数を満たす。

use crate::error::{CarQuizError, Result};
use crate::index::DatasetIndex;
use crate::models::{AnswerChoice, CarRecord, QuizMode};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// モードに応じた表示ラベルを作る
pub fn format_label(car: &CarRecord, mode: QuizMode) -> String {
    match mode {
        QuizMode::Make => car.make.clone(),
        QuizMode::MakeModel => format!("{} {}", car.make, car.model),
        QuizMode::MakeModelYear => format!("{} {} {}", car.make, car.model, car.year),
    }
}

/// 正解を必ず1つ含む選択肢リストを生成する
///
/// 返り値は `total_choices` 件（データセットがそれ未満の場合のみ少なくなる）。
/// IDは常に一意。ラベルはフォールバック時のみ重複しうる。
/// 正解の位置は最終シャッフルで一様ランダムになる。
pub fn generate_choices<'a, R: Rng>(
    correct: &'a CarRecord,
    index: &'a DatasetIndex,
    mode: QuizMode,
    total_choices: usize,
    rng: &mut R,
) -> Result<Vec<AnswerChoice>> {
    if total_choices < 2 {
        return Err(CarQuizError::InvalidChoiceCount(total_choices));
    }

    let mut seen_ids: HashSet<&str> = HashSet::new();
    seen_ids.insert(correct.id.as_str());
    let mut seen_labels: HashSet<String> = HashSet::new();
    seen_labels.insert(format_label(correct, mode));

    // ティア別の候補プール（紛らわしい順）。最後はデータセット全体
    let mut pools: Vec<Vec<&'a CarRecord>> = Vec::new();

    match mode {
        QuizMode::MakeModelYear => {
            let same_model: Vec<&CarRecord> = index
                .get_by_make_model(&correct.make, &correct.model)
                .iter()
                .filter(|c| c.id != correct.id && c.year != correct.year)
                .collect();
            let same_make: Vec<&CarRecord> = index
                .get_by_make(&correct.make)
                .iter()
                .filter(|c| {
                    c.id != correct.id && (c.model != correct.model || c.year != correct.year)
                })
                .collect();
            pools.push(same_model);
            pools.push(same_make);
        }
        QuizMode::MakeModel => {
            // 同メーカー同モデルの別年式はラベルが正解と同一になるため
            // ラベル一意チェックで弾かれるが、ティアとしては保持する
            let same_model: Vec<&CarRecord> = index
                .get_by_make_model(&correct.make, &correct.model)
                .iter()
                .filter(|c| c.id != correct.id && c.year != correct.year)
                .collect();
            let same_make: Vec<&CarRecord> = index
                .get_by_make(&correct.make)
                .iter()
                .filter(|c| c.id != correct.id && c.model != correct.model)
                .collect();
            pools.push(same_model);
            pools.push(same_make);
        }
        QuizMode::Make => {
            let other_makes: Vec<&CarRecord> = index
                .all_records()
                .iter()
                .filter(|c| c.make != correct.make)
                .collect();
            pools.push(other_makes);
        }
    }

    pools.push(
        index
            .all_records()
            .iter()
            .filter(|c| c.id != correct.id)
            .collect(),
    );

    let quota = total_choices - 1;
    let mut distractors: Vec<&CarRecord> = Vec::new();

    for mut pool in pools {
        pool.shuffle(rng);
        for car in pool {
            if distractors.len() >= quota {
                break;
            }
            if seen_ids.contains(car.id.as_str()) {
                continue;
            }
            let label = format_label(car, mode);
            if seen_labels.contains(&label) {
                continue;
            }
            seen_ids.insert(car.id.as_str());
            seen_labels.insert(label);
            distractors.push(car);
        }
        if distractors.len() >= quota {
            break;
        }
    }

    // ラベル重複を許すフォールバック（ID一意だけは維持）。
    // 見た目が同じ選択肢が並ぶより、出題できないほうが困る
    if distractors.len() < quota {
        let mut remaining: Vec<&CarRecord> = index
            .all_records()
            .iter()
            .filter(|c| !seen_ids.contains(c.id.as_str()))
            .collect();
        remaining.shuffle(rng);
        for car in remaining {
            if distractors.len() >= quota {
                break;
            }
            seen_ids.insert(car.id.as_str());
            distractors.push(car);
        }
    }

    let mut cars: Vec<&CarRecord> = Vec::with_capacity(total_choices);
    cars.push(correct);
    cars.extend(distractors.into_iter().take(quota));
    cars.shuffle(rng);

    Ok(cars
        .into_iter()
        .map(|car| AnswerChoice {
            id: car.id.clone(),
            label: format_label(car, mode),
            car: car.clone(),
        })
        .collect())
}
