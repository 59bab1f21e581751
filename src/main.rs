use car_quiz_rust::{cli, config, engine, error, index, models, options};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::{CarQuizError, Result};
use index::cache::SnapshotFile;
use index::DatasetIndex;
use models::QuizMode;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load()?;

    match cli.command {
        Commands::Index { folder, cache_dir, force } => {
            println!("🚗 car-quiz - 索引構築\n");

            let cache_dir = config.resolve_cache_dir(cache_dir.as_deref())?;
            let dataset = index::load_index(&folder, &cache_dir, force)?;

            println!("✔ {}件のレコード / {}メーカー", dataset.len(), dataset.make_count());
            println!("✔ キャッシュ: {}", SnapshotFile::cache_path(&cache_dir).display());
        }

        Commands::Quiz {
            folder,
            mode,
            questions,
            choices,
            duration,
            seed,
            cache_dir,
            thumbnails,
        } => {
            println!("🚗 car-quiz - クイズ開始\n");

            let cache_dir = config.resolve_cache_dir(cache_dir.as_deref())?;
            let dataset = index::load_index(&folder, &cache_dir, false)?;
            println!("✔ {}件のレコードを読み込み\n", dataset.len());

            let thumb_dir = config.thumb_dir()?;
            run_quiz(&dataset, mode, questions, choices, duration, seed, thumbnails, &thumb_dir)?;
        }

        Commands::Cache { cache_dir, clear, info } => {
            let cache_dir = config.resolve_cache_dir(cache_dir.as_deref())?;
            let cache_path = SnapshotFile::cache_path(&cache_dir);

            if info || !clear {
                if let Some(snapshot) = SnapshotFile::load(&cache_dir) {
                    println!("キャッシュ情報:");
                    println!("  パス: {}", cache_path.display());
                    println!("  件数: {}", snapshot.len());
                    println!("  ダイジェスト: {}", snapshot.digest);
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  サイズ: {} bytes", meta.len());
                    }
                } else {
                    println!("キャッシュファイルが存在しません: {}", cache_path.display());
                }
            }

            if clear {
                match SnapshotFile::clear(&cache_dir) {
                    Ok(true) => println!("✔ キャッシュを削除しました: {}", cache_path.display()),
                    Ok(false) => println!("キャッシュファイルが存在しません"),
                    Err(e) => println!("キャッシュ削除エラー: {}", e),
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "car_quiz_rust=debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[allow(clippy::too_many_arguments)]
fn run_quiz(
    dataset: &DatasetIndex,
    mode: QuizMode,
    questions: usize,
    choices: usize,
    duration: u64,
    seed: Option<u64>,
    thumbnails: bool,
    thumb_dir: &std::path::Path,
) -> Result<()> {
    let mut state = engine::create_quiz_state(mode, questions, duration, seed);
    println!(
        "モード: {} / 出題数: {} / 制限時間: {}秒 / シード: {}\n",
        mode.display_name(),
        questions,
        duration,
        state.rng_seed
    );

    while let Some(question) = engine::ensure_question_with(&mut state, dataset, choices)? {
        println!("--- 問題 {} / {} ---", question.number, state.total_questions);

        let display_path = if thumbnails {
            index::thumbs::ensure_thumbnail(
                &question.car,
                thumb_dir,
                index::thumbs::DEFAULT_THUMBNAIL_SIZE,
            )
        } else {
            question.car.path.clone()
        };
        println!("画像: {}", display_path.display());

        let labels: Vec<&str> = question.choices.iter().map(|c| c.label.as_str()).collect();
        let selection = dialoguer::Select::new()
            .with_prompt("この車は？")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(|e| CarQuizError::Prompt(e.to_string()))?;

        let choice_id = question.choices[selection].id.clone();
        let detail = engine::submit_answer(&mut state, &choice_id)?;

        let correct_label = options::format_label(&question.car, state.mode);
        if detail.points >= detail.max_points {
            println!("✔ 正解！ +{:.1}点\n", detail.points);
        } else {
            println!("✘ 正解は {} (+{:.1}点)\n", correct_label, detail.points);
        }
    }

    println!(
        "✅ 終了  得点: {:.1} / {:.1} （{}問）",
        state.score,
        state.history.len() as f64,
        state.history.len()
    );

    Ok(())
}
