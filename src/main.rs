//! Nebula Number Navigator entry point
//!
//! The browser build is driven from JS through `nebula_navigator::web`.
//! Natively this runs a headless autoplay session, which is handy for
//! eyeballing generated questions and timer flow in the log.
//!
//! Usage: `nebula-navigator [seed] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use nebula_navigator::{GameDriver, GamePhase, LogSound, Settings};

    env_logger::init();
    log::info!("Nebula Number Navigator (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    let settings = match args.next() {
        Some(path) => match Settings::load_from_path(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{e}, using defaults");
                Settings::default()
            }
        },
        None => Settings::default(),
    };
    log::info!("Game initialized with seed: {}", seed);

    let sound = LogSound::new(settings.effective_volume());
    let mut driver = GameDriver::new(seed, settings, sound);
    driver.start();

    // Two levels, fumbling the first question of each once
    let mut fumbled = false;
    while driver.session().level() <= 2 {
        // Jump straight to the next thing that can happen
        let wait = driver
            .timers()
            .next_due()
            .map(|due| due.saturating_sub(driver.now_ms()))
            .unwrap_or(0);

        match driver.session().phase() {
            GamePhase::Playing => {
                let Some(question) = driver.session().question().cloned() else {
                    break;
                };
                println!("{}", describe(&question));
                if !fumbled {
                    fumbled = true;
                    if let Some(wrong) = question.choices.iter().find(|c| !c.is_correct) {
                        driver.drag_start();
                        driver.drag_end(&wrong.value.to_string());
                        continue;
                    }
                }
                driver.drag_start();
                match question.scan_data() {
                    Some(scan) if question.is_build_chart() => {
                        driver.build_chart_submit(scan.counts());
                    }
                    _ => {
                        driver.drag_end(&question.answer.to_string());
                    }
                }
            }
            GamePhase::LevelComplete if !driver.session().is_warping() => {
                println!(
                    "Level {} cleared, score {}",
                    driver.session().level(),
                    driver.session().score()
                );
                fumbled = false;
                driver.next_level();
            }
            GamePhase::ProgressMap => {
                if driver.session().level() == 2 {
                    break;
                }
                driver.continue_from_map();
            }
            _ => driver.advance(wait),
        }
    }

    let snapshot = driver.snapshot();
    match snapshot.to_json() {
        Ok(json) => log::debug!("Final snapshot: {json}"),
        Err(e) => log::warn!("Snapshot serialization failed: {e}"),
    }
    println!(
        "Finished at level {} with score {} (best combo {})",
        snapshot.level, snapshot.score, snapshot.max_combo
    );
    driver.shutdown();
}

#[cfg(not(target_arch = "wasm32"))]
fn describe(question: &nebula_navigator::Question) -> String {
    use nebula_navigator::missions::QuestionKind;

    let choices: Vec<String> = question.choices.iter().map(|c| c.value.to_string()).collect();
    let prompt = match &question.kind {
        QuestionKind::FuelEngine {
            num1,
            num2,
            operator,
            ..
        } => format!("{} {} {} = ?", num1, operator.symbol(), num2),
        QuestionKind::CrackCode {
            sequence,
            missing_index,
            ..
        } => sequence
            .iter()
            .enumerate()
            .map(|(i, n)| {
                if i == *missing_index {
                    "?".to_string()
                } else {
                    n.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(", "),
        QuestionKind::BalanceCargo { num1, num2 } => format!("{num1} ? {num2}"),
        QuestionKind::ScanData(scan) => scan.question_text.clone(),
    };
    let meta = question.mission_type().meta();
    format!(
        "{} {}: {}  choices: {}",
        meta.icon,
        meta.title,
        prompt,
        choices.join(" | ")
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is nebula_navigator::web::init, this is just to satisfy the compiler
}
