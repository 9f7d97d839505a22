//! Pure state transition function
//!
//! `step` applies one event to the session and returns the effects the
//! driver must carry out (sounds, timers, idle resets). It never sleeps and
//! never touches a clock, so every transition is testable in isolation.
//!
//! ```text
//! TITLE --start--> MISSION_INTRO --banner--> PLAYING
//! PLAYING --correct--> CELEBRATING --celebration--> PLAYING | MISSION_INTRO | LEVEL_COMPLETE
//! PLAYING --wrong--> WRONG_FEEDBACK --feedback--> PLAYING (same question)
//! LEVEL_COMPLETE --next level + warp--> PROGRESS_MAP --continue--> MISSION_INTRO | PLAYING
//! ```

use super::state::{GamePhase, GameSession, RoboEmotion};
use super::timers::TimerKind;
use crate::audio::SoundEffect;
use crate::consts::BLUR_MESSAGE_MS;

/// Inputs to the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Launch button on the title screen
    Start,
    /// An orb was dropped on the answer zone with this displayed value
    AnswerDropped { value: String },
    /// The interactive bar chart was submitted
    ChartSubmitted { heights: Vec<u32> },
    /// An orb was picked up
    DragStarted,
    /// "Next level" on the level complete screen
    NextLevel,
    /// "Continue" on the progress map
    ContinueFromMap,
    /// A scheduled timer fired
    TimerElapsed(TimerKind),
    /// The idle timer fired
    IdleDetected,
    /// Activity after the player had gone idle
    ActivityResumed,
    /// Browser window lost focus
    WindowBlurred,
    /// Browser window regained focus
    WindowFocused,
}

/// Commands for the driver. Timers are only ever replaced, never cancelled
/// individually; stale ones are ignored by phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Play(SoundEffect),
    /// Fire `TimerElapsed(timer)` after `delay_ms`, replacing any pending one
    Schedule { timer: TimerKind, delay_ms: u64 },
    /// A new question is up; restart the idle countdown
    ResetIdle,
}

/// Apply `event` to `session`
pub fn step(session: &mut GameSession, event: GameEvent) -> Vec<Effect> {
    let mut effects = Vec::new();
    let phase = session.phase;

    match event {
        GameEvent::Start if phase == GamePhase::Title => start(session, &mut effects),
        GameEvent::AnswerDropped { value } if phase == GamePhase::Playing => {
            answer_dropped(session, &value, &mut effects)
        }
        GameEvent::ChartSubmitted { heights } if phase == GamePhase::Playing => {
            chart_submitted(session, &heights, &mut effects)
        }
        GameEvent::DragStarted if phase == GamePhase::Playing => {
            session.robo_emotion = RoboEmotion::Excited;
            let ms = session.settings.timing.message_ms;
            say(session, "Calculating trajectory... 📐", ms, &mut effects);
            effects.push(Effect::Play(SoundEffect::Whoosh));
        }
        GameEvent::NextLevel if phase == GamePhase::LevelComplete && !session.warping => {
            session.warping = true;
            effects.push(Effect::Play(SoundEffect::Warp));
            effects.push(Effect::Schedule {
                timer: TimerKind::LevelTransition,
                delay_ms: session.settings.timing.level_transition_ms,
            });
        }
        GameEvent::ContinueFromMap if phase == GamePhase::ProgressMap => {
            effects.push(Effect::Play(SoundEffect::Click));
            session.level += 1;
            session.progress = 0;
            session.question_index += 1;
            session.combo.reset();
            log::info!("Continuing to level {}", session.level);
            present_next_question(session, &mut effects);
        }
        GameEvent::TimerElapsed(timer) => timer_elapsed(session, timer, &mut effects),
        GameEvent::IdleDetected if phase == GamePhase::Playing => {
            session.robo_emotion = RoboEmotion::Sleeping;
            let ms = session.settings.timing.message_ms;
            say(session, "Zzz... systems in standby... 😴", ms, &mut effects);
            effects.push(Effect::Play(SoundEffect::Hint));
        }
        GameEvent::ActivityResumed if phase == GamePhase::Playing => {
            if session.robo_emotion == RoboEmotion::Sleeping {
                session.robo_emotion = RoboEmotion::Idle;
            }
        }
        GameEvent::WindowBlurred if phase == GamePhase::Playing => {
            session.robo_emotion = RoboEmotion::Confused;
            say(session, "Come back, navigator! 🛸", BLUR_MESSAGE_MS, &mut effects);
        }
        GameEvent::WindowFocused if phase == GamePhase::Playing => {
            session.robo_emotion = RoboEmotion::Excited;
            let ms = session.settings.timing.message_ms;
            say(session, "Welcome back! Let's continue! 🌟", ms, &mut effects);
        }
        other => log::debug!("Ignoring {:?} in {:?}", other, phase),
    }

    effects
}

fn start(session: &mut GameSession, effects: &mut Vec<Effect>) {
    effects.push(Effect::Play(SoundEffect::Click));
    session.level = 1;
    session.score = 0;
    session.progress = 0;
    session.question_index = 0;
    session.combo.reset();
    session.warping = false;
    session.wrong_choice = None;

    let mission = session.engine.mission_type_for(0);
    session.question = Some(session.engine.generate(mission, 1, &mut session.rng));
    session.phase = GamePhase::MissionIntro;
    session.robo_emotion = RoboEmotion::Excited;
    log::info!("Session started (seed {}), first mission {:?}", session.seed, mission);

    effects.push(Effect::ResetIdle);
    effects.push(Effect::Schedule {
        timer: TimerKind::MissionBanner,
        delay_ms: session.settings.timing.mission_banner_ms,
    });
}

fn answer_dropped(session: &mut GameSession, value: &str, effects: &mut Vec<Effect>) {
    let Some(question) = session.question.as_ref() else {
        log::debug!("Answer {:?} dropped with no active question", value);
        return;
    };
    // Orbs are hidden while the chart is being built
    if question.is_build_chart() {
        log::debug!("Orb drop ignored during chart build");
        return;
    }

    if question.accepts(value) {
        let points = session.settings.points_per_correct;
        let celebrate_ms = session.settings.timing.celebration_ms;
        award(session, points, celebrate_ms, false, effects);
    } else {
        session.wrong_choice = question.choice_index(value);
        reject(session, "Hull breach risk! Try again! ⚠️", effects);
    }
}

fn chart_submitted(session: &mut GameSession, heights: &[u32], effects: &mut Vec<Effect>) {
    let Some(question) = session.question.as_ref() else {
        return;
    };
    if !question.is_build_chart() {
        log::debug!("Chart submitted for a {:?} question", question.mission_type());
        return;
    }

    if question.accepts_chart(heights) {
        let points = session.settings.points_per_chart;
        let timing = session.settings.timing;
        let celebrate_ms = timing.celebration_ms + timing.chart_celebration_bonus_ms;
        award(session, points, celebrate_ms, true, effects);
    } else {
        session.wrong_choice = None;
        reject(session, "Almost there! Check your bars! ⚠️", effects);
    }
}

/// Correct answer: points are awarded here and only here, once per submission
fn award(
    session: &mut GameSession,
    points_per_level: u32,
    celebrate_ms: u64,
    chart: bool,
    effects: &mut Vec<Effect>,
) {
    effects.push(Effect::Play(SoundEffect::Success));
    session.combo.register_correct();
    session.score += u64::from(session.level) * u64::from(points_per_level);
    session.phase = GamePhase::Celebrating;
    session.robo_emotion = RoboEmotion::Cheering;

    let combo = session.combo.combo();
    let message = match (session.combo.is_warp_speed(), chart) {
        (true, false) => format!("Combo x{combo}! Epic! 🔥"),
        (true, true) => format!("Combo x{combo}! Chart Master! 🔥"),
        (false, false) => "Target neutralized! 🎯".to_string(),
        (false, true) => "Perfect chart! 📊🎯".to_string(),
    };
    let ms = session.settings.timing.message_ms;
    say(session, message, ms, effects);

    if session.combo.is_warp_speed() {
        effects.push(Effect::Schedule {
            timer: TimerKind::ComboChime,
            delay_ms: session.settings.timing.combo_chime_delay_ms,
        });
    }
    effects.push(Effect::Schedule {
        timer: TimerKind::Celebration,
        delay_ms: celebrate_ms,
    });
}

fn reject(session: &mut GameSession, message: &str, effects: &mut Vec<Effect>) {
    effects.push(Effect::Play(SoundEffect::Error));
    session.combo.register_wrong();
    session.phase = GamePhase::WrongFeedback;
    session.robo_emotion = RoboEmotion::Confused;
    let ms = session.settings.timing.message_ms;
    say(session, message, ms, effects);
    effects.push(Effect::Schedule {
        timer: TimerKind::WrongFeedback,
        delay_ms: session.settings.timing.wrong_feedback_ms,
    });
}

fn timer_elapsed(session: &mut GameSession, timer: TimerKind, effects: &mut Vec<Effect>) {
    match (timer, session.phase) {
        (TimerKind::MissionBanner, GamePhase::MissionIntro) => {
            session.phase = GamePhase::Playing;
            session.robo_emotion = RoboEmotion::Idle;
        }
        (TimerKind::Celebration, GamePhase::Celebrating) => {
            session.progress += 1;
            if session.progress >= session.settings.questions_per_level {
                effects.push(Effect::Play(SoundEffect::LevelUp));
                session.phase = GamePhase::LevelComplete;
                session.robo_emotion = RoboEmotion::Cheering;
                let ms = session.settings.timing.message_ms;
                say(session, "Sector cleared! Warping out! 🌌", ms, effects);
                log::info!(
                    "Level {} complete, score {}",
                    session.level,
                    session.score
                );
            } else {
                session.question_index += 1;
                present_next_question(session, effects);
            }
        }
        (TimerKind::WrongFeedback, GamePhase::WrongFeedback) => {
            session.wrong_choice = None;
            session.phase = GamePhase::Playing;
            session.robo_emotion = RoboEmotion::Idle;
        }
        (TimerKind::LevelTransition, GamePhase::LevelComplete) if session.warping => {
            session.warping = false;
            session.phase = GamePhase::ProgressMap;
        }
        (TimerKind::ComboChime, _) => effects.push(Effect::Play(SoundEffect::Combo)),
        (TimerKind::ClearMessage, phase) => {
            session.robo_message = None;
            if phase == GamePhase::Playing && session.robo_emotion == RoboEmotion::Excited {
                session.robo_emotion = RoboEmotion::Idle;
            }
        }
        (timer, phase) => log::debug!("Stale {:?} timer in {:?}", timer, phase),
    }
}

/// Generate the question for the current index; a mission change routes
/// through the banner
fn present_next_question(session: &mut GameSession, effects: &mut Vec<Effect>) {
    let previous = session.current_mission();
    let mission = session.engine.mission_type_for(session.question_index);
    let question = session
        .engine
        .generate(mission, session.level, &mut session.rng);
    session.question = Some(question);
    session.wrong_choice = None;
    effects.push(Effect::ResetIdle);

    if previous.is_some_and(|prev| prev != mission) {
        session.phase = GamePhase::MissionIntro;
        effects.push(Effect::Play(SoundEffect::Whoosh));
        effects.push(Effect::Schedule {
            timer: TimerKind::MissionBanner,
            delay_ms: session.settings.timing.mission_banner_ms,
        });
    } else {
        session.phase = GamePhase::Playing;
        session.robo_emotion = RoboEmotion::Idle;
    }
}

/// Show a companion message; a newer message replaces the old one's expiry
fn say(
    session: &mut GameSession,
    message: impl Into<String>,
    duration_ms: u64,
    effects: &mut Vec<Effect>,
) {
    session.robo_message = Some(message.into());
    effects.push(Effect::Schedule {
        timer: TimerKind::ClearMessage,
        delay_ms: duration_ms,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::missions::{Operator, fuel_engine};
    use crate::settings::Settings;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Session sitting in PLAYING on its first question
    fn playing_session(seed: u64) -> GameSession {
        let mut session = GameSession::new(seed, Settings::default());
        step(&mut session, GameEvent::Start);
        step(&mut session, GameEvent::TimerElapsed(TimerKind::MissionBanner));
        assert_eq!(session.phase(), GamePhase::Playing);
        session
    }

    fn correct_value(session: &GameSession) -> String {
        session
            .question()
            .map(|q| q.answer.to_string())
            .unwrap_or_default()
    }

    fn wrong_value(session: &GameSession) -> String {
        session
            .question()
            .and_then(|q| q.choices.iter().find(|c| !c.is_correct))
            .map(|c| c.value.to_string())
            .unwrap_or_default()
    }

    fn schedules(effects: &[Effect], timer: TimerKind) -> Option<u64> {
        effects.iter().find_map(|e| match e {
            Effect::Schedule { timer: t, delay_ms } if *t == timer => Some(*delay_ms),
            _ => None,
        })
    }

    #[test]
    fn test_start_enters_mission_intro() {
        let mut session = GameSession::new(3, Settings::default());
        let effects = step(&mut session, GameEvent::Start);
        assert_eq!(session.phase(), GamePhase::MissionIntro);
        assert!(session.question().is_some());
        assert_eq!(schedules(&effects, TimerKind::MissionBanner), Some(1800));
        assert!(effects.contains(&Effect::Play(SoundEffect::Click)));
        assert!(effects.contains(&Effect::ResetIdle));
    }

    #[test]
    fn test_answer_outside_playing_is_ignored() {
        let mut session = GameSession::new(3, Settings::default());
        let effects = step(
            &mut session,
            GameEvent::AnswerDropped {
                value: "1".to_string(),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(session.phase(), GamePhase::Title);

        step(&mut session, GameEvent::Start);
        let value = correct_value(&session);
        let effects = step(&mut session, GameEvent::AnswerDropped { value });
        assert!(effects.is_empty(), "banner still showing");
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_fixed_equation_scores_level_times_ten() {
        let mut session = playing_session(8);
        let mut rng = Pcg32::seed_from_u64(1);
        let question = fuel_engine::from_operands(3, 5, Operator::Add, 1, &mut rng);
        session.replace_question(question);

        let effects = step(
            &mut session,
            GameEvent::AnswerDropped {
                value: "8".to_string(),
            },
        );
        assert_eq!(session.phase(), GamePhase::Celebrating);
        assert_eq!(session.score(), 10);
        assert_eq!(session.combo().combo(), 1);
        assert_eq!(session.progress(), 0, "progress waits for the celebration");
        assert_eq!(schedules(&effects, TimerKind::Celebration), Some(1800));
        assert_eq!(schedules(&effects, TimerKind::ComboChime), None);

        // A repeated drop of the same event cannot double-award
        step(
            &mut session,
            GameEvent::AnswerDropped {
                value: "8".to_string(),
            },
        );
        assert_eq!(session.score(), 10);
    }

    #[test]
    fn test_wrong_answer_keeps_question() {
        let mut session = playing_session(21);
        let value = correct_value(&session);
        step(&mut session, GameEvent::AnswerDropped { value });
        step(&mut session, GameEvent::TimerElapsed(TimerKind::Celebration));
        // Land on PLAYING whether or not the rotation changed mission
        step(&mut session, GameEvent::TimerElapsed(TimerKind::MissionBanner));
        assert_eq!(session.combo().combo(), 1);

        let before = session.question().cloned();
        let value = wrong_value(&session);
        let effects = step(&mut session, GameEvent::AnswerDropped { value: value.clone() });
        assert_eq!(session.phase(), GamePhase::WrongFeedback);
        assert_eq!(session.combo().combo(), 0);
        assert_eq!(schedules(&effects, TimerKind::WrongFeedback), Some(800));
        assert_eq!(
            session.wrong_choice(),
            session.question().and_then(|q| q.choice_index(&value))
        );

        step(&mut session, GameEvent::TimerElapsed(TimerKind::WrongFeedback));
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.question().cloned(), before);
        assert_eq!(session.wrong_choice(), None);
    }

    #[test]
    fn test_stale_timers_are_ignored() {
        let mut session = playing_session(5);
        let effects = step(&mut session, GameEvent::TimerElapsed(TimerKind::Celebration));
        assert!(effects.is_empty());
        assert_eq!(session.progress(), 0);
        step(&mut session, GameEvent::TimerElapsed(TimerKind::WrongFeedback));
        assert_eq!(session.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_second_correct_schedules_combo_chime() {
        let mut settings = Settings::default();
        settings.mission_rotation = vec![crate::missions::MissionType::BalanceCargo];
        let mut session = GameSession::new(17, settings);
        step(&mut session, GameEvent::Start);
        step(&mut session, GameEvent::TimerElapsed(TimerKind::MissionBanner));

        let value = correct_value(&session);
        step(&mut session, GameEvent::AnswerDropped { value });
        step(&mut session, GameEvent::TimerElapsed(TimerKind::Celebration));
        assert_eq!(session.phase(), GamePhase::Playing, "same mission skips the banner");

        let value = correct_value(&session);
        let effects = step(&mut session, GameEvent::AnswerDropped { value });
        assert!(session.combo().is_warp_speed());
        assert_eq!(schedules(&effects, TimerKind::ComboChime), Some(300));
        let chime = step(&mut session, GameEvent::TimerElapsed(TimerKind::ComboChime));
        assert_eq!(chime, vec![Effect::Play(SoundEffect::Combo)]);
    }

    #[test]
    fn test_level_flow_through_map() {
        let mut settings = Settings::default();
        settings.mission_rotation = vec![crate::missions::MissionType::FuelEngine];
        let mut session = GameSession::new(99, settings);
        step(&mut session, GameEvent::Start);
        step(&mut session, GameEvent::TimerElapsed(TimerKind::MissionBanner));

        for answered in 1..=6 {
            let value = correct_value(&session);
            step(&mut session, GameEvent::AnswerDropped { value });
            step(&mut session, GameEvent::TimerElapsed(TimerKind::Celebration));
            assert_eq!(session.progress(), answered);
            if answered < 6 {
                assert_eq!(session.phase(), GamePhase::Playing);
            }
        }
        assert_eq!(session.phase(), GamePhase::LevelComplete);
        assert_eq!(session.question_index(), 5);
        assert_eq!(session.score(), 60);

        let effects = step(&mut session, GameEvent::NextLevel);
        assert!(effects.contains(&Effect::Play(SoundEffect::Warp)));
        assert!(session.is_warping());
        assert!(step(&mut session, GameEvent::NextLevel).is_empty());
        step(&mut session, GameEvent::TimerElapsed(TimerKind::LevelTransition));
        assert_eq!(session.phase(), GamePhase::ProgressMap);
        assert_eq!(session.level(), 1, "nothing changes until continue");

        step(&mut session, GameEvent::ContinueFromMap);
        assert_eq!(session.level(), 2);
        assert_eq!(session.progress(), 0);
        assert_eq!(session.question_index(), 6);
        assert_eq!(session.combo().combo(), 0);
        assert_eq!(session.combo().max_combo(), 6);
        assert_eq!(session.phase(), GamePhase::Playing, "same mission skips the banner");
    }

    #[test]
    fn test_mission_change_routes_through_banner() {
        let mut session = playing_session(44);
        for _ in 0..3 {
            let value = correct_value(&session);
            step(&mut session, GameEvent::AnswerDropped { value });
            step(&mut session, GameEvent::TimerElapsed(TimerKind::Celebration));
        }
        // Default rotation moves from FUEL_ENGINE to CRACK_CODE at index 3
        assert_eq!(session.question_index(), 3);
        assert_eq!(session.phase(), GamePhase::MissionIntro);
        assert_eq!(
            session.current_mission(),
            Some(crate::missions::MissionType::CrackCode)
        );
    }

    #[test]
    fn test_idle_and_wake_moods() {
        let mut session = playing_session(2);
        let effects = step(&mut session, GameEvent::IdleDetected);
        assert_eq!(session.robo_emotion(), RoboEmotion::Sleeping);
        assert!(effects.contains(&Effect::Play(SoundEffect::Hint)));
        step(&mut session, GameEvent::ActivityResumed);
        assert_eq!(session.robo_emotion(), RoboEmotion::Idle);
    }

    #[test]
    fn test_drag_start_excites_until_message_clears() {
        let mut session = playing_session(2);
        let effects = step(&mut session, GameEvent::DragStarted);
        assert!(effects.contains(&Effect::Play(SoundEffect::Whoosh)));
        assert_eq!(session.robo_emotion(), RoboEmotion::Excited);
        assert!(session.robo_message().is_some());
        step(&mut session, GameEvent::TimerElapsed(TimerKind::ClearMessage));
        assert_eq!(session.robo_message(), None);
        assert_eq!(session.robo_emotion(), RoboEmotion::Idle);
    }
}
