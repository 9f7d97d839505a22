//! Effect executor
//!
//! `GameDriver` owns a session plus everything `step` must not touch: the
//! timer queue, the idle timer, the sound backend and the clock. Time only
//! moves through `advance`, so a browser frame loop and a unit test drive
//! the game the same way.

use crate::audio::SoundPlayer;
use crate::settings::Settings;
use crate::sim::{
    Effect, GameEvent, GamePhase, GameSession, IdleTimer, Snapshot, TimerKind, TimerQueue, step,
};

/// Runs a `GameSession` against a virtual millisecond clock
pub struct GameDriver<S: SoundPlayer> {
    session: GameSession,
    timers: TimerQueue,
    idle: IdleTimer,
    sound: S,
    now_ms: u64,
    shut_down: bool,
}

impl<S: SoundPlayer> GameDriver<S> {
    /// New driver on the title screen at time zero
    pub fn new(seed: u64, settings: Settings, sound: S) -> Self {
        let idle = IdleTimer::start(settings.timing.idle_timeout_ms, false, 0);
        Self {
            session: GameSession::new(seed, settings),
            timers: TimerQueue::new(),
            idle,
            sound,
            now_ms: 0,
            shut_down: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Direct session access for tooling and scripted tests
    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn sound(&self) -> &S {
        &self.sound
    }

    pub fn sound_mut(&mut self) -> &mut S {
        &mut self.sound
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn idle(&self) -> &IdleTimer {
        &self.idle
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Render-facing state for the current instant
    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot(self.idle.is_idle())
    }

    /// Feed one event through the state machine and execute its effects
    pub fn dispatch(&mut self, event: GameEvent) -> Vec<Effect> {
        if self.shut_down {
            log::debug!("Driver shut down, dropping {:?}", event);
            return Vec::new();
        }
        let effects = step(&mut self.session, event);
        for effect in &effects {
            self.apply(*effect);
        }
        // The idle countdown only runs while a question is answerable
        let playing = self.session.phase() == GamePhase::Playing;
        self.idle.set_enabled(playing, self.now_ms);
        effects
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Play(sound) => {
                if self.session.settings().sound_enabled {
                    self.sound.play(sound);
                }
            }
            Effect::Schedule { timer, delay_ms } => {
                self.timers.schedule(timer, delay_ms, self.now_ms)
            }
            Effect::ResetIdle => self.idle.force_reset(self.now_ms),
        }
    }

    pub fn start(&mut self) -> Vec<Effect> {
        self.record_activity();
        self.dispatch(GameEvent::Start)
    }

    pub fn drag_start(&mut self) -> Vec<Effect> {
        self.record_activity();
        self.dispatch(GameEvent::DragStarted)
    }

    /// Orb with displayed `value` dropped on the answer zone
    pub fn drag_end(&mut self, value: &str) -> Vec<Effect> {
        self.record_activity();
        self.dispatch(GameEvent::AnswerDropped {
            value: value.to_string(),
        })
    }

    pub fn build_chart_submit(&mut self, heights: Vec<u32>) -> Vec<Effect> {
        self.record_activity();
        self.dispatch(GameEvent::ChartSubmitted { heights })
    }

    pub fn next_level(&mut self) -> Vec<Effect> {
        self.record_activity();
        self.dispatch(GameEvent::NextLevel)
    }

    pub fn continue_from_map(&mut self) -> Vec<Effect> {
        self.record_activity();
        self.dispatch(GameEvent::ContinueFromMap)
    }

    pub fn window_blurred(&mut self) -> Vec<Effect> {
        self.dispatch(GameEvent::WindowBlurred)
    }

    pub fn window_focused(&mut self) -> Vec<Effect> {
        self.dispatch(GameEvent::WindowFocused)
    }

    /// Pointer, touch or key activity
    pub fn record_activity(&mut self) {
        if self.shut_down {
            return;
        }
        if self.idle.record_activity(self.now_ms) {
            log::debug!("Player active again at {}ms", self.now_ms);
            self.dispatch(GameEvent::ActivityResumed);
        }
    }

    /// Move the clock forward, firing every timer that falls due in order.
    /// A timer due at the same instant as the idle deadline fires first.
    pub fn advance(&mut self, elapsed_ms: u64) {
        if self.shut_down {
            return;
        }
        let target = self.now_ms.saturating_add(elapsed_ms);

        loop {
            let timer_due = self.timers.next_due().filter(|due| *due <= target);
            let idle_due = self.idle.deadline().filter(|due| *due <= target);

            let timer_first = match (timer_due, idle_due) {
                (None, None) => break,
                (Some(timer), Some(idle)) => timer <= idle,
                (Some(_), None) => true,
                (None, Some(_)) => false,
            };

            if timer_first {
                if let Some(due) = timer_due {
                    self.now_ms = self.now_ms.max(due);
                }
                if let Some((kind, _)) = self.timers.pop_due(self.now_ms) {
                    self.fire(kind);
                }
            } else {
                if let Some(due) = idle_due {
                    self.now_ms = self.now_ms.max(due);
                }
                if self.idle.poll(self.now_ms) {
                    log::debug!("Idle detected at {}ms", self.now_ms);
                    self.dispatch(GameEvent::IdleDetected);
                }
            }
        }

        self.now_ms = target;
    }

    fn fire(&mut self, kind: TimerKind) {
        log::trace!("Timer {:?} fired at {}ms", kind, self.now_ms);
        self.dispatch(GameEvent::TimerElapsed(kind));
    }

    /// Teardown: cancel every pending timer and the idle countdown.
    /// Nothing fires afterwards.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.timers.clear();
        self.idle.shutdown();
        self.shut_down = true;
        log::info!(
            "Session ended at level {} with score {}",
            self.session.level(),
            self.session.score()
        );
    }
}

impl<S: SoundPlayer> Drop for GameDriver<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundEffect;
    use crate::missions::MissionType;

    fn driver(settings: Settings) -> GameDriver<Vec<SoundEffect>> {
        GameDriver::new(12, settings, Vec::new())
    }

    fn answer(driver: &GameDriver<Vec<SoundEffect>>) -> String {
        driver
            .session()
            .question()
            .map(|q| q.answer.to_string())
            .unwrap_or_default()
    }

    #[test]
    fn test_banner_elapses_into_playing() {
        let mut d = driver(Settings::default());
        d.start();
        assert_eq!(d.session().phase(), GamePhase::MissionIntro);
        d.advance(1799);
        assert_eq!(d.session().phase(), GamePhase::MissionIntro);
        d.advance(1);
        assert_eq!(d.session().phase(), GamePhase::Playing);
        assert_eq!(d.now_ms(), 1800);
        assert!(d.idle().is_enabled());
    }

    #[test]
    fn test_idle_hint_and_wake() {
        let mut d = driver(Settings::default());
        d.start();
        d.advance(1800);
        d.advance(9_999);
        assert!(!d.snapshot().is_idle);
        d.advance(1);
        let snap = d.snapshot();
        assert!(snap.is_idle);
        assert_eq!(
            snap.hinted_choice,
            d.session().question().and_then(|q| q.correct_index())
        );
        assert!(d.sound().contains(&SoundEffect::Hint));

        d.record_activity();
        assert!(!d.snapshot().is_idle);
    }

    #[test]
    fn test_idle_suspended_outside_playing() {
        let mut d = driver(Settings::default());
        d.start();
        // Banner showing: no countdown
        assert_eq!(d.idle().deadline(), None);
        d.advance(1800);
        let value = answer(&d);
        d.drag_end(&value);
        assert_eq!(d.session().phase(), GamePhase::Celebrating);
        assert!(!d.idle().is_enabled());
        d.advance(1000);
        assert!(!d.snapshot().is_idle);
    }

    #[test]
    fn test_sound_disabled_is_silent() {
        let settings = Settings {
            sound_enabled: false,
            ..Settings::default()
        };
        let mut d = driver(settings);
        d.start();
        d.advance(1800);
        assert!(d.sound().is_empty());
    }

    #[test]
    fn test_combo_chime_follows_success() {
        let settings = Settings {
            mission_rotation: vec![MissionType::FuelEngine],
            ..Settings::default()
        };
        let mut d = driver(settings);
        d.start();
        d.advance(1800);
        let value = answer(&d);
        d.drag_end(&value);
        d.advance(1800);
        let value = answer(&d);
        d.drag_end(&value);
        assert!(!d.sound().contains(&SoundEffect::Combo));
        d.advance(299);
        assert!(!d.sound().contains(&SoundEffect::Combo));
        d.advance(1);
        assert_eq!(d.sound().last(), Some(&SoundEffect::Combo));
    }

    #[test]
    fn test_shutdown_cancels_everything() {
        let mut d = driver(Settings::default());
        d.start();
        assert!(!d.timers().is_empty());
        d.shutdown();
        assert!(d.timers().is_empty());
        d.advance(60_000);
        assert_eq!(d.session().phase(), GamePhase::MissionIntro);
        assert!(d.start().is_empty());
        assert!(d.is_shut_down());
    }

    #[test]
    fn test_instant_timing_runs_to_completion() {
        let settings = Settings {
            timing: crate::settings::Timing::instant(),
            questions_per_level: 2,
            ..Settings::default()
        };
        let mut d = driver(settings);
        d.start();
        d.advance(0);
        for _ in 0..2 {
            let value = answer(&d);
            d.drag_end(&value);
            d.advance(0);
        }
        assert_eq!(d.session().phase(), GamePhase::LevelComplete);
        d.next_level();
        d.advance(0);
        assert_eq!(d.session().phase(), GamePhase::ProgressMap);
    }
}
