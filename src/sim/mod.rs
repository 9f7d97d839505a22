//! Game state machine
//!
//! All gameplay rules live here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - No clocks; timers are effects the driver schedules
//! - No rendering or platform dependencies; sounds are named, never played

pub mod combo;
pub mod idle;
pub mod state;
pub mod step;
pub mod timers;

pub use combo::ComboTracker;
pub use idle::IdleTimer;
pub use state::{GamePhase, GameSession, RoboEmotion, Snapshot};
pub use step::{Effect, GameEvent, step};
pub use timers::{TimerKind, TimerQueue};
