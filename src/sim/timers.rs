//! Fire-once delayed callbacks on a virtual clock

use serde::{Deserialize, Serialize};

/// What a scheduled callback does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Mission banner finished
    MissionBanner,
    /// Correct-answer celebration finished
    Celebration,
    /// Wrong-answer feedback finished
    WrongFeedback,
    /// Warp visual before the progress map finished
    LevelTransition,
    /// Delayed combo sound
    ComboChime,
    /// Companion message expired
    ClearMessage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingTimer {
    seq: u64,
    kind: TimerKind,
    due_ms: u64,
}

/// Pending timers. At most one per kind: rescheduling replaces.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    pending: Vec<PendingTimer>,
    next_seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire at `now_ms + delay_ms`
    pub fn schedule(&mut self, kind: TimerKind, delay_ms: u64, now_ms: u64) {
        self.cancel(kind);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(PendingTimer {
            seq,
            kind,
            due_ms: now_ms + delay_ms,
        });
    }

    /// Cancel a pending timer; returns whether one existed
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.kind != kind);
        self.pending.len() != before
    }

    /// Earliest due time
    pub fn next_due(&self) -> Option<u64> {
        self.pending.iter().map(|t| t.due_ms).min()
    }

    /// Remove and return the earliest timer due at or before `now_ms`.
    /// Ties go to whichever was scheduled first.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(TimerKind, u64)> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.seq))
            .map(|(i, _)| i)?;
        let timer = self.pending.swap_remove(idx);
        Some((timer.kind, timer.due_ms))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Cancel everything
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut q = TimerQueue::new();
        q.schedule(TimerKind::Celebration, 1800, 0);
        q.schedule(TimerKind::ComboChime, 300, 0);
        assert_eq!(q.next_due(), Some(300));
        assert_eq!(q.pop_due(100), None);
        assert_eq!(q.pop_due(2000), Some((TimerKind::ComboChime, 300)));
        assert_eq!(q.pop_due(2000), Some((TimerKind::Celebration, 1800)));
        assert!(q.is_empty());
    }

    #[test]
    fn test_reschedule_replaces() {
        let mut q = TimerQueue::new();
        q.schedule(TimerKind::ClearMessage, 2500, 0);
        q.schedule(TimerKind::ClearMessage, 2500, 1000);
        assert_eq!(q.len(), 1);
        assert_eq!(q.pop_due(2500), None);
        assert_eq!(q.pop_due(3500), Some((TimerKind::ClearMessage, 3500)));
    }

    #[test]
    fn test_ties_keep_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule(TimerKind::WrongFeedback, 800, 0);
        q.schedule(TimerKind::ClearMessage, 800, 0);
        assert_eq!(q.pop_due(800).map(|(k, _)| k), Some(TimerKind::WrongFeedback));
        assert_eq!(q.pop_due(800).map(|(k, _)| k), Some(TimerKind::ClearMessage));
    }

    #[test]
    fn test_cancel_and_clear() {
        let mut q = TimerQueue::new();
        q.schedule(TimerKind::WrongFeedback, 800, 0);
        assert!(q.cancel(TimerKind::WrongFeedback));
        assert!(!q.cancel(TimerKind::WrongFeedback));
        q.schedule(TimerKind::MissionBanner, 10, 0);
        q.schedule(TimerKind::LevelTransition, 10, 0);
        q.clear();
        assert_eq!(q.next_due(), None);
    }
}
