//! Inactivity detection on a virtual clock
//!
//! The timer never sleeps; it records a deadline and the owner polls it as
//! time advances. Disabling or shutting down drops the deadline, so nothing
//! can fire afterwards.

/// Flags the player as idle after `timeout_ms` without activity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdleTimer {
    timeout_ms: u64,
    enabled: bool,
    is_idle: bool,
    deadline: Option<u64>,
}

impl IdleTimer {
    /// Start watching at `now_ms`; counts down immediately when `enabled`
    pub fn start(timeout_ms: u64, enabled: bool, now_ms: u64) -> Self {
        let mut timer = Self {
            timeout_ms,
            enabled: false,
            is_idle: false,
            deadline: None,
        };
        timer.set_enabled(enabled, now_ms);
        timer
    }

    pub fn is_idle(&self) -> bool {
        self.is_idle
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Pending fire time, if counting down
    pub fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Pointer, touch or key activity. Returns true if this woke the player.
    pub fn record_activity(&mut self, now_ms: u64) -> bool {
        if !self.enabled {
            return false;
        }
        let was_idle = self.is_idle;
        self.restart(now_ms);
        was_idle
    }

    /// Restart the countdown for a fresh question
    pub fn force_reset(&mut self, now_ms: u64) {
        if self.enabled {
            self.restart(now_ms);
        } else {
            self.is_idle = false;
        }
    }

    /// Enabling starts a fresh countdown; disabling clears idle and suspends
    pub fn set_enabled(&mut self, enabled: bool, now_ms: u64) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;
        if enabled {
            self.restart(now_ms);
        } else {
            self.is_idle = false;
            self.deadline = None;
        }
    }

    /// Fire the deadline if it has passed. Returns true on the transition to idle.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.deadline {
            Some(deadline) if self.enabled && now_ms >= deadline => {
                self.deadline = None;
                self.is_idle = true;
                true
            }
            _ => false,
        }
    }

    /// Teardown: cancel any pending deadline
    pub fn shutdown(&mut self) {
        self.enabled = false;
        self.is_idle = false;
        self.deadline = None;
    }

    fn restart(&mut self, now_ms: u64) {
        self.is_idle = false;
        self.deadline = Some(now_ms + self.timeout_ms);
    }
}
