//! Movement domain: frame-cadence countdowns and grace windows.

/// Counts down to zero and never below it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    /// Start (or restart) the countdown. Negative or NaN durations start nothing.
    pub fn start(&mut self, duration: f32) {
        self.remaining = if duration > 0.0 { duration } else { 0.0 };
    }

    /// Keep whichever of the current and new remaining time is longer.
    pub fn extend_to(&mut self, duration: f32) {
        if duration > self.remaining {
            self.remaining = duration;
        }
    }

    pub fn cancel(&mut self) {
        self.remaining = 0.0;
    }

    /// Advance by `dt`. Returns true only on the tick that reaches zero.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
        self.remaining == 0.0
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

/// A forgiveness window opened by an event and consumed at most once.
///
/// Open while armed and `elapsed <= window` (both ends inclusive), so a request is
/// honoured exactly up to its window and refused one instant later.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GraceWindow {
    armed: bool,
    elapsed: f32,
    window: f32,
}

impl GraceWindow {
    pub fn arm(&mut self, window: f32) {
        self.armed = true;
        self.elapsed = 0.0;
        self.window = window.max(0.0);
    }

    pub fn consume(&mut self) {
        self.armed = false;
        self.elapsed = 0.0;
    }

    pub fn tick(&mut self, dt: f32) {
        if !self.armed {
            return;
        }
        self.elapsed += dt.max(0.0);
        if self.elapsed > self.window {
            self.armed = false;
        }
    }

    pub fn is_open(&self) -> bool {
        self.armed && self.elapsed <= self.window
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn remaining(&self) -> f32 {
        if self.armed {
            (self.window - self.elapsed).max(0.0)
        } else {
            0.0
        }
    }
}

/// Which timers reached zero during a frame advance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpiredTimers {
    pub jump_buffer: bool,
    pub invincibility: bool,
    pub stun_lock: bool,
    pub dash: bool,
}

/// Every timer a character owns.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimerSet {
    pub jump_buffer: GraceWindow,
    pub coyote: GraceWindow,
    pub dash_buffer: GraceWindow,
    pub invincibility: Countdown,
    pub stun_lock: Countdown,
    pub dash: Countdown,
    /// Counts up while the jump button is held during a jump
    pub variable_jump_held: f32,
    /// Counts up (fixed cadence) while the apex hang is active
    pub apex_hang: f32,
}

impl TimerSet {
    /// Advance the frame-cadence timers. `grounded_for_coyote` re-arms coyote time instead
    /// of letting it run down; `jump_held` accumulates the variable-jump hold time.
    pub fn advance(
        &mut self,
        dt: f32,
        grounded_for_coyote: bool,
        coyote_window: f32,
        jump_held: bool,
    ) -> ExpiredTimers {
        let dt = dt.max(0.0);

        let buffer_was_armed = self.jump_buffer.is_armed();
        self.jump_buffer.tick(dt);
        self.dash_buffer.tick(dt);

        if grounded_for_coyote {
            self.coyote.arm(coyote_window);
        } else {
            self.coyote.tick(dt);
        }

        if jump_held {
            self.variable_jump_held += dt;
        }

        ExpiredTimers {
            jump_buffer: buffer_was_armed && !self.jump_buffer.is_armed(),
            invincibility: self.invincibility.tick(dt),
            stun_lock: self.stun_lock.tick(dt),
            dash: self.dash.tick(dt),
        }
    }

    /// Drop every pending request and status timer (used on respawn).
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
