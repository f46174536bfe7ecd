//! Supporting counters for the controller state machine.
//!
//! Two counters feed the transition function: a reloadable cycle counter
//! measuring time spent in the current state, and a free-running refresh
//! counter measuring time since the last refresh.

/// Reloadable cycle counter.
///
/// Measures elapsed cycles since the owning state was entered. Resets to
/// zero on the cycle the state changes; otherwise increments by one every
/// cycle, saturating at its configured maximum (no wraparound).
#[derive(Debug, Clone, Copy)]
pub struct CycleCounter {
    count: u32,
    max: u32,
}

impl CycleCounter {
    /// Creates a counter saturating at `max`.
    pub fn new(max: u32) -> Self {
        Self { count: 0, max }
    }

    /// Current count.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Advances the counter by one cycle and returns the new count.
    ///
    /// `reset` signals that the owning state changed this cycle.
    pub fn tick(&mut self, reset: bool) -> u32 {
        self.count = if reset {
            0
        } else {
            self.count.saturating_add(1).min(self.max)
        };
        self.count
    }
}

/// Free-running refresh counter.
///
/// Increments every cycle unless explicitly cleared by the controller. The
/// `due` signal rises `margin` cycles before the refresh interval expires,
/// where `margin` covers the worst-case path out of and back to idle, and
/// holds until the counter is cleared. The margin guarantees a refresh can
/// always start before the retention deadline, even with a transaction in
/// flight when it falls due.
#[derive(Debug, Clone, Copy)]
pub struct RefreshCounter {
    count: u32,
    due_at: u32,
}

impl RefreshCounter {
    /// Creates a counter for a refresh `interval` with a command-path
    /// `margin`, both in cycles. Requires `interval > margin`; the
    /// configuration layer rejects anything else before construction.
    pub fn new(interval: u32, margin: u32) -> Self {
        Self {
            count: 0,
            due_at: interval - margin,
        }
    }

    /// Current count.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Whether a refresh is due.
    pub fn due(&self) -> bool {
        self.count >= self.due_at
    }

    /// Advances the counter by one cycle, or clears it when the controller
    /// signals a completed refresh.
    pub fn tick(&mut self, clear: bool) {
        self.count = if clear { 0 } else { self.count.saturating_add(1) };
    }
}
