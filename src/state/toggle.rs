//! Optimistic boolean toggle.
//!
//! A toggle shows a locally flipped value as soon as the user asks for it,
//! while the remote write is still in flight. The authoritative value only
//! comes from fetched data.

/// What to do with the displayed value when a remote write fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Leave the optimistic value on screen until the next refresh.
    #[default]
    KeepOptimistic,
    /// Restore the last authoritative value.
    Rollback,
}

impl FailurePolicy {
    /// Build a policy from the `rollback_on_failure` setting.
    pub fn from_rollback_flag(rollback: bool) -> Self {
        if rollback {
            FailurePolicy::Rollback
        } else {
            FailurePolicy::KeepOptimistic
        }
    }
}

/// A boolean that can be flipped ahead of remote confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptimisticToggle {
    /// Last value seen in fetched data.
    authoritative: bool,
    /// Value currently shown.
    displayed: bool,
    /// Incremented on every flip; identifies the latest request.
    generation: u64,
    /// The request for `generation` has not answered yet.
    in_flight: bool,
}

impl OptimisticToggle {
    /// Create a toggle from an authoritative value.
    pub fn new(value: bool) -> Self {
        Self {
            authoritative: value,
            displayed: value,
            generation: 0,
            in_flight: false,
        }
    }

    /// The value to render.
    pub fn displayed(&self) -> bool {
        self.displayed
    }

    /// Whether the displayed value differs from the fetched one.
    pub fn is_pending(&self) -> bool {
        self.displayed != self.authoritative
    }

    /// Flip the displayed value.
    ///
    /// Returns the new value and the generation tag of this request.
    pub fn flip(&mut self) -> (bool, u64) {
        self.displayed = !self.displayed;
        self.generation += 1;
        self.in_flight = true;
        (self.displayed, self.generation)
    }

    /// Feed a freshly fetched value.
    ///
    /// The displayed value follows it unless the latest flip is still
    /// waiting for its answer.
    pub fn sync(&mut self, value: bool) {
        self.authoritative = value;
        if !self.in_flight {
            self.displayed = value;
        }
    }

    /// Record a successful remote write for `generation`.
    pub fn settle(&mut self, generation: u64) {
        if generation == self.generation {
            self.in_flight = false;
        }
    }

    /// Apply a failed remote write for `generation`.
    ///
    /// Returns true if the displayed value changed. Failures of superseded
    /// requests are ignored.
    pub fn fail(&mut self, generation: u64, policy: FailurePolicy) -> bool {
        if generation != self.generation {
            return false;
        }
        self.in_flight = false;
        match policy {
            FailurePolicy::KeepOptimistic => false,
            FailurePolicy::Rollback => {
                let changed = self.displayed != self.authoritative;
                self.displayed = self.authoritative;
                changed
            }
        }
    }
}
