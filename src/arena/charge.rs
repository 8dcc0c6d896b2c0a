//! Hold-to-charge attack state machine.
//!
//! `Idle → Charging → (released charged | released early) → Idle`, plus
//! `Charging → cancelled → Idle`. Time is passed in as monotonic milliseconds.

/// Hold time needed for a fully charged hit.
pub const CHARGE_DURATION_MS: f64 = 2000.0;
/// Damage multiplier of a fully charged hit.
pub const CHARGED_MULTIPLIER: u64 = 5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChargePhase {
    Idle,
    Charging {
        started_at_ms: f64,
        /// One-way latch: once set, stays set until release or cancel.
        fully_charged: bool,
    },
}

/// How a release resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Held for the full duration: amplified hit.
    Charged,
    /// Released too early: one normal hit.
    Early,
    /// Nothing was charging.
    Ignored,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChargeState {
    phase: ChargePhase,
}

impl Default for ChargeState {
    fn default() -> Self {
        Self {
            phase: ChargePhase::Idle,
        }
    }
}

impl ChargeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ChargePhase {
        self.phase
    }

    pub fn is_charging(&self) -> bool {
        matches!(self.phase, ChargePhase::Charging { .. })
    }

    pub fn is_fully_charged(&self) -> bool {
        matches!(
            self.phase,
            ChargePhase::Charging {
                fully_charged: true,
                ..
            }
        )
    }

    /// Start charging. A press while already charging keeps the original start.
    pub fn begin(&mut self, now_ms: f64) {
        if self.is_charging() {
            return;
        }
        self.phase = ChargePhase::Charging {
            started_at_ms: now_ms,
            fully_charged: false,
        };
    }

    /// Charge progress in `[0, 1]`; 0 when idle.
    pub fn progress(&self, now_ms: f64) -> f64 {
        match self.phase {
            ChargePhase::Idle => 0.0,
            ChargePhase::Charging {
                fully_charged: true,
                ..
            } => 1.0,
            ChargePhase::Charging { started_at_ms, .. } => {
                ((now_ms - started_at_ms) / CHARGE_DURATION_MS).clamp(0.0, 1.0)
            }
        }
    }

    /// Latch the charge if the hold time has elapsed.
    /// Returns true only on the step the latch flips.
    pub fn update(&mut self, now_ms: f64) -> bool {
        if let ChargePhase::Charging {
            started_at_ms,
            fully_charged: false,
        } = self.phase
        {
            if now_ms - started_at_ms >= CHARGE_DURATION_MS {
                self.phase = ChargePhase::Charging {
                    started_at_ms,
                    fully_charged: true,
                };
                return true;
            }
        }
        false
    }

    /// Resolve the charge and return to idle.
    ///
    /// The latch is re-evaluated against `now_ms` first, so a hold of at least
    /// the full duration is charged even if no frame ran in between.
    pub fn release(&mut self, now_ms: f64) -> ReleaseOutcome {
        if !self.is_charging() {
            return ReleaseOutcome::Ignored;
        }
        self.update(now_ms);
        let outcome = if self.is_fully_charged() {
            ReleaseOutcome::Charged
        } else {
            ReleaseOutcome::Early
        };
        self.phase = ChargePhase::Idle;
        outcome
    }

    /// Drop any charge without resolving it. Returns true if one was dropped.
    pub fn cancel(&mut self) -> bool {
        let was_charging = self.is_charging();
        self.phase = ChargePhase::Idle;
        was_charging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let c = ChargeState::new();
        assert_eq!(c.phase(), ChargePhase::Idle);
        assert!(!c.is_charging());
        assert!((c.progress(5000.0) - 0.0).abs() < 0.001);
    }

    #[test]
    fn progress_grows_linearly_then_caps() {
        let mut c = ChargeState::new();
        c.begin(1000.0);
        assert!((c.progress(1000.0) - 0.0).abs() < 0.001);
        assert!((c.progress(2000.0) - 0.5).abs() < 0.001);
        assert!((c.progress(9000.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn update_latches_once() {
        let mut c = ChargeState::new();
        c.begin(0.0);
        assert!(!c.update(1999.0));
        assert!(!c.is_fully_charged());
        assert!(c.update(2000.0));
        assert!(c.is_fully_charged());
        assert!(!c.update(2500.0));
        assert!(c.is_fully_charged());
    }

    #[test]
    fn release_early_is_normal_hit() {
        let mut c = ChargeState::new();
        c.begin(0.0);
        assert_eq!(c.release(10.0), ReleaseOutcome::Early);
        assert!(!c.is_charging());
    }

    #[test]
    fn release_after_full_hold_is_charged_without_frames() {
        let mut c = ChargeState::new();
        c.begin(0.0);
        assert_eq!(c.release(2000.0), ReleaseOutcome::Charged);
        assert_eq!(c.phase(), ChargePhase::Idle);
    }

    #[test]
    fn release_when_idle_is_ignored() {
        let mut c = ChargeState::new();
        assert_eq!(c.release(100.0), ReleaseOutcome::Ignored);
    }

    #[test]
    fn cancel_clears_latch() {
        let mut c = ChargeState::new();
        c.begin(0.0);
        c.update(3000.0);
        assert!(c.cancel());
        assert!(!c.is_fully_charged());
        assert!(!c.cancel());
        // A fresh press after cancel starts from zero.
        c.begin(4000.0);
        assert_eq!(c.release(4100.0), ReleaseOutcome::Early);
    }

    #[test]
    fn second_press_keeps_original_start() {
        let mut c = ChargeState::new();
        c.begin(0.0);
        c.begin(1500.0);
        assert_eq!(c.release(2000.0), ReleaseOutcome::Charged);
    }
}
