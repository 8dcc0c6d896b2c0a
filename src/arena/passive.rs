//! Upgrade-gated passive damage: the hemorrhage bleed tick and the
//! click-count burn.

/// Wall-clock interval between bleed ticks.
pub const HEMORRHAGE_INTERVAL_MS: f64 = 2000.0;
/// Damage, score and gold of one bleed tick.
pub const HEMORRHAGE_DAMAGE: u64 = 1;

/// Click-equivalents needed to trigger the burn.
pub const BURN_TRIGGER_CLICKS: u32 = 15;
/// Fraction of current health removed by the burn.
pub const BURN_HEALTH_FRACTION: f64 = 0.02;

/// Edge-triggered bleed timer. Missed intervals are never caught up.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HemorrhageTimer {
    last_tick_ms: Option<f64>,
}

impl HemorrhageTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when a tick is due at `now_ms`. The first poll after a
    /// reset always ticks.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        let due = match self.last_tick_ms {
            None => true,
            Some(last) => now_ms - last >= HEMORRHAGE_INTERVAL_MS,
        };
        if due {
            self.last_tick_ms = Some(now_ms);
        }
        due
    }

    pub fn reset(&mut self) {
        self.last_tick_ms = None;
    }
}

/// Counts click-equivalents towards the next burn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BurnCounter {
    clicks: u32,
}

impl BurnCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    /// Add `clicks` (1 per normal hit, 5 per charged hit). Returns true when
    /// the burn triggers; the counter then restarts at 0 and the overflow
    /// is dropped.
    pub fn register(&mut self, clicks: u32) -> bool {
        self.clicks = self.clicks.saturating_add(clicks);
        if self.clicks >= BURN_TRIGGER_CLICKS {
            self.clicks = 0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.clicks = 0;
    }
}

/// Burn damage for an enemy at `current_health`: 2%, at least 1.
pub fn burn_damage(current_health: i64) -> u64 {
    let fraction = (current_health.max(0) as f64 * BURN_HEALTH_FRACTION).floor() as u64;
    fraction.max(1)
}
