//! Monotonic millisecond clock for the frame loop.
//!
//! `draw_web()` calls at ~60fps with variable delta. The arena measures its
//! 2s windows (charge, hemorrhage) against the time this clock reports, never
//! against frame counts, so behaviour is identical at any frame rate.

/// Raw millisecond timestamp from the platform.
///
/// `performance.now()` in the browser; time since first call on the host.
pub fn platform_now_ms() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::sync::OnceLock;
        use std::time::Instant;
        static START: OnceLock<Instant> = OnceLock::new();
        START.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
    }
}

/// Guards against timestamps going backwards between samples.
pub struct MonotonicClock {
    /// Last reported time, None before the first sample.
    last_ms: Option<f64>,
    /// Delta between the last two reported samples.
    pub last_delta_ms: f64,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            last_ms: None,
            last_delta_ms: 0.0,
        }
    }

    /// Feed a raw timestamp; returns the monotonic time to use this frame.
    ///
    /// A sample earlier than the previous one (clock adjustment, bad input)
    /// is reported as the previous time. NaN is treated the same way.
    pub fn observe(&mut self, raw_ms: f64) -> f64 {
        let now = match self.last_ms {
            Some(prev) if !(raw_ms >= prev) => prev,
            Some(_) => raw_ms,
            None if raw_ms.is_nan() => 0.0,
            None => raw_ms,
        };
        self.last_delta_ms = self.last_ms.map(|prev| now - prev).unwrap_or(0.0);
        self.last_ms = Some(now);
        now
    }

    /// Sample the platform clock.
    pub fn now(&mut self) -> f64 {
        self.observe(platform_now_ms())
    }

    /// Last reported time without sampling, 0 before the first sample.
    pub fn last(&self) -> f64 {
        self.last_ms.unwrap_or(0.0)
    }
}
