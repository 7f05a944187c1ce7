//! Time controller for simulation playback

/// Fastest allowed playback, in simulated units per real second
pub const MAX_RATE: f32 = 1000.0;
/// Slowest magnitude `halve_rate` goes down to
pub const MIN_RATE: f32 = 1.0 / 1024.0;

/// Converts real frame time into simulated time
#[derive(Clone, Copy, Debug)]
pub struct TimeController {
    /// Simulated time units per real second.
    /// Negative rates run the system backwards.
    rate: f32,
    /// Is simulation paused?
    paused: bool,
    /// Total simulated time since start
    elapsed: f64,
}

impl TimeController {
    pub fn new() -> Self {
        Self::with_rate(rates::NORMAL)
    }

    pub fn with_rate(rate: f32) -> Self {
        let mut tc = Self {
            rate: rates::NORMAL,
            paused: false,
            elapsed: 0.0,
        };
        tc.set_rate(rate);
        tc
    }

    /// Get current rate
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Set simulation rate (clamped to ±`MAX_RATE`)
    pub fn set_rate(&mut self, rate: f32) {
        self.rate = rate.clamp(-MAX_RATE, MAX_RATE);
    }

    /// Double the rate. A stopped clock restarts at `rates::NORMAL`.
    pub fn double_rate(&mut self) {
        if self.rate == 0.0 {
            self.set_rate(rates::NORMAL);
        } else {
            self.set_rate(self.rate * 2.0);
        }
    }

    /// Halve the rate, never below `MIN_RATE` in magnitude
    pub fn halve_rate(&mut self) {
        let halved = self.rate * 0.5;
        if self.rate != 0.0 && halved.abs() < MIN_RATE {
            self.set_rate(MIN_RATE.copysign(self.rate));
        } else {
            self.set_rate(halved);
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Total simulated time accumulated so far
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Advance by real-world delta time.
    /// Returns the simulated delta to feed into the body system.
    pub fn tick(&mut self, real_dt_seconds: f32) -> f32 {
        if self.paused {
            return 0.0;
        }

        let sim_dt = real_dt_seconds * self.rate;
        self.elapsed += sim_dt as f64;
        sim_dt
    }
}

impl Default for TimeController {
    fn default() -> Self {
        Self::new()
    }
}

/// Preset time rates
pub mod rates {
    /// One simulated unit per real second
    pub const NORMAL: f32 = 1.0;
    pub const FAST: f32 = 4.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_scales_by_rate() {
        let mut tc = TimeController::with_rate(rates::FAST);
        assert_eq!(tc.tick(0.5), 2.0);
        assert_eq!(tc.elapsed(), 2.0);
    }

    #[test]
    fn test_pause_freezes_time() {
        let mut tc = TimeController::new();
        tc.toggle_pause();
        assert!(tc.is_paused());
        assert_eq!(tc.tick(1.0), 0.0);
        assert_eq!(tc.elapsed(), 0.0);

        tc.resume();
        assert_eq!(tc.tick(1.0), 1.0);
    }

    #[test]
    fn test_rate_is_clamped() {
        let mut tc = TimeController::new();
        tc.set_rate(1e9);
        assert_eq!(tc.rate(), MAX_RATE);
        tc.set_rate(-1e9);
        assert_eq!(tc.rate(), -MAX_RATE);
    }

    #[test]
    fn test_double_and_halve() {
        let mut tc = TimeController::new();
        tc.double_rate();
        tc.double_rate();
        assert_eq!(tc.rate(), 4.0);
        tc.halve_rate();
        assert_eq!(tc.rate(), 2.0);
    }

    #[test]
    fn test_reverse_rate() {
        let mut tc = TimeController::with_rate(-2.0);
        assert_eq!(tc.tick(0.5), -1.0);
        assert_eq!(tc.elapsed(), -1.0);
    }

    #[test]
    fn test_halving_never_stalls_the_clock() {
        let mut tc = TimeController::new();
        for _ in 0..200 {
            tc.halve_rate();
        }
        assert_eq!(tc.rate(), MIN_RATE);

        for _ in 0..200 {
            tc.double_rate();
        }
        assert_eq!(tc.rate(), MAX_RATE);
    }

    #[test]
    fn test_halving_keeps_reverse_direction() {
        let mut tc = TimeController::with_rate(-1.0);
        for _ in 0..50 {
            tc.halve_rate();
        }
        assert_eq!(tc.rate(), -MIN_RATE);
    }

    #[test]
    fn test_zero_rate_restarts_on_double() {
        let mut tc = TimeController::with_rate(0.0);
        assert_eq!(tc.tick(1.0), 0.0);
        tc.double_rate();
        assert_eq!(tc.rate(), rates::NORMAL);
        assert_eq!(tc.tick(1.0), 1.0);
    }
}
