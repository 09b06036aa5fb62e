/// One-shot countdown timer.
///
/// Whoever owns the value owns the pending callback: it fires only through
/// `tick`, so dropping or replacing the timer cancels it. Holders keep it in
/// an `Option` and take it on teardown.
#[derive(Debug, Clone, PartialEq)]
pub struct OneShot {
    duration: f32,
    elapsed: f32,
    fired: bool,
}

impl OneShot {
    /// Expiry tolerance absorbing f32 accumulation error over many small steps.
    const EPSILON: f32 = 1.0e-4;

    /// Create a timer that expires after `duration` seconds.
    pub fn new(duration: f32) -> Self {
        Self {
            duration: duration.max(0.0),
            elapsed: 0.0,
            fired: false,
        }
    }

    pub fn from_millis(millis: u32) -> Self {
        Self::new(millis as f32 / 1000.0)
    }

    /// Advance by `dt`. Returns true on the single tick that crosses expiry.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.fired {
            return false;
        }
        self.elapsed += dt.max(0.0);
        if self.elapsed + Self::EPSILON >= self.duration {
            self.fired = true;
            return true;
        }
        false
    }

    /// Whether the timer has yet to fire.
    pub fn is_pending(&self) -> bool {
        !self.fired
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed.min(self.duration)
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Normalized progress [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_at_expiry() {
        let mut t = OneShot::from_millis(700);
        assert!(!t.tick(0.5));
        assert!(t.tick(0.2));
        assert!(!t.tick(0.2));
        assert!(!t.is_pending());
    }

    #[test]
    fn survives_fixed_step_rounding() {
        let mut t = OneShot::from_millis(4500);
        let fired: usize = (0..270).filter(|_| t.tick(1.0 / 60.0)).count();
        assert_eq!(fired, 1);
    }

    #[test]
    fn does_not_fire_early() {
        let mut t = OneShot::from_millis(4500);
        let fired = (0..260).any(|_| t.tick(1.0 / 60.0));
        assert!(!fired);
        assert!(t.is_pending());
        assert!(t.progress() > 0.9 && t.progress() < 1.0);
    }

    #[test]
    fn zero_duration_fires_on_first_tick() {
        let mut t = OneShot::new(0.0);
        assert!(t.tick(0.0));
        assert_eq!(t.progress(), 1.0);
    }
}
