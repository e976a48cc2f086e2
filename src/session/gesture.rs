use std::time::{Duration, Instant};

pub const DEFAULT_UNLOCK_WINDOW: Duration = Duration::from_millis(2000);
pub const DEFAULT_UNLOCK_ACTIVATIONS: u32 = 3;

/// Counts rapid repeated activations of the site logo.
///
/// A gap longer than `window` between two activations resets progress, which
/// is the same as a reset timer restarted on every activation and firing
/// after `window` of inactivity.
#[derive(Debug, Clone)]
pub struct UnlockGesture {
    window: Duration,
    required: u32,
    count: u32,
    last_activation: Option<Instant>,
}

impl Default for UnlockGesture {
    fn default() -> Self {
        Self::new(DEFAULT_UNLOCK_WINDOW, DEFAULT_UNLOCK_ACTIVATIONS)
    }
}

impl UnlockGesture {
    pub fn new(window: Duration, required: u32) -> Self {
        Self {
            window,
            required: required.max(1),
            count: 0,
            last_activation: None,
        }
    }

    /// Registers one activation at `now`. Returns `true` when this activation
    /// completes the gesture; the counter is then back at zero.
    pub fn activate(&mut self, now: Instant) -> bool {
        if let Some(previous) = self.last_activation {
            if now.saturating_duration_since(previous) > self.window {
                self.count = 0;
            }
        }

        self.last_activation = Some(now);
        self.count += 1;

        if self.count >= self.required {
            self.count = 0;
            return true;
        }

        false
    }

    /// Activations counted so far, as seen at `now`.
    pub fn progress(&self, now: Instant) -> u32 {
        match self.last_activation {
            Some(previous) if now.saturating_duration_since(previous) > self.window => 0,
            _ => self.count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(base: Instant, millis: u64) -> Instant {
        base + Duration::from_millis(millis)
    }

    #[test]
    fn three_quick_activations_complete() {
        let base = Instant::now();
        let mut gesture = UnlockGesture::default();

        assert!(!gesture.activate(at(base, 0)));
        assert!(!gesture.activate(at(base, 1000)));
        assert!(gesture.activate(at(base, 1900)));
        assert_eq!(gesture.progress(at(base, 1900)), 0);
    }

    #[test]
    fn long_gap_resets_progress() {
        let base = Instant::now();
        let mut gesture = UnlockGesture::default();

        assert!(!gesture.activate(at(base, 0)));
        assert!(!gesture.activate(at(base, 2500)));
        assert!(!gesture.activate(at(base, 3000)));
        assert_eq!(gesture.progress(at(base, 3000)), 2);

        assert!(gesture.activate(at(base, 3500)));
    }

    #[test]
    fn slow_but_steady_activations_still_complete() {
        let base = Instant::now();
        let mut gesture = UnlockGesture::default();

        assert!(!gesture.activate(at(base, 0)));
        assert!(!gesture.activate(at(base, 1999)));
        assert!(gesture.activate(at(base, 3998)));
    }

    #[test]
    fn gap_of_exactly_the_window_keeps_progress() {
        let base = Instant::now();
        let mut gesture = UnlockGesture::default();

        gesture.activate(at(base, 0));
        gesture.activate(at(base, 2000));
        assert!(gesture.activate(at(base, 4000)));
    }

    #[test]
    fn progress_decays_after_idle_window() {
        let base = Instant::now();
        let mut gesture = UnlockGesture::default();

        gesture.activate(at(base, 0));
        gesture.activate(at(base, 500));
        assert_eq!(gesture.progress(at(base, 1000)), 2);
        assert_eq!(gesture.progress(at(base, 2600)), 0);
    }

    #[test]
    fn custom_activation_count() {
        let base = Instant::now();
        let mut gesture = UnlockGesture::new(Duration::from_secs(1), 2);

        assert!(!gesture.activate(at(base, 0)));
        assert!(gesture.activate(at(base, 900)));
        assert!(!gesture.activate(at(base, 1000)));
    }
}
