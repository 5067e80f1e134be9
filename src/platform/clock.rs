//! Fixed timestep accumulator
//!
//! Converts `requestAnimationFrame` timestamps (milliseconds) into a whole
//! number of `SIM_DT` steps. Long frames are clamped and capped so a stalled
//! tab never triggers a burst of catch-up ticks.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `now_ms` and return how many steps to simulate
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let Some(last_ms) = self.last_ms.replace(now_ms) else {
            return 0;
        };

        let dt = ((now_ms - last_ms) / 1000.0) as f32;
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        self.accumulator += dt.min(MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        // Drop whatever the substep cap left behind
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        steps
    }

    /// Forget the previous timestamp (e.g. after the tab was hidden)
    pub fn reset(&mut self) {
        self.last_ms = None;
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_frame_has_no_steps() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(12_345.0), 0);
    }

    #[test]
    fn test_steady_sixty_hz() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        let frame_ms = 1000.0 / 60.0;
        let total: u32 = (1..=60).map(|i| clock.advance(i as f64 * frame_ms)).sum();
        // Float drift may leave the last step in the accumulator
        assert!((59..=60).contains(&total));
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        // Five seconds away is treated as 0.1s, i.e. six steps
        let steps = clock.advance(5_000.0);
        assert!((5..=6).contains(&steps));
        assert!(steps <= MAX_SUBSTEPS);
    }

    #[test]
    fn test_time_going_backwards_is_ignored() {
        let mut clock = FrameClock::new();
        clock.advance(1_000.0);
        assert_eq!(clock.advance(900.0), 0);
        assert_eq!(clock.advance(f64::NAN), 0);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        clock.advance(50.0);
        clock.reset();
        assert_eq!(clock.advance(10_000.0), 0);
    }

    proptest! {
        #[test]
        fn prop_steps_bounded(frames in prop::collection::vec(0.0f64..500.0, 1..100)) {
            let mut clock = FrameClock::new();
            let mut now = 0.0;
            clock.advance(now);
            for delta in frames {
                now += delta;
                prop_assert!(clock.advance(now) <= MAX_SUBSTEPS);
            }
        }
    }
}
