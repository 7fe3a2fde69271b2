//! Cooldown Timer для выстрелов
//!
//! Семантика local timer: `capture()` запоминает момент,
//! `elapsed(d)` — прошло ли ≥ d с последнего capture (или capture не было).
//! Запрос до истечения просто отбрасывается, очереди нет.

use bevy::prelude::*;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct ShootTimer {
    /// Simulated time последнего capture (None = ещё не стреляли)
    captured_at: Option<Duration>,
}

impl ShootTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self, now: Duration, duration: Duration) -> bool {
        match self.captured_at {
            None => true,
            Some(captured) => now.saturating_sub(captured) >= duration,
        }
    }

    pub fn capture(&mut self, now: Duration) {
        self.captured_at = Some(now);
    }

    /// elapsed + capture за один вызов: true = выстрел разрешён
    pub fn try_fire(&mut self, now: Duration, cooldown: Duration) -> bool {
        if !self.elapsed(now, cooldown) {
            return false;
        }
        self.capture(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOLDOWN: Duration = Duration::from_millis(350);

    #[test]
    fn test_never_captured_is_elapsed() {
        let timer = ShootTimer::new();
        assert!(timer.elapsed(Duration::ZERO, COOLDOWN));
    }

    #[test]
    fn test_second_shot_within_cooldown_dropped() {
        let mut timer = ShootTimer::new();
        assert!(timer.try_fire(Duration::from_millis(100), COOLDOWN));
        assert!(!timer.try_fire(Duration::from_millis(300), COOLDOWN));
        assert!(!timer.try_fire(Duration::from_millis(449), COOLDOWN));

        // Отброшенный запрос не сдвигает точку отсчёта
        assert!(timer.try_fire(Duration::from_millis(450), COOLDOWN));
    }

    #[test]
    fn test_capture_resets_reference_point() {
        let mut timer = ShootTimer::new();
        timer.capture(Duration::from_secs(1));
        assert!(!timer.elapsed(Duration::from_millis(1200), COOLDOWN));
        assert!(timer.elapsed(Duration::from_millis(1350), COOLDOWN));
    }
}
