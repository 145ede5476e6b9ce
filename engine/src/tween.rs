//! Tick-driven interpolation.
//!
//! A `Tween` is plain state: the caller advances it with the frame delta and reads the value for
//! the current elapsed fraction. The final value is always exactly `to`, regardless of how the
//! frame deltas line up with the duration.

use std::time::Duration;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(self, to: Self, t: f32) -> Self {
        Vec2::lerp(self, to, t)
    }
}

impl Lerp for Vec3 {
    fn lerp(self, to: Self, t: f32) -> Self {
        Vec3::lerp(self, to, t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tween<T> {
    from: T,
    to: T,
    duration: Duration,
    elapsed: Duration,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    pub fn from(&self) -> T {
        self.from
    }

    pub fn to(&self) -> T {
        self.to
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }

    /// Elapsed fraction in `0.0..=1.0`. Zero-length tweens report 1.0.
    pub fn fraction(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn value(&self) -> T {
        if self.is_finished() {
            self.to
        } else {
            self.from.lerp(self.to, self.fraction())
        }
    }

    /// Advances by `dt` and returns the value for the new elapsed fraction.
    pub fn advance(&mut self, dt: Duration) -> T {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        self.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tween_interpolates_linearly() {
        let mut t = Tween::new(0.0f32, 1.0, Duration::from_secs(1));
        assert_eq!(t.value(), 0.0);

        let v = t.advance(Duration::from_millis(250));
        assert!((v - 0.25).abs() < 1e-6, "expected 0.25, got {v}");
        assert!(!t.is_finished());
    }

    #[test]
    fn tween_lands_exactly_on_target() {
        let from = Vec3::new(1.0, 2.0, 0.0);
        let to = Vec3::new(-3.0, 0.5, 0.0);
        let mut t = Tween::new(from, to, Duration::from_millis(100));
        for _ in 0..7 {
            t.advance(Duration::from_millis(16));
        }
        assert!(t.is_finished());
        assert_eq!(t.value(), to);
        assert_eq!(t.elapsed(), Duration::from_millis(100));
    }

    #[test]
    fn zero_length_tween_is_finished_immediately() {
        let t = Tween::new(Vec2::ZERO, Vec2::ONE, Duration::ZERO);
        assert!(t.is_finished());
        assert_eq!(t.fraction(), 1.0);
        assert_eq!(t.value(), Vec2::ONE);
    }
}
