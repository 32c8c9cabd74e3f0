//! Rest / target / current state for continuous controllers.

use serde::{Deserialize, Serialize};

/// How a continuous controller writes its target into the property
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Interpolation {
    /// Move toward the target on every render tick
    Smoothed {
        /// Fraction of the remaining distance covered per second
        change_speed: f32,
    },
    /// Write the target as soon as it is computed; ticks do nothing
    Instantaneous,
}

impl Default for Interpolation {
    fn default() -> Self {
        Self::Smoothed { change_speed: 4.0 }
    }
}

/// Linear step from `current` toward `target` by factor `t`.
///
/// `t` is clamped to [0, 1], so the result never passes the target and lands
/// exactly on it once `t >= 1`.
pub fn approach(current: f32, target: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t >= 1.0 {
        return target;
    }
    let (lo, hi) = if current <= target {
        (current, target)
    } else {
        (target, current)
    };
    // Rounding in the lerp can land a hair past the target
    (current + (target - current) * t).max(lo).min(hi)
}

/// Per-dimension smoothing state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingState<const N: usize> {
    original: [f32; N],
    /// Value the property is converging toward
    pub target: [f32; N],
    /// Value last written to the property
    pub current: [f32; N],
}

impl<const N: usize> SmoothingState<N> {
    /// Capture the rest value; target and current start there too
    pub fn capture(rest: [f32; N]) -> Self {
        Self {
            original: rest,
            target: rest,
            current: rest,
        }
    }

    /// Rest value captured at activation
    pub fn original(&self) -> [f32; N] {
        self.original
    }

    /// Advance every dimension toward its target
    pub fn step(&mut self, dt: f32, change_speed: f32) -> [f32; N] {
        let t = dt * change_speed;
        for d in 0..N {
            self.current[d] = approach(self.current[d], self.target[d], t);
        }
        self.current
    }

    /// Collapse target and current onto the rest value
    pub fn reset(&mut self) {
        self.target = self.original;
        self.current = self.original;
    }

    /// Replace the rest value
    pub fn recapture(&mut self, rest: [f32; N]) {
        *self = Self::capture(rest);
    }
}
