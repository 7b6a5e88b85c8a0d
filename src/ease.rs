use crate::constants::{INERTIA_MAX_SEC, INERTIA_STOP_SPEED};
use glam::Vec2;
use std::f32::consts::TAU;

/// Elastic ease-out: overshoots the target, rings, and settles.
///
/// `amplitude` below 1 is treated as 1 with a proportionally shorter period,
/// otherwise the curve would not start at 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElasticOut {
    amplitude: f32,
    angular: f32,
    phase: f32,
}

impl ElasticOut {
    pub fn new(amplitude: f32, period: f32) -> Self {
        let period = if amplitude < 1.0 {
            period / amplitude.max(f32::EPSILON)
        } else {
            period
        };
        let amplitude = amplitude.max(1.0);
        Self {
            amplitude,
            angular: TAU / period,
            phase: period / TAU * (1.0 / amplitude).asin(),
        }
    }

    /// Eased progress for linear progress `p` in \[0, 1\].
    #[inline]
    pub fn apply(&self, p: f32) -> f32 {
        if p >= 1.0 {
            return 1.0;
        }
        if p <= 0.0 {
            return 0.0;
        }
        self.amplitude * 2f32.powf(-10.0 * p) * ((p - self.phase) * self.angular).sin() + 1.0
    }
}

/// Constant-deceleration glide: starts at `launch` velocity (px/s) and slows
/// by `resistance` px/s² until its speed drops below the stop threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Inertia {
    direction: Vec2,
    speed: f32,
    resistance: f32,
    duration: f32,
}

impl Inertia {
    pub fn new(launch: Vec2, resistance: f32) -> Self {
        let speed = launch.length();
        if !(speed > INERTIA_STOP_SPEED) || !speed.is_finite() {
            return Self {
                direction: Vec2::ZERO,
                speed: 0.0,
                resistance,
                duration: 0.0,
            };
        }
        let duration = if resistance > 0.0 {
            ((speed - INERTIA_STOP_SPEED) / resistance).min(INERTIA_MAX_SEC)
        } else {
            INERTIA_MAX_SEC
        };
        Self {
            direction: launch / speed,
            speed,
            resistance: resistance.max(0.0),
            duration,
        }
    }

    /// Seconds until the glide stops.
    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Distance covered after `t` seconds, clamped to the glide's duration.
    #[inline]
    pub fn displacement(&self, t: f32) -> Vec2 {
        let t = t.clamp(0.0, self.duration);
        self.direction * (self.speed * t - 0.5 * self.resistance * t * t)
    }

    /// Where the glide comes to rest.
    #[inline]
    pub fn rest(&self) -> Vec2 {
        self.displacement(self.duration)
    }
}
