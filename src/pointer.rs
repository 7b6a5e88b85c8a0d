use crate::constants::NOMINAL_FRAME_MS;
use glam::Vec2;

/// Lets through at most one event per `min_interval_ms`.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    min_interval_ms: f64,
    last_emit_ms: Option<f64>,
}

impl RateLimiter {
    pub fn new(min_interval_ms: f64) -> Self {
        Self {
            min_interval_ms,
            last_emit_ms: None,
        }
    }

    /// Returns true and records `now_ms` when enough time has passed.
    pub fn admit(&mut self, now_ms: f64) -> bool {
        match self.last_emit_ms {
            Some(last) if now_ms - last < self.min_interval_ms => false,
            _ => {
                self.last_emit_ms = Some(now_ms);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.last_emit_ms = None;
    }
}

/// Pointer position in surface space plus velocity derived from successive
/// samples in viewport space. `position` is `None` while the pointer is off
/// the surface, which disables tinting and impulses downstream.
#[derive(Clone, Debug)]
pub struct PointerTracker {
    max_speed: f32,
    position: Option<Vec2>,
    velocity: Vec2,
    speed: f32,
    last_sample_ms: Option<f64>,
    last_client: Vec2,
}

impl PointerTracker {
    pub fn new(max_speed: f32) -> Self {
        Self {
            max_speed,
            position: None,
            velocity: Vec2::ZERO,
            speed: 0.0,
            last_sample_ms: None,
            last_client: Vec2::ZERO,
        }
    }

    /// Record a move at viewport coordinates `client`. `surface_origin` is the
    /// viewport position of the surface's top-left corner.
    pub fn sample(&mut self, client: Vec2, surface_origin: Vec2, now_ms: f64) {
        let dt = match self.last_sample_ms {
            Some(last) if now_ms - last > 0.0 => now_ms - last,
            _ => NOMINAL_FRAME_MS,
        };
        let mut velocity = (client - self.last_client) / dt as f32 * 1000.0;
        let mut speed = velocity.length();
        if speed > self.max_speed {
            velocity *= self.max_speed / speed;
            speed = self.max_speed;
        }
        self.last_sample_ms = Some(now_ms);
        self.last_client = client;
        self.velocity = velocity;
        self.speed = speed;
        self.position = Some(client - surface_origin);
    }

    /// Pointer left the surface. Sampling history is kept so re-entry
    /// measures velocity from the last known point.
    pub fn leave(&mut self) {
        self.position = None;
        self.velocity = Vec2::ZERO;
        self.speed = 0.0;
    }

    /// Forget everything, as when interaction is switched off.
    pub fn reset(&mut self) {
        self.leave();
        self.last_sample_ms = None;
        self.last_client = Vec2::ZERO;
    }

    #[inline]
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }
}
