use crate::config::{DotFieldConfig, RetriggerPolicy};
use crate::constants::PUSH_VELOCITY_SCALE;
use crate::grid::Dot;
use crate::pointer::PointerTracker;
use crate::timeline::{AnimationScheduler, Launch};
use glam::Vec2;

/// Decides which dots a pointer sample knocks and hands them to the scheduler.
#[derive(Clone, Debug)]
pub struct ImpulseEngine {
    speed_trigger: f32,
    proximity: f32,
    policy: RetriggerPolicy,
}

impl ImpulseEngine {
    pub fn new(speed_trigger: f32, proximity: f32, policy: RetriggerPolicy) -> Self {
        Self {
            speed_trigger,
            proximity,
            policy,
        }
    }

    pub fn from_config(cfg: &DotFieldConfig) -> Self {
        Self::new(cfg.speed_trigger, cfg.proximity, cfg.retrigger)
    }

    /// Away from the pointer, biased along the pointer's direction of travel.
    #[inline]
    pub fn push_vector(center: Vec2, pointer: Vec2, velocity: Vec2) -> Vec2 {
        (center - pointer) + velocity * PUSH_VELOCITY_SCALE
    }

    /// Whether a sample at `pointer` moving at `speed` reaches `center`.
    #[inline]
    pub fn in_reach(&self, center: Vec2, pointer: Vec2, speed: f32) -> bool {
        speed > self.speed_trigger && center.distance(pointer) < self.proximity
    }

    /// Scan every dot against the latest sample. Returns how many timelines
    /// were started or restarted.
    pub fn evaluate(
        &self,
        dots: &mut [Dot],
        pointer: &PointerTracker,
        scheduler: &mut AnimationScheduler,
    ) -> usize {
        let Some(at) = pointer.position() else {
            return 0;
        };
        let speed = pointer.speed();
        if !(speed > self.speed_trigger) {
            return 0;
        }
        let velocity = pointer.velocity();
        let mut launched = 0;
        for (index, dot) in dots.iter_mut().enumerate() {
            if !self.in_reach(dot.center, at, speed) {
                continue;
            }
            if self.policy == RetriggerPolicy::Ignore && dot.impulse_active() {
                continue;
            }
            let push = Self::push_vector(dot.center, at, velocity);
            match scheduler.launch(index, dot, push, self.policy) {
                Launch::Started | Launch::Restarted => launched += 1,
                Launch::Queued | Launch::Ignored => {}
            }
        }
        if launched > 0 {
            log::trace!("[impulse] launched {} at ({:.0},{:.0})", launched, at.x, at.y);
        }
        launched
    }
}
