//! Per-dot impulse timelines.
//!
//! The scheduler owns every running timeline and is advanced once per frame by
//! whoever owns the dots. Each timeline drives exactly one dot through
//! push (inertia glide) then settle (elastic return to zero offset).

use crate::config::RetriggerPolicy;
use crate::constants::{ELASTIC_AMPLITUDE, ELASTIC_PERIOD};
use crate::ease::{ElasticOut, Inertia};
use crate::grid::{Dot, ImpulseState};
use fnv::FnvHashMap;
use glam::Vec2;
use smallvec::SmallVec;

/// Outcome of asking the scheduler to launch an impulse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Launch {
    Started,
    Restarted,
    Queued,
    Ignored,
}

#[derive(Clone, Copy, Debug)]
enum Motion {
    Push { origin: Vec2, glide: Inertia },
    Settle { from: Vec2 },
}

#[derive(Clone, Debug)]
struct Timeline {
    motion: Motion,
    elapsed: f32,
    queued: Option<Vec2>,
}

impl Timeline {
    fn push(origin: Vec2, launch: Vec2, resistance: f32) -> Self {
        Self {
            motion: Motion::Push {
                origin,
                glide: Inertia::new(launch, resistance),
            },
            elapsed: 0.0,
            queued: None,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Tuning {
    resistance: f32,
    return_duration: f32,
    ease: ElasticOut,
}

#[derive(Debug)]
pub struct AnimationScheduler {
    timelines: FnvHashMap<usize, Timeline>,
    tuning: Tuning,
}

impl AnimationScheduler {
    pub fn new(resistance: f32, return_duration: f32) -> Self {
        Self {
            timelines: FnvHashMap::default(),
            tuning: Tuning {
                resistance,
                return_duration: return_duration.max(0.0),
                ease: ElasticOut::new(ELASTIC_AMPLITUDE, ELASTIC_PERIOD),
            },
        }
    }

    #[inline]
    pub fn is_active(&self, index: usize) -> bool {
        self.timelines.contains_key(&index)
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.timelines.len()
    }

    /// Launch an impulse on `dot` (stored at `index`) with initial velocity
    /// `push`. A dot with a running timeline is handled per `policy`.
    pub fn launch(
        &mut self,
        index: usize,
        dot: &mut Dot,
        push: Vec2,
        policy: RetriggerPolicy,
    ) -> Launch {
        let resistance = self.tuning.resistance;
        match self.timelines.get_mut(&index) {
            None => {
                self.timelines
                    .insert(index, Timeline::push(dot.offset, push, resistance));
                dot.state = ImpulseState::Pushing;
                Launch::Started
            }
            Some(timeline) => match policy {
                RetriggerPolicy::Ignore => Launch::Ignored,
                RetriggerPolicy::Restart => {
                    *timeline = Timeline::push(dot.offset, push, resistance);
                    dot.state = ImpulseState::Pushing;
                    Launch::Restarted
                }
                RetriggerPolicy::Queue => {
                    timeline.queued = Some(push);
                    Launch::Queued
                }
            },
        }
    }

    /// Move every running timeline forward by `dt` seconds. Returns the
    /// indices of dots that came to rest during this step.
    pub fn advance(&mut self, dt: f32, dots: &mut [Dot]) -> SmallVec<[usize; 8]> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let tuning = self.tuning;
        let mut settled = SmallVec::new();
        self.timelines.retain(|&index, timeline| {
            // A timeline whose dot vanished must not touch anything.
            let Some(dot) = dots.get_mut(index) else {
                return false;
            };
            if step(timeline, dot, dt, &tuning) {
                true
            } else {
                settled.push(index);
                false
            }
        });
        settled
    }

    /// Cancel every timeline without touching dot state; used when the dots
    /// themselves are about to be discarded.
    pub fn clear(&mut self) {
        if !self.timelines.is_empty() {
            log::debug!("[timeline] cancelled {} timelines", self.timelines.len());
        }
        self.timelines.clear();
    }
}

// Returns false once the dot has settled and the timeline is done.
fn step(timeline: &mut Timeline, dot: &mut Dot, dt: f32, tuning: &Tuning) -> bool {
    let mut t = timeline.elapsed + dt;
    loop {
        match timeline.motion {
            Motion::Push { origin, glide } => {
                if t < glide.duration() {
                    dot.offset = origin + glide.displacement(t);
                    timeline.elapsed = t;
                    return true;
                }
                t -= glide.duration();
                let from = origin + glide.rest();
                dot.offset = from;
                dot.state = ImpulseState::Settling;
                timeline.motion = Motion::Settle { from };
            }
            Motion::Settle { from } => {
                if t < tuning.return_duration {
                    let eased = tuning.ease.apply(t / tuning.return_duration);
                    dot.offset = from * (1.0 - eased);
                    timeline.elapsed = t;
                    return true;
                }
                dot.offset = Vec2::ZERO;
                dot.state = ImpulseState::AtRest;
                return match timeline.queued.take() {
                    Some(push) => {
                        *timeline = Timeline::push(Vec2::ZERO, push, tuning.resistance);
                        dot.state = ImpulseState::Pushing;
                        true
                    }
                    None => false,
                };
            }
        }
    }
}
