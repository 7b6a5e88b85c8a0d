//! The interactive dot field component.
//!
//! `DotField` owns the lattice, the pointer tracker and the impulse
//! timelines. Hosts feed it surface resizes, pointer moves and frame ticks;
//! it paints onto any [`Surface`].

use crate::color::proximity_color;
use crate::config::{ConfigError, DotFieldConfig};
use crate::constants::POINTER_THROTTLE_MS;
use crate::grid::{Dot, Lattice};
use crate::impulse::ImpulseEngine;
use crate::pointer::{PointerTracker, RateLimiter};
use crate::surface::Surface;
use crate::timeline::AnimationScheduler;
use glam::Vec2;

#[derive(Debug)]
pub struct DotField {
    config: DotFieldConfig,
    size: Vec2,
    lattice: Lattice,
    dots: Vec<Dot>,
    pointer: PointerTracker,
    throttle: RateLimiter,
    scheduler: AnimationScheduler,
    impulses: ImpulseEngine,
    fine_pointer: bool,
}

impl DotField {
    pub fn new(config: DotFieldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            size: Vec2::ZERO,
            lattice: Lattice::default(),
            dots: Vec::new(),
            pointer: PointerTracker::new(config.max_speed),
            throttle: RateLimiter::new(POINTER_THROTTLE_MS),
            scheduler: AnimationScheduler::new(config.resistance, config.return_duration),
            impulses: ImpulseEngine::from_config(&config),
            fine_pointer: true,
            config,
        })
    }

    pub fn config(&self) -> &DotFieldConfig {
        &self.config
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    /// Pointer-driven behavior is on only when configured and the device has
    /// a fine pointer.
    #[inline]
    pub fn is_interactive(&self) -> bool {
        self.config.interactive && self.fine_pointer
    }

    pub fn set_interactive(&mut self, on: bool) {
        self.config.interactive = on;
        self.sync_pointer_capability();
    }

    pub fn set_fine_pointer(&mut self, fine: bool) {
        self.fine_pointer = fine;
        self.sync_pointer_capability();
    }

    fn sync_pointer_capability(&mut self) {
        if !self.is_interactive() {
            self.pointer.reset();
            self.throttle.reset();
        }
    }

    /// Rebuild the lattice for a new surface size. All running timelines are
    /// cancelled before the old dots are dropped.
    pub fn resize(&mut self, size: Vec2) {
        self.scheduler.clear();
        self.size = size;
        self.lattice = Lattice::fit(size, self.config.dot_size, self.config.gap);
        self.dots = self.lattice.build_dots();
        log::debug!(
            "[dot-field] rebuilt {}x{} lattice for {:.0}x{:.0}",
            self.lattice.cols,
            self.lattice.rows,
            size.x,
            size.y
        );
    }

    /// Raw pointer move at viewport coordinates `client` and time `now_ms`.
    /// Moves inside the throttle window are dropped; `surface_origin` is only
    /// queried for samples that get through. Returns the number of impulses
    /// launched.
    pub fn pointer_move(
        &mut self,
        client: Vec2,
        now_ms: f64,
        surface_origin: impl FnOnce() -> Vec2,
    ) -> usize {
        if !self.is_interactive() || !self.throttle.admit(now_ms) {
            return 0;
        }
        self.pointer.sample(client, surface_origin(), now_ms);
        self.impulses
            .evaluate(&mut self.dots, &self.pointer, &mut self.scheduler)
    }

    /// Running impulses finish on their own; only new triggers stop.
    pub fn pointer_leave(&mut self) {
        self.pointer.leave();
    }

    /// Step every impulse timeline by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.scheduler.advance(dt, &mut self.dots);
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        surface.clear();
        let interactive = self.is_interactive();
        let pointer = if interactive {
            self.pointer.position()
        } else {
            None
        };
        let radius = self.config.dot_size / 2.0;
        for dot in &self.dots {
            let color = proximity_color(
                dot.center,
                pointer,
                self.config.proximity,
                self.config.base_color,
                self.config.active_color,
            );
            let at = if interactive {
                dot.position()
            } else {
                dot.center
            };
            surface.fill_circle(at, radius, color);
        }
    }

    /// One render-loop iteration.
    pub fn frame(&mut self, dt: f32, surface: &mut impl Surface) {
        self.advance(dt);
        self.draw(surface);
    }

    /// Cancel every timeline and put the dots back at rest.
    pub fn halt(&mut self) {
        self.scheduler.clear();
        for dot in &mut self.dots {
            *dot = Dot::at(dot.center);
        }
    }
}
