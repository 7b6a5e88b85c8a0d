use crate::constants::MAX_FRAME_DT_SEC;
use instant::Instant;

/// Frame-to-frame delta time, clamped so a stalled tab does not fast-forward
/// every timeline in one step.
#[derive(Debug, Default)]
pub struct FrameClock {
    last_instant: Option<Instant>,
}

impl FrameClock {
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// First tick returns 0.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = match self.last_instant {
            Some(last) if now > last => (now - last).as_secs_f32(),
            _ => 0.0,
        };
        self.last_instant = Some(now);
        dt.min(MAX_FRAME_DT_SEC)
    }
}

/// Bookkeeping for a self-rescheduling frame callback. Cancelling is
/// idempotent: the pending handle is handed out once and later schedules are
/// refused.
#[derive(Debug, Default)]
pub struct LoopControl {
    pending: Option<i32>,
    cancelled: bool,
}

impl LoopControl {
    /// Record the handle of the next requested frame.
    pub fn scheduled(&mut self, handle: i32) {
        if !self.cancelled {
            self.pending = Some(handle);
        }
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Stop the loop; returns the handle to cancel with the host, if any.
    pub fn cancel(&mut self) -> Option<i32> {
        self.cancelled = true;
        self.pending.take()
    }
}
