use crate::frame::LoopControl;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// requestAnimationFrame loop that can be stopped from outside, or from
/// inside by returning `false` from the frame callback.
pub struct FrameLoop {
    tick: Tick,
    control: Rc<RefCell<LoopControl>>,
}

impl FrameLoop {
    pub fn start(mut on_frame: impl FnMut() -> bool + 'static) -> Self {
        let tick: Tick = Rc::new(RefCell::new(None));
        let control = Rc::new(RefCell::new(LoopControl::default()));
        let tick_clone = tick.clone();
        let control_tick = control.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if control_tick.borrow().is_cancelled() {
                return;
            }
            if !on_frame() {
                // The closure stays owned by `tick` until `cancel`.
                control_tick.borrow_mut().cancel();
                return;
            }
            if let Some(handle) = request_frame(&tick_clone) {
                control_tick.borrow_mut().scheduled(handle);
            }
        }) as Box<dyn FnMut()>));
        if let Some(handle) = request_frame(&tick) {
            control.borrow_mut().scheduled(handle);
        }
        Self { tick, control }
    }

    /// Safe to call more than once.
    pub fn cancel(&self) {
        if let Some(handle) = self.control.borrow_mut().cancel() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(handle);
            }
        }
        // Dropping the closure breaks the Rc cycle it holds on `tick`.
        self.tick.borrow_mut().take();
    }
}

fn request_frame(tick: &Tick) -> Option<i32> {
    let window = web::window()?;
    let tick = tick.borrow();
    let callback = tick.as_ref()?;
    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::error!("[frame] requestAnimationFrame failed: {:?}", e);
            None
        }
    }
}
