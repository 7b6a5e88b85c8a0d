//! Browser glue: mounts a [`DotField`] over a container element.

use crate::field::DotField;
use crate::frame::FrameClock;
use anyhow::anyhow;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod canvas;
mod dom;
mod events;
mod frame;

use canvas::CanvasSurface;
use events::{Listener, ResizeWatch};
use frame::FrameLoop;

const AUTO_MOUNT_SELECTOR: &str = "[data-dot-field]";

thread_local! {
    // Fields mounted at start; dropped by `unmountDotField`, `destroyAll`, or
    // once their container leaves the document.
    static AUTO_MOUNTED: RefCell<Vec<DotFieldHandle>> = const { RefCell::new(Vec::new()) };
}

struct Mounted {
    field: DotField,
    surface: CanvasSurface,
    clock: FrameClock,
}

/// A mounted field. Call `destroy()` to stop it and remove its canvas.
#[wasm_bindgen]
pub struct DotFieldHandle {
    state: Rc<RefCell<Mounted>>,
    container: web::HtmlElement,
    canvas: web::HtmlCanvasElement,
    frame_loop: FrameLoop,
    pointer_listeners: Vec<Listener>,
    resize: Option<ResizeWatch>,
    destroyed: bool,
}

#[wasm_bindgen]
impl DotFieldHandle {
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.frame_loop.cancel();
        self.pointer_listeners.clear();
        self.resize = None;
        self.state.borrow_mut().field.halt();
        self.canvas.remove();
        log::info!("[dot-field] destroyed");
    }

    #[wasm_bindgen(js_name = setInteractive)]
    pub fn set_interactive(&self, on: bool) {
        self.state.borrow_mut().field.set_interactive(on);
    }

    #[wasm_bindgen(getter, js_name = dotCount)]
    pub fn dot_count(&self) -> usize {
        self.state.borrow().field.dots().len()
    }
}

impl Drop for DotFieldHandle {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    let Some(document) = dom::window_document() else {
        return Ok(());
    };
    let nodes = document.query_selector_all(AUTO_MOUNT_SELECTOR)?;
    for i in 0..nodes.length() {
        let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<web::HtmlElement>().ok()) else {
            continue;
        };
        match mount(el) {
            Ok(handle) => AUTO_MOUNTED.with(|m| m.borrow_mut().push(handle)),
            Err(e) => log::error!("[dot-field] mount error: {:?}", e),
        }
    }
    Ok(())
}

/// Destroy the auto-mounted field over `container`, if there is one.
#[wasm_bindgen(js_name = unmountDotField)]
pub fn unmount_dot_field(container: &web::HtmlElement) -> bool {
    let node: &web::Node = container;
    let removed: Vec<DotFieldHandle> = AUTO_MOUNTED.with(|m| {
        let mut mounted = m.borrow_mut();
        let (gone, kept): (Vec<_>, Vec<_>) = mounted
            .drain(..)
            .partition(|h| h.container.is_same_node(Some(node)));
        *mounted = kept;
        gone
    });
    // Handles drop here, outside the registry borrow.
    !removed.is_empty()
}

/// Destroy every auto-mounted field.
#[wasm_bindgen(js_name = destroyAll)]
pub fn destroy_all() {
    let all: Vec<DotFieldHandle> = AUTO_MOUNTED.with(|m| m.borrow_mut().drain(..).collect());
    if !all.is_empty() {
        log::info!("[dot-field] destroying {} mounted fields", all.len());
    }
}

// Drop auto-mounted fields whose canvas is no longer in the document.
fn prune_detached() {
    let detached: Vec<DotFieldHandle> = AUTO_MOUNTED.with(|m| {
        let mut mounted = m.borrow_mut();
        let (gone, kept): (Vec<_>, Vec<_>) =
            mounted.drain(..).partition(|h| !h.canvas.is_connected());
        *mounted = kept;
        gone
    });
    if !detached.is_empty() {
        log::info!("[dot-field] {} fields detached from the document", detached.len());
    }
}

// Runs the prune from a fresh task so no frame or listener closure is
// dropped while it is executing.
fn schedule_prune() {
    let Some(window) = web::window() else {
        return;
    };
    let callback = Closure::once_into_js(prune_detached);
    if let Err(e) = window.set_timeout_with_callback(callback.unchecked_ref()) {
        log::warn!("[dot-field] could not schedule cleanup: {:?}", e);
    }
}

/// Mount a field over `container`, configured from its `data-*` attributes.
#[wasm_bindgen(js_name = mountDotField)]
pub fn mount_dot_field(container: web::HtmlElement) -> Result<DotFieldHandle, JsValue> {
    mount(container).map_err(|e| JsValue::from_str(&format!("{:#}", e)))
}

fn mount(container: web::HtmlElement) -> anyhow::Result<DotFieldHandle> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow!("no document"))?;

    let config = dom::read_config(&container)?;
    let mut field = DotField::new(config)?;
    field.set_fine_pointer(dom::supports_fine_pointer(&window));

    let canvas = dom::create_overlay_canvas(&document, &container)?;
    let surface = CanvasSurface::new(dom::context_2d(&canvas)?);
    let state = Rc::new(RefCell::new(Mounted {
        field,
        surface,
        clock: FrameClock::default(),
    }));

    rebuild(&state, &container, &canvas);
    {
        let m = state.borrow();
        log::info!(
            "[dot-field] mounted: {} dots, {:.0}x{:.0} css px, dpr {:.2}, interactive={}",
            m.field.dots().len(),
            m.field.size().x,
            m.field.size().y,
            window.device_pixel_ratio(),
            m.field.is_interactive()
        );
    }

    let resize = {
        let state = state.clone();
        let container_resize = container.clone();
        let canvas_resize = canvas.clone();
        ResizeWatch::observe(
            &window,
            &container,
            dom::supports_resize_observer(&window),
            move || rebuild(&state, &container_resize, &canvas_resize),
        )
    };
    let resize = match resize {
        Ok(watch) => Some(watch),
        Err(e) => {
            log::warn!("[dot-field] resize tracking disabled: {:?}", e);
            None
        }
    };

    let pointer_listeners = wire_pointer(&window, &container, &canvas, &state);

    let frame_loop = {
        let state = state.clone();
        let canvas_frame = canvas.clone();
        FrameLoop::start(move || {
            if !canvas_frame.is_connected() {
                state.borrow_mut().field.halt();
                schedule_prune();
                return false;
            }
            let mut m = state.borrow_mut();
            let Mounted {
                field,
                surface,
                clock,
            } = &mut *m;
            let dt = clock.tick();
            field.frame(dt, surface);
            true
        })
    };

    Ok(DotFieldHandle {
        state,
        container,
        canvas,
        frame_loop,
        pointer_listeners,
        resize,
        destroyed: false,
    })
}

fn rebuild(
    state: &Rc<RefCell<Mounted>>,
    container: &web::HtmlElement,
    canvas: &web::HtmlCanvasElement,
) {
    let Some(window) = web::window() else {
        return;
    };
    let css = dom::css_size(container);
    let dpr = window.device_pixel_ratio();
    dom::sync_canvas_backing_size(canvas, css, dpr);
    let mut m = state.borrow_mut();
    m.surface.resize(css, dpr);
    m.field.resize(css);
}

fn wire_pointer(
    window: &web::Window,
    container: &web::HtmlElement,
    canvas: &web::HtmlCanvasElement,
    state: &Rc<RefCell<Mounted>>,
) -> Vec<Listener> {
    let mut listeners = Vec::new();
    // Listeners stay attached while non-interactive so setInteractive(true) works.
    if !dom::supports_fine_pointer(window) {
        return listeners;
    }

    let state_move = state.clone();
    let canvas_move = canvas.clone();
    let on_move = Listener::attach(window, "mousemove", true, move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let client = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
        state_move
            .borrow_mut()
            .field
            .pointer_move(client, instant::now(), || dom::viewport_origin(&canvas_move));
    });

    let state_leave = state.clone();
    let on_leave = Listener::attach(container, "mouseleave", true, move |_| {
        state_leave.borrow_mut().field.pointer_leave();
    });

    for listener in [on_move, on_leave] {
        match listener {
            Ok(l) => listeners.push(l),
            Err(e) => log::warn!("[dot-field] pointer wiring: {:?}", e),
        }
    }
    listeners
}
