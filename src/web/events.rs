use anyhow::anyhow;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// An event listener that is removed again when dropped.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn attach(
        target: &web::EventTarget,
        kind: &'static str,
        passive: bool,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let options = web::AddEventListenerOptions::new();
        options.set_passive(passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|e| anyhow!("{} listener: {:?}", kind, e))?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Size-change notifications for the container: a `ResizeObserver` where the
/// browser has one, otherwise the window `resize` event.
pub enum ResizeWatch {
    Observer {
        observer: web::ResizeObserver,
        _callback: Closure<dyn FnMut(js_sys::Array)>,
    },
    Window(Listener),
}

impl ResizeWatch {
    pub fn observe(
        window: &web::Window,
        container: &web::Element,
        use_observer: bool,
        mut on_resize: impl FnMut() + 'static,
    ) -> anyhow::Result<Self> {
        if use_observer {
            let callback = Closure::wrap(Box::new(move |_entries: js_sys::Array| on_resize())
                as Box<dyn FnMut(js_sys::Array)>);
            let observer = web::ResizeObserver::new(callback.as_ref().unchecked_ref())
                .map_err(|e| anyhow!("ResizeObserver: {:?}", e))?;
            observer.observe(container);
            return Ok(Self::Observer {
                observer,
                _callback: callback,
            });
        }
        let listener = Listener::attach(window, "resize", true, move |_| on_resize())?;
        Ok(Self::Window(listener))
    }
}

impl Drop for ResizeWatch {
    fn drop(&mut self) {
        if let Self::Observer { observer, .. } = self {
            observer.disconnect();
        }
    }
}
