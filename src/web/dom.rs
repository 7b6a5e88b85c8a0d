use crate::config::{ConfigError, DotFieldConfig};
use crate::surface::backing_size;
use anyhow::anyhow;
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

const CANVAS_STYLE: &str =
    "position:absolute;inset:0;width:100%;height:100%;pointer-events:none;display:block";

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// True when the primary input can hover precisely (a mouse, not touch).
pub fn supports_fine_pointer(window: &web::Window) -> bool {
    window
        .match_media("(pointer: fine)")
        .ok()
        .flatten()
        .map(|m| m.matches())
        .unwrap_or(false)
}

pub fn supports_resize_observer(window: &web::Window) -> bool {
    js_sys::Reflect::has(window, &"ResizeObserver".into()).unwrap_or(false)
}

/// Config from the container's `data-*` attributes.
pub fn read_config(container: &web::Element) -> Result<DotFieldConfig, ConfigError> {
    DotFieldConfig::from_attributes(|key| container.get_attribute(&format!("data-{key}")))
}

/// Append an overlay canvas that fills `container` and ignores the pointer.
pub fn create_overlay_canvas(
    document: &web::Document,
    container: &web::HtmlElement,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow!("create canvas: {:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow!("not a canvas: {:?}", e))?;
    _ = canvas.set_attribute("style", CANVAS_STYLE);
    _ = canvas.set_attribute("aria-hidden", "true");
    if let Some(window) = web::window() {
        let positioned = window
            .get_computed_style(container)
            .ok()
            .flatten()
            .and_then(|s| s.get_property_value("position").ok())
            .map(|p| p != "static")
            .unwrap_or(false);
        if !positioned {
            _ = container.style().set_property("position", "relative");
        }
    }
    container
        .append_child(&canvas)
        .map_err(|e| anyhow!("append canvas: {:?}", e))?;
    Ok(canvas)
}

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| anyhow!("getContext: {:?}", e))?
        .ok_or_else(|| anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow!("not a 2d context: {:?}", e))
}

/// CSS size of `container` in pixels.
#[inline]
pub fn css_size(container: &web::Element) -> Vec2 {
    let rect = container.get_bounding_client_rect();
    Vec2::new(rect.width() as f32, rect.height() as f32)
}

/// Viewport position of the element's top-left corner.
#[inline]
pub fn viewport_origin(el: &web::Element) -> Vec2 {
    let rect = el.get_bounding_client_rect();
    Vec2::new(rect.left() as f32, rect.top() as f32)
}

/// Match the canvas backing store to `css` at the device pixel ratio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, css: Vec2, dpr: f64) {
    let (w_px, h_px) = backing_size(css, dpr);
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", css.x));
    _ = style.set_property("height", &format!("{}px", css.y));
}
