use crate::color::Rgb;
use crate::constants::STYLE_CACHE_LIMIT;
use crate::surface::Surface;
use fnv::FnvHashMap;
use glam::Vec2;
use std::f64::consts::TAU;
use web_sys as web;

/// 2D canvas drawing in CSS pixels. The dot outline is built once as a
/// `Path2D` and translated per dot.
pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
    css_size: Vec2,
    dot_path: Option<(f32, web::Path2d)>,
    styles: FnvHashMap<Rgb, String>,
}

impl CanvasSurface {
    pub fn new(ctx: web::CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            css_size: Vec2::ZERO,
            dot_path: None,
            styles: FnvHashMap::default(),
        }
    }

    /// Resizing the backing store resets the context, so the DPR scale is
    /// applied again here.
    pub fn resize(&mut self, css: Vec2, dpr: f64) {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        self.css_size = css;
    }

    fn ensure_path(&mut self, radius: f32) {
        if matches!(&self.dot_path, Some((r, _)) if *r == radius) {
            return;
        }
        self.dot_path = match web::Path2d::new() {
            Ok(path) => match path.arc(0.0, 0.0, radius.max(0.0) as f64, 0.0, TAU) {
                Ok(()) => Some((radius, path)),
                Err(e) => {
                    log::warn!("[canvas] arc failed: {:?}", e);
                    None
                }
            },
            Err(e) => {
                log::warn!("[canvas] Path2D unavailable: {:?}", e);
                None
            }
        };
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.css_size.x as f64, self.css_size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        self.ensure_path(radius);
        let Some((_, path)) = &self.dot_path else {
            return;
        };
        if self.styles.len() >= STYLE_CACHE_LIMIT && !self.styles.contains_key(&color) {
            self.styles.clear();
        }
        let style = self.styles.entry(color).or_insert_with(|| color.to_css());
        self.ctx.save();
        _ = self.ctx.translate(center.x as f64, center.y as f64);
        self.ctx.set_fill_style_str(style);
        self.ctx.fill_with_path_2d(path);
        self.ctx.restore();
    }
}
