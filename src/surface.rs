use crate::color::Rgb;
use glam::Vec2;

/// Drawing target for one frame of the field, in CSS pixels.
pub trait Surface {
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb);
}

/// Backing-store pixel size for a surface of `css` size at device pixel
/// ratio `dpr`. An unusable ratio counts as 1.
#[inline]
pub fn backing_size(css: Vec2, dpr: f64) -> (u32, u32) {
    let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    let px = |v: f32| (v.max(0.0) as f64 * dpr).floor() as u32;
    (px(css.x), px(css.y))
}
