use glam::Vec2;

/// 8-bit RGB color as used by the canvas fill style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the `#` is optional, digits are case-insensitive).
    pub fn from_hex(text: &str) -> Option<Self> {
        let hex = text.strip_prefix('#').unwrap_or(text);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Per-channel linear blend toward `other`, rounded to the nearest step.
    /// `t` is clamped to \[0, 1\]; a non-finite `t` yields `self`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |a: u8, b: u8| {
            let v = a as f32 + (b as f32 - a as f32) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }

    pub fn to_css(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Blend weight for a dot at `center`: 1 at the pointer, falling linearly to
/// 0 at `radius`. `None` when the pointer is absent or out of reach.
#[inline]
pub fn proximity_weight(center: Vec2, pointer: Option<Vec2>, radius: f32) -> Option<f32> {
    let pointer = pointer?;
    if !(radius > 0.0) {
        return None;
    }
    let dsq = center.distance_squared(pointer);
    if !(dsq <= radius * radius) {
        return None;
    }
    Some((1.0 - dsq.sqrt() / radius).clamp(0.0, 1.0))
}

/// Color of one dot given the pointer position.
#[inline]
pub fn proximity_color(
    center: Vec2,
    pointer: Option<Vec2>,
    radius: f32,
    base: Rgb,
    active: Rgb,
) -> Rgb {
    match proximity_weight(center, pointer, radius) {
        Some(t) => base.lerp(active, t),
        None => base,
    }
}
