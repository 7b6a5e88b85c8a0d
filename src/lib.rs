//! Interactive dot field: a centered lattice of dots that tint toward the
//! pointer, get knocked aside by fast sweeps, and spring back elastically.
//!
//! Everything except the `web` module is platform independent and runs on the
//! host; the browser glue only feeds events in and hands out a canvas.

pub mod color;
pub mod config;
pub mod constants;
pub mod ease;
pub mod field;
pub mod frame;
pub mod grid;
pub mod impulse;
pub mod pointer;
pub mod surface;
pub mod timeline;

#[cfg(target_arch = "wasm32")]
mod web;

pub use color::Rgb;
pub use config::{ConfigError, DotFieldConfig, RetriggerPolicy};
pub use field::DotField;
pub use grid::{Dot, ImpulseState, Lattice};
pub use surface::Surface;
