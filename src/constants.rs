/// Interaction and animation tuning constants.
///
/// These constants express intended behavior (time bases, clamp limits, easing
/// shape) and keep magic numbers out of the simulation code.
// Fraction of pointer velocity (px/s) added to the radial push of an impulse
pub const PUSH_VELOCITY_SCALE: f32 = 0.005;

// Pointer sampling (milliseconds)
pub const POINTER_THROTTLE_MS: f64 = 50.0;
pub const NOMINAL_FRAME_MS: f64 = 16.0;

// Inertia phase: motion ends once launch speed has decayed below this (px/s)
pub const INERTIA_STOP_SPEED: f32 = 1.0;
pub const INERTIA_MAX_SEC: f32 = 3.0; // cap for very weak resistance

// Settle phase easing, elastic out with overshoot
pub const ELASTIC_AMPLITUDE: f32 = 1.0;
pub const ELASTIC_PERIOD: f32 = 0.75;

// Lattice bounds: smallest dot pitch a config may ask for (px) and the most
// dots a single surface will hold
pub const MIN_CELL_PX: f32 = 1.0;
pub const MAX_LATTICE_DOTS: usize = 1 << 22;

// Largest frame step fed to timelines (seconds); hidden tabs resume smoothly
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

// Canvas fill-style strings kept before the cache is flushed
pub const STYLE_CACHE_LIMIT: usize = 1024;
