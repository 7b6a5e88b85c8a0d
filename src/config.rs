//! Caller-supplied visual and physics parameters.
//!
//! A config is fixed for the lifetime of a mounted field except for the
//! `interactive` master switch. In the browser it is read from `data-*`
//! attributes on the container, see [`DotFieldConfig::from_attributes`].

use crate::color::Rgb;
use crate::constants::MIN_CELL_PX;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("`{key}` expects a number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("`{key}` expects true or false, got {value:?}")]
    InvalidBool { key: &'static str, value: String },
    #[error("`{key}` expects a #RRGGBB color, got {value:?}")]
    InvalidColor { key: &'static str, value: String },
    #[error("`retrigger` expects ignore, restart or queue, got {0:?}")]
    InvalidPolicy(String),
    #[error("`{key}` is out of range: {value}")]
    OutOfRange { key: &'static str, value: f32 },
}

/// What a qualifying trigger does to a dot whose impulse is still running.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RetriggerPolicy {
    /// Skip the dot until its push and settle have both finished.
    #[default]
    Ignore,
    /// Cancel the running timeline and push again from the current offset.
    Restart,
    /// Keep the latest push and launch it once the dot has settled.
    Queue,
}

impl FromStr for RetriggerPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "restart" => Ok(Self::Restart),
            "queue" => Ok(Self::Queue),
            _ => Err(ConfigError::InvalidPolicy(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DotFieldConfig {
    /// Dot diameter (px).
    pub dot_size: f32,
    /// Space between dot edges (px).
    pub gap: f32,
    pub base_color: Rgb,
    pub active_color: Rgb,
    /// Radius for color blending and impulse triggering (px).
    pub proximity: f32,
    /// Minimum pointer speed that launches impulses (px/s).
    pub speed_trigger: f32,
    /// Accepted for parity with the hosted component; the push does not use it.
    pub shock_radius: f32,
    /// Accepted for parity with the hosted component; the push does not use it.
    pub shock_strength: f32,
    /// Ceiling for tracked pointer speed (px/s).
    pub max_speed: f32,
    /// Deceleration of the inertia phase (px/s²).
    pub resistance: f32,
    /// Length of the elastic settle (seconds).
    pub return_duration: f32,
    pub interactive: bool,
    pub retrigger: RetriggerPolicy,
}

impl Default for DotFieldConfig {
    fn default() -> Self {
        Self {
            dot_size: 16.0,
            gap: 32.0,
            base_color: Rgb::new(0x52, 0x27, 0xFF),
            active_color: Rgb::new(0x52, 0x27, 0xFF),
            proximity: 150.0,
            speed_trigger: 100.0,
            shock_radius: 250.0,
            shock_strength: 5.0,
            max_speed: 5000.0,
            resistance: 750.0,
            return_duration: 1.5,
            interactive: true,
            retrigger: RetriggerPolicy::Ignore,
        }
    }
}

impl DotFieldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("dot-size", self.dot_size)?;
        non_negative("gap", self.gap)?;
        if self.dot_size + self.gap < MIN_CELL_PX {
            return Err(ConfigError::OutOfRange {
                key: "gap",
                value: self.gap,
            });
        }
        non_negative("proximity", self.proximity)?;
        non_negative("speed-trigger", self.speed_trigger)?;
        non_negative("shock-radius", self.shock_radius)?;
        non_negative("shock-strength", self.shock_strength)?;
        positive("max-speed", self.max_speed)?;
        positive("resistance", self.resistance)?;
        non_negative("return-duration", self.return_duration)?;
        Ok(())
    }

    /// Build a config from string attributes keyed by their kebab-case name
    /// (`dot-size`, `base-color`, ...). Missing keys keep their defaults.
    pub fn from_attributes(
        mut lookup: impl FnMut(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        read_number(&mut lookup, "dot-size", &mut cfg.dot_size)?;
        read_number(&mut lookup, "gap", &mut cfg.gap)?;
        read_color(&mut lookup, "base-color", &mut cfg.base_color)?;
        read_color(&mut lookup, "active-color", &mut cfg.active_color)?;
        read_number(&mut lookup, "proximity", &mut cfg.proximity)?;
        read_number(&mut lookup, "speed-trigger", &mut cfg.speed_trigger)?;
        read_number(&mut lookup, "shock-radius", &mut cfg.shock_radius)?;
        read_number(&mut lookup, "shock-strength", &mut cfg.shock_strength)?;
        read_number(&mut lookup, "max-speed", &mut cfg.max_speed)?;
        read_number(&mut lookup, "resistance", &mut cfg.resistance)?;
        read_number(&mut lookup, "return-duration", &mut cfg.return_duration)?;
        if let Some(v) = lookup("interactive") {
            cfg.interactive = parse_bool("interactive", &v)?;
        }
        if let Some(v) = lookup("retrigger") {
            cfg.retrigger = v.parse()?;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn non_negative(key: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { key, value })
    }
}

fn positive(key: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { key, value })
    }
}

fn read_number(
    lookup: &mut impl FnMut(&str) -> Option<String>,
    key: &'static str,
    slot: &mut f32,
) -> Result<(), ConfigError> {
    if let Some(raw) = lookup(key) {
        *slot = raw
            .trim()
            .parse::<f32>()
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw })?;
    }
    Ok(())
}

fn read_color(
    lookup: &mut impl FnMut(&str) -> Option<String>,
    key: &'static str,
    slot: &mut Rgb,
) -> Result<(), ConfigError> {
    if let Some(raw) = lookup(key) {
        *slot = Rgb::from_hex(raw.trim()).ok_or(ConfigError::InvalidColor { key, value: raw })?;
    }
    Ok(())
}

// A bare attribute (`data-interactive`) reads as an empty string and means on.
fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: raw.to_string(),
        }),
    }
}
