use crate::color::Rgba;
use serde::Deserialize;

/// Configuration for the particle field. Every field is optional in a
/// preset file and falls back to the documented default.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of particles in the pool.
    pub count: usize,
    /// Half-height of the vertical spawn band around the canvas center.
    pub range_y: f32,
    pub base_speed: f32,
    pub range_speed: f32,
    /// Stroke width base/range, in pixels.
    pub base_radius: f32,
    pub range_radius: f32,
    /// HSL hue base/range, in degrees.
    pub base_hue: f32,
    pub range_hue: f32,
    /// Lifespan base/range, in frames.
    pub base_ttl: u32,
    pub range_ttl: u32,
    pub background: Rgba,
    /// Noise sampling scale per axis; z scales the frame counter.
    pub x_off: f32,
    pub y_off: f32,
    pub z_off: f32,
    /// Multiplier applied when converting a noise sample to an angle.
    pub noise_steps: u32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 700,
            range_y: 100.0,
            base_speed: 0.0,
            range_speed: 1.5,
            base_radius: 1.0,
            range_radius: 2.0,
            base_hue: 220.0,
            range_hue: 100.0,
            base_ttl: 50,
            range_ttl: 150,
            background: Rgba::BLACK,
            x_off: 0.00125,
            y_off: 0.00125,
            z_off: 0.0005,
            noise_steps: 3,
        }
    }
}

impl FieldConfig {
    /// Replaces non-finite or negative numeric values with their defaults.
    /// Invalid configuration is never an error; it degrades to the
    /// documented behavior.
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        let or_default = |v: f32, d: f32| if v.is_finite() && v >= 0.0 { v } else { d };
        Self {
            count: self.count,
            range_y: or_default(self.range_y, d.range_y),
            base_speed: or_default(self.base_speed, d.base_speed),
            range_speed: or_default(self.range_speed, d.range_speed),
            base_radius: or_default(self.base_radius, d.base_radius),
            range_radius: or_default(self.range_radius, d.range_radius),
            base_hue: or_default(self.base_hue, d.base_hue),
            range_hue: or_default(self.range_hue, d.range_hue),
            base_ttl: self.base_ttl,
            range_ttl: self.range_ttl,
            background: Rgba::new(
                or_default(self.background.r, d.background.r).min(1.0),
                or_default(self.background.g, d.background.g).min(1.0),
                or_default(self.background.b, d.background.b).min(1.0),
                or_default(self.background.a, d.background.a).min(1.0),
            ),
            x_off: or_default(self.x_off, d.x_off),
            y_off: or_default(self.y_off, d.y_off),
            z_off: or_default(self.z_off, d.z_off),
            noise_steps: self.noise_steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = FieldConfig::default();
        assert_eq!(cfg.count, 700);
        assert_eq!(cfg.range_y, 100.0);
        assert_eq!(cfg.base_speed, 0.0);
        assert_eq!(cfg.range_speed, 1.5);
        assert_eq!(cfg.base_ttl, 50);
        assert_eq!(cfg.range_ttl, 150);
        assert_eq!(cfg.base_hue, 220.0);
        assert_eq!(cfg.noise_steps, 3);
        assert_eq!(cfg.background, Rgba::BLACK);
    }

    #[test]
    fn sanitized_replaces_invalid_values_with_defaults() {
        let cfg = FieldConfig {
            range_y: f32::NAN,
            base_speed: -4.0,
            x_off: f32::INFINITY,
            ..Default::default()
        }
        .sanitized();
        let d = FieldConfig::default();
        assert_eq!(cfg.range_y, d.range_y);
        assert_eq!(cfg.base_speed, d.base_speed);
        assert_eq!(cfg.x_off, d.x_off);
    }

    #[test]
    fn sanitized_keeps_valid_values() {
        let cfg = FieldConfig {
            range_y: 40.0,
            base_hue: 10.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(cfg.range_y, 40.0);
        assert_eq!(cfg.base_hue, 10.0);
    }
}
