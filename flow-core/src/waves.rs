//! Layered wave band backdrop.
//!
//! Draws a handful of horizontal bands, each displaced vertically by the
//! noise field and drifting with time. The frame is refilled with a
//! translucent background each step, so previous bands linger briefly,
//! then the whole frame is blurred for the soft look.

use crate::color::Rgba;
use crate::frame::FrameBuffer;
use crate::noise::SimplexNoise;
use glam::Vec2;
use serde::Deserialize;

/// Drift rate of the wave phase per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveSpeed {
    Slow,
    Fast,
}

impl WaveSpeed {
    pub fn value(self) -> f64 {
        match self {
            WaveSpeed::Slow => 0.001,
            WaveSpeed::Fast => 0.002,
        }
    }
}

/// Configuration for the wave backdrop; every field is optional in a
/// preset and falls back to its default.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Stroke colors, cycled across bands.
    pub colors: Vec<Rgba>,
    /// Band stroke width in pixels.
    pub stroke_width: f32,
    pub fill: Rgba,
    /// Alpha of the per-frame background refill.
    pub opacity: f32,
    /// Full-frame blur radius in pixels.
    pub blur: usize,
    pub speed: WaveSpeed,
    pub wave_count: usize,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            colors: vec![
                Rgba::from_rgb8(0x38, 0xbd, 0xf8),
                Rgba::from_rgb8(0x81, 0x8c, 0xf8),
                Rgba::from_rgb8(0xc0, 0x84, 0xfc),
                Rgba::from_rgb8(0xe8, 0x79, 0xf9),
                Rgba::from_rgb8(0x22, 0xd3, 0xee),
            ],
            stroke_width: 50.0,
            fill: Rgba::BLACK,
            opacity: 0.5,
            blur: 10,
            speed: WaveSpeed::Fast,
            wave_count: 5,
        }
    }
}

impl WaveConfig {
    /// Restores defaults for values that cannot be rendered (empty
    /// palette, non-finite or negative numbers).
    pub fn sanitized(mut self) -> Self {
        let d = Self::default();
        if self.colors.is_empty() {
            self.colors = d.colors;
        }
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            self.stroke_width = d.stroke_width;
        }
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            self.opacity = d.opacity;
        }
        self
    }
}

/// Wave phase state: nothing but the drifting time coordinate.
#[derive(Debug, Default)]
pub struct WaveField {
    t: f64,
}

impl WaveField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    /// Drifts the phase by the configured speed.
    pub fn advance(&mut self, cfg: &WaveConfig) {
        self.t += cfg.speed.value();
    }

    /// Sample points for one band: every 5 px across the width,
    /// `y = noise(x / 800, 0.3 · band, t) · 100` around the vertical
    /// center.
    pub fn polyline(
        &self,
        band: usize,
        width: f32,
        height: f32,
        noise: &SimplexNoise,
    ) -> Vec<Vec2> {
        let mut points = Vec::with_capacity((width / 5.0).ceil() as usize);
        let mut x = 0.0f32;
        while x < width {
            let y = noise.sample(f64::from(x) / 800.0, 0.3 * band as f64, self.t) as f32 * 100.0;
            points.push(Vec2::new(x, y + 0.5 * height));
            x += 5.0;
        }
        points
    }

    /// Renders one backdrop frame: translucent background refill, one
    /// stroked polyline per band cycling the palette, then a full-frame
    /// blur.
    pub fn composite(&self, frame: &mut FrameBuffer, noise: &SimplexNoise, cfg: &WaveConfig) {
        if frame.is_empty() {
            return;
        }
        let (w, h) = (frame.width() as f32, frame.height() as f32);
        frame.fill(cfg.fill.with_alpha(cfg.opacity));
        for band in 0..cfg.wave_count {
            let color = cfg.colors[band % cfg.colors.len()];
            let points = self.polyline(band, w, h, noise);
            frame.stroke_polyline(&points, cfg.stroke_width, color);
        }
        frame.blur_in_place(cfg.blur);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::Seed;

    fn noise() -> SimplexNoise {
        SimplexNoise::new(Seed::new(7))
    }

    #[test]
    fn advance_drifts_by_the_configured_speed() {
        let cfg = WaveConfig {
            speed: WaveSpeed::Slow,
            ..Default::default()
        };
        let mut waves = WaveField::new();
        waves.advance(&cfg);
        waves.advance(&cfg);
        assert!((waves.t() - 0.002).abs() < 1e-12);

        let fast = WaveConfig::default();
        let mut waves = WaveField::new();
        waves.advance(&fast);
        assert!((waves.t() - 0.002).abs() < 1e-12);
    }

    #[test]
    fn polyline_samples_every_five_pixels_around_the_center() {
        let waves = WaveField::new();
        let points = waves.polyline(0, 100.0, 300.0, &noise());
        assert_eq!(points.len(), 20);
        for (i, p) in points.iter().enumerate() {
            assert_eq!(p.x, i as f32 * 5.0);
            assert!(p.y >= 50.0 && p.y <= 250.0, "band strays too far: {}", p.y);
        }
    }

    #[test]
    fn polyline_of_zero_width_is_empty() {
        let waves = WaveField::new();
        assert!(waves.polyline(0, 0.0, 100.0, &noise()).is_empty());
    }

    #[test]
    fn composite_paints_and_tolerates_zero_frames() {
        let cfg = WaveConfig {
            blur: 1,
            stroke_width: 4.0,
            ..Default::default()
        };
        let waves = WaveField::new();
        let mut frame = FrameBuffer::new(40, 40);
        waves.composite(&mut frame, &noise(), &cfg);
        // The band passes through the vertical center region; something
        // there must be non-black.
        let mut lit = false;
        for y in 0..40 {
            for x in 0..40 {
                let px = frame.pixel(x, y);
                lit |= px.r + px.g + px.b > 0.0;
            }
        }
        assert!(lit);

        let mut empty = FrameBuffer::new(0, 0);
        waves.composite(&mut empty, &noise(), &cfg);
        assert!(empty.is_empty());
    }

    #[test]
    fn sanitized_restores_an_empty_palette() {
        let cfg = WaveConfig {
            colors: Vec::new(),
            stroke_width: f32::NAN,
            opacity: 7.0,
            ..Default::default()
        }
        .sanitized();
        let d = WaveConfig::default();
        assert_eq!(cfg.colors, d.colors);
        assert_eq!(cfg.stroke_width, d.stroke_width);
        assert_eq!(cfg.opacity, d.opacity);
    }
}
