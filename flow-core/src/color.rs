use serde::Deserialize;

/// A straight-alpha RGBA pixel with `f32` channels in `[0, 1]`.
///
/// This is the pixel type of [`crate::frame::FrameBuffer`]. Presets
/// deserialize it from a plain `[r, g, b, a]` array.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(from = "[f32; 4]")]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channel values.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            1.0,
        )
    }

    /// The same color with its alpha replaced.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Standard source-over blend of `self` onto `dst`.
    pub fn over(self, dst: Self) -> Self {
        let out_a = self.a + dst.a * (1.0 - self.a);
        if out_a <= 0.0 {
            return Self::TRANSPARENT;
        }
        let blend = |s: f32, d: f32| (s * self.a + d * dst.a * (1.0 - self.a)) / out_a;
        Self::new(
            blend(self.r, dst.r),
            blend(self.g, dst.g),
            blend(self.b, dst.b),
            out_a,
        )
    }

    /// Additive composite: `self + other * gain`, saturating at 1.
    pub fn add_scaled(self, other: Self, gain: f32) -> Self {
        Self::new(
            (self.r + other.r * gain).min(1.0),
            (self.g + other.g * gain).min(1.0),
            (self.b + other.b * gain).min(1.0),
            (self.a + other.a * gain).min(1.0),
        )
    }

    /// Channel-wise scale, saturating at 1.
    pub fn scaled(self, gain: f32) -> Self {
        Self::new(
            (self.r * gain).min(1.0),
            (self.g * gain).min(1.0),
            (self.b * gain).min(1.0),
            (self.a * gain).min(1.0),
        )
    }

    /// 8-bit RGBA bytes for texture upload.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl From<[f32; 4]> for Rgba {
    fn from(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

/// HSL color to RGBA, hue in degrees (wrapped modulo 360), `s`, `l`, `a`
/// in `[0, 1]`. Trail strokes use `hsla(hue, 1.0, 0.6, alpha)`.
pub fn hsla(hue_deg: f32, s: f32, l: f32, a: f32) -> Rgba {
    let h = hue_deg.rem_euclid(360.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - 0.5 * c;
    Rgba::new(r1 + m, g1 + m, b1 + m, a)
}
