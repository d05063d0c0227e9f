use crate::config::FieldConfig;
use crate::math;
use glam::Vec2;
use rand::Rng;

/// One animated point, advanced every frame and drawn as a short trail.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Frames elapsed since (re)spawn.
    pub age: u32,
    /// Lifespan in frames before respawn.
    pub ttl: u32,
    pub speed: f32,
    pub radius: f32,
    pub hue: f32,
}

impl Particle {
    /// Samples a fresh particle from the configured random ranges:
    /// x uniform across the canvas width, y inside the spawn band around
    /// `center_y`, velocity zero, everything else `base + rand(range)`.
    pub fn spawn(cfg: &FieldConfig, width: f32, center_y: f32, rng: &mut impl Rng) -> Self {
        Self {
            pos: Vec2::new(
                math::rand_scaled(rng, width),
                center_y + math::rand_spread(rng, cfg.range_y),
            ),
            vel: Vec2::ZERO,
            age: 0,
            ttl: cfg.base_ttl + math::rand_scaled(rng, cfg.range_ttl as f32) as u32,
            speed: cfg.base_speed + math::rand_scaled(rng, cfg.range_speed),
            radius: cfg.base_radius + math::rand_scaled(rng, cfg.range_radius),
            hue: cfg.base_hue + math::rand_scaled(rng, cfg.range_hue),
        }
    }
}
