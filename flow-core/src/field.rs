//! The particle pool and its per-frame update.
//!
//! A [`ParticleField`] owns a fixed number of particle slots. Each frame,
//! [`ParticleField::advance`] steers every particle by the noise field,
//! integrates its position, and either emits a trail segment or respawns
//! the slot in place. The pool's cardinality never changes between
//! [`ParticleField::reseed`] calls.

use crate::config::FieldConfig;
use crate::math;
use crate::noise::{self, SimplexNoise};
use crate::particle::Particle;
use crate::trail::{TrailBuffer, TrailSegment};
use crate::types::ParticleId;
use glam::Vec2;
use rand::Rng;

/// Fixed-cardinality particle pool plus the canvas bounds it lives in.
#[derive(Debug)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
    /// Frames advanced since the last reseed; scales the noise time axis.
    pub tick: u64,
    width: f32,
    height: f32,
    center: Vec2,
}

impl ParticleField {
    /// Allocates the pool and seeds every slot from the configured ranges.
    ///
    /// Zero dimensions are legal: particles spawn on the left edge and the
    /// first advance respawns anything that steps outside, so rendering
    /// degenerates to an empty frame until a resize.
    pub fn new(cfg: &FieldConfig, width: f32, height: f32, rng: &mut impl Rng) -> Self {
        let mut field = Self {
            particles: Vec::with_capacity(cfg.count),
            tick: 0,
            width,
            height,
            center: Vec2::new(0.5 * width, 0.5 * height),
        };
        field.reseed(cfg, rng);
        field
    }

    /// Discards all slots and re-seeds exactly `cfg.count` fresh particles,
    /// resetting the frame counter.
    pub fn reseed(&mut self, cfg: &FieldConfig, rng: &mut impl Rng) {
        self.tick = 0;
        self.particles.clear();
        for _ in 0..cfg.count {
            self.particles
                .push(Particle::spawn(cfg, self.width, self.center.y, rng));
        }
    }

    /// Re-samples every attribute of one slot. Identity (the index) is
    /// stable; no slot is ever added or removed.
    pub fn respawn(&mut self, id: ParticleId, cfg: &FieldConfig, rng: &mut impl Rng) {
        self.particles[id] = Particle::spawn(cfg, self.width, self.center.y, rng);
    }

    /// Updates the stored bounds and recenters the spawn band.
    ///
    /// In-flight particle data is untouched; anything left outside the new
    /// bounds is corrected by the next advance.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.center = Vec2::new(0.5 * width, 0.5 * height);
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }

    /// Advances every particle by one frame and refills `trails`.
    ///
    /// Per particle:
    /// 1. Sample noise at `(x·x_off, y·y_off, tick·z_off)` and convert the
    ///    sample to an angle (`sample · noise_steps · 2π`).
    /// 2. Blend the new direction into the velocity with a 0.5 lerp for
    ///    smooth turning.
    /// 3. Integrate `pos' = pos + vel · speed`.
    /// 4. If `pos'` is out of bounds or the particle outlived its ttl,
    ///    respawn the slot instead of committing the step — so no particle
    ///    ever remains out of bounds across a frame boundary, and a
    ///    respawning particle draws nothing that frame.
    /// 5. Otherwise commit the move, bump the age, and emit a trail
    ///    segment whose alpha follows the fade envelope.
    pub fn advance(
        &mut self,
        cfg: &FieldConfig,
        noise: &SimplexNoise,
        rng: &mut impl Rng,
        trails: &mut TrailBuffer,
    ) {
        trails.clear();

        let z = self.tick as f64 * cfg.z_off as f64;

        for id in 0..self.particles.len() {
            let p = self.particles[id];

            let sample = noise.sample(
                (p.pos.x * cfg.x_off) as f64,
                (p.pos.y * cfg.y_off) as f64,
                z,
            );
            let angle = noise::angle_from_sample(sample as f32, cfg.noise_steps);

            let vel = Vec2::new(
                math::lerp(p.vel.x, angle.cos(), 0.5),
                math::lerp(p.vel.y, angle.sin(), 0.5),
            );
            let next = p.pos + vel * p.speed;

            if !self.contains(next) || p.age + 1 > p.ttl {
                self.respawn(id, cfg, rng);
                continue;
            }

            trails.push(TrailSegment {
                from: p.pos,
                to: next,
                radius: p.radius,
                hue: p.hue,
                alpha: math::fade_in_out(p.age as f32, p.ttl as f32),
            });

            self.particles[id] = Particle {
                pos: next,
                vel,
                age: p.age + 1,
                ..p
            };
        }

        self.tick += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn noise() -> SimplexNoise {
        SimplexNoise::new(crate::noise::Seed::new(42))
    }

    #[test]
    fn pool_cardinality_never_changes() {
        let cfg = FieldConfig {
            count: 50,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        // A tiny canvas forces constant out-of-bounds respawns.
        let mut field = ParticleField::new(&cfg, 8.0, 8.0, &mut rng);
        let noise = noise();
        let mut trails = TrailBuffer::default();

        for _ in 0..500 {
            field.advance(&cfg, &noise, &mut rng, &mut trails);
            assert_eq!(field.len(), 50);
        }
        assert_eq!(field.tick, 500);
    }

    #[test]
    fn zero_count_pool_advances_without_work() {
        let cfg = FieldConfig {
            count: 0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let mut field = ParticleField::new(&cfg, 100.0, 100.0, &mut rng);
        let mut trails = TrailBuffer::default();

        field.advance(&cfg, &noise(), &mut rng, &mut trails);
        assert!(field.is_empty());
        assert!(trails.is_empty());
        assert_eq!(field.tick, 1);
    }

    #[test]
    fn advanced_particles_stay_in_bounds_or_in_the_spawn_band() {
        let cfg = FieldConfig {
            count: 100,
            range_y: 10.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = ParticleField::new(&cfg, 40.0, 40.0, &mut rng);
        let noise = noise();
        let mut trails = TrailBuffer::default();

        for _ in 0..200 {
            field.advance(&cfg, &noise, &mut rng, &mut trails);
            let cy = field.center().y;
            for p in &field.particles {
                if p.age == 0 {
                    // Freshly respawned: inside [0, width) x spawn band.
                    assert!(p.pos.x >= 0.0 && p.pos.x < field.width());
                    assert!(p.pos.y > cy - cfg.range_y && p.pos.y <= cy + cfg.range_y);
                } else {
                    // Committed a move: inside the canvas.
                    assert!(p.pos.x >= 0.0 && p.pos.x <= field.width());
                    assert!(p.pos.y >= 0.0 && p.pos.y <= field.height());
                }
            }
        }
    }

    #[test]
    fn age_grows_until_ttl_then_respawns() {
        // One motionless particle with a fixed 2-frame lifespan.
        let cfg = FieldConfig {
            count: 1,
            base_speed: 0.0,
            range_speed: 0.0,
            base_ttl: 2,
            range_ttl: 0,
            range_y: 10.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let mut field = ParticleField::new(&cfg, 200.0, 200.0, &mut rng);
        let noise = noise();
        let mut trails = TrailBuffer::default();

        field.advance(&cfg, &noise, &mut rng, &mut trails);
        assert_eq!(field.particles[0].age, 1);
        assert_eq!(trails.len(), 1);

        field.advance(&cfg, &noise, &mut rng, &mut trails);
        assert_eq!(field.particles[0].age, 2);

        // age + 1 exceeds ttl: the slot respawns and emits no trail.
        field.advance(&cfg, &noise, &mut rng, &mut trails);
        assert_eq!(field.particles[0].age, 0);
        assert!(trails.is_empty());
    }

    #[test]
    fn trail_alpha_follows_the_fade_envelope() {
        let cfg = FieldConfig {
            count: 20,
            base_speed: 0.0,
            range_speed: 0.5,
            range_y: 20.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(11);
        let mut field = ParticleField::new(&cfg, 500.0, 500.0, &mut rng);
        let noise = noise();
        let mut trails = TrailBuffer::default();

        for _ in 0..50 {
            field.advance(&cfg, &noise, &mut rng, &mut trails);
            for seg in trails.iter() {
                assert!((0.0..=1.0).contains(&seg.alpha));
            }
        }
    }

    #[test]
    fn resize_recenters_and_tolerates_zero() {
        let cfg = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut field = ParticleField::new(&cfg, 100.0, 50.0, &mut rng);
        assert_eq!(field.center(), Vec2::new(50.0, 25.0));

        field.resize(640.0, 480.0);
        assert_eq!(field.center(), Vec2::new(320.0, 240.0));
        assert_eq!(field.len(), cfg.count);

        field.resize(0.0, 0.0);
        assert_eq!(field.center(), Vec2::ZERO);

        // Advancing against a zero-size canvas respawns but never panics.
        let mut trails = TrailBuffer::default();
        field.advance(&cfg, &noise(), &mut rng, &mut trails);
        assert_eq!(field.len(), cfg.count);
    }

    #[test]
    fn reseed_restarts_the_frame_counter() {
        let cfg = FieldConfig {
            count: 10,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(2);
        let mut field = ParticleField::new(&cfg, 100.0, 100.0, &mut rng);
        let mut trails = TrailBuffer::default();
        field.advance(&cfg, &noise(), &mut rng, &mut trails);
        assert_eq!(field.tick, 1);

        field.reseed(&cfg, &mut rng);
        assert_eq!(field.tick, 0);
        assert_eq!(field.len(), 10);
        assert!(field.particles.iter().all(|p| p.age == 0));
    }
}
