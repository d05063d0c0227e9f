use rand::Rng;

/// Linear interpolation between `a` and `b` by blend factor `t`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    (1.0 - t) * a + t * b
}

/// Symmetric triangular fade envelope over a particle's lifetime.
///
/// `fade_in_out(age, ttl) = |((age + ttl/2) mod ttl) - ttl/2| / (ttl/2)`
///
/// Rises from 0 at `age = 0`, peaks at 1 when `age = ttl / 2`, and falls
/// back to 0 at `age = ttl`. Used as the alpha multiplier for trail
/// strokes so particles never pop in or out visibly.
///
/// Returns 0 when `ttl` is not positive.
#[inline]
pub fn fade_in_out(age: f32, ttl: f32) -> f32 {
    if ttl <= 0.0 {
        return 0.0;
    }
    let hm = 0.5 * ttl;
    (((age + hm) % ttl) - hm).abs() / hm
}

/// Uniform sample in `[0, n)`. Returns 0 when `n` is not positive.
#[inline]
pub fn rand_scaled(rng: &mut impl Rng, n: f32) -> f32 {
    if n > 0.0 { rng.random_range(0.0..n) } else { 0.0 }
}

/// Uniform sample in `(-n, n]`, centered on zero.
#[inline]
pub fn rand_spread(rng: &mut impl Rng, n: f32) -> f32 {
    n - rand_scaled(rng, 2.0 * n)
}
