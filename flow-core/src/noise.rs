//! Seeded 3-D simplex noise.
//!
//! The field samples a smooth pseudo-random function of (x, y, time) to
//! steer each particle, so directions evolve continuously instead of
//! jittering frame to frame. The implementation is deterministic: the same
//! [`Seed`] produces the same values on any platform.

use std::f32::consts::TAU;

/// Seed for deterministic noise generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Seed(u64);

impl Seed {
    #[inline]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Derives an independent sub-seed (FNV-1a style mixing), so separate
    /// effects can share one configured seed without correlating.
    #[inline]
    pub const fn derive(self, purpose: u64) -> Self {
        let mut hash = self.0;
        hash ^= purpose;
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        Self(hash)
    }
}

impl Default for Seed {
    fn default() -> Self {
        Self(0x5EED_0F1E_1DF1_0E5)
    }
}

/// Permutation table computed once from the seed: 256 shuffled entries,
/// doubled so index arithmetic never wraps mid-lookup.
struct PermutationTable {
    perm: [u8; 512],
}

impl PermutationTable {
    fn new(seed: Seed) -> Self {
        let mut perm = [0u8; 512];
        for (i, p) in perm.iter_mut().take(256).enumerate() {
            *p = i as u8;
        }

        // Fisher-Yates with xorshift64 so the shuffle is reproducible.
        let mut state = seed.value() | 1;
        for i in (1..256).rev() {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let j = (state as usize) % (i + 1);
            perm.swap(i, j);
        }

        for i in 0..256 {
            perm[256 + i] = perm[i];
        }

        Self { perm }
    }

    #[inline]
    fn get(&self, index: usize) -> usize {
        self.perm[index & 511] as usize
    }
}

/// The 12 gradient directions: midpoints of the edges of a cube.
const GRAD3: [[i8; 3]; 12] = [
    [1, 1, 0],
    [-1, 1, 0],
    [1, -1, 0],
    [-1, -1, 0],
    [1, 0, 1],
    [-1, 0, 1],
    [1, 0, -1],
    [-1, 0, -1],
    [0, 1, 1],
    [0, -1, 1],
    [0, 1, -1],
    [0, -1, -1],
];

/// 3-D simplex noise generator.
///
/// `sample` returns values in `[-1, 1]`, continuous in all three inputs,
/// with O(1) cost and no allocation per sample.
pub struct SimplexNoise {
    perm_table: PermutationTable,
}

impl SimplexNoise {
    /// Skewing factor for the 3-D simplex grid: 1/3.
    const F3: f64 = 1.0 / 3.0;
    /// Unskewing factor: 1/6.
    const G3: f64 = 1.0 / 6.0;

    pub fn new(seed: Seed) -> Self {
        Self {
            perm_table: PermutationTable::new(seed),
        }
    }

    /// Samples noise at (x, y, z). The field uses z as scaled time.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        // Skew input space to determine the containing simplex cell.
        let skew = (x + y + z) * Self::F3;
        let i = fast_floor(x + skew);
        let j = fast_floor(y + skew);
        let k = fast_floor(z + skew);

        let unskew = (i + j + k) as f64 * Self::G3;
        let x0 = x - (i as f64 - unskew);
        let y0 = y - (j as f64 - unskew);
        let z0 = z - (k as f64 - unskew);

        // Rank the fractional coordinates to pick which of the six
        // tetrahedra of the cell contains the point.
        let (i1, j1, k1, i2, j2, k2) = if x0 >= y0 {
            if y0 >= z0 {
                (1, 0, 0, 1, 1, 0)
            } else if x0 >= z0 {
                (1, 0, 0, 1, 0, 1)
            } else {
                (0, 0, 1, 1, 0, 1)
            }
        } else if y0 < z0 {
            (0, 0, 1, 0, 1, 1)
        } else if x0 < z0 {
            (0, 1, 0, 0, 1, 1)
        } else {
            (0, 1, 0, 1, 1, 0)
        };

        let x1 = x0 - i1 as f64 + Self::G3;
        let y1 = y0 - j1 as f64 + Self::G3;
        let z1 = z0 - k1 as f64 + Self::G3;
        let x2 = x0 - i2 as f64 + 2.0 * Self::G3;
        let y2 = y0 - j2 as f64 + 2.0 * Self::G3;
        let z2 = z0 - k2 as f64 + 2.0 * Self::G3;
        let x3 = x0 - 1.0 + 3.0 * Self::G3;
        let y3 = y0 - 1.0 + 3.0 * Self::G3;
        let z3 = z0 - 1.0 + 3.0 * Self::G3;

        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let kk = (k & 255) as usize;

        let p = &self.perm_table;
        let gi0 = p.get(ii + p.get(jj + p.get(kk)));
        let gi1 = p.get(ii + i1 + p.get(jj + j1 + p.get(kk + k1)));
        let gi2 = p.get(ii + i2 + p.get(jj + j2 + p.get(kk + k2)));
        let gi3 = p.get(ii + 1 + p.get(jj + 1 + p.get(kk + 1)));

        let n0 = contribution(x0, y0, z0, gi0);
        let n1 = contribution(x1, y1, z1, gi1);
        let n2 = contribution(x2, y2, z2, gi2);
        let n3 = contribution(x3, y3, z3, gi3);

        // 32 scales the summed corner contributions to [-1, 1].
        32.0 * (n0 + n1 + n2 + n3)
    }
}

/// Contribution of one simplex corner, with the standard radial falloff.
#[inline]
fn contribution(x: f64, y: f64, z: f64, gradient_index: usize) -> f64 {
    let t = 0.6 - x * x - y * y - z * z;
    if t < 0.0 {
        0.0
    } else {
        let g = GRAD3[gradient_index % 12];
        let t2 = t * t;
        t2 * t2 * (x * f64::from(g[0]) + y * f64::from(g[1]) + z * f64::from(g[2]))
    }
}

#[inline]
fn fast_floor(x: f64) -> i64 {
    let xi = x as i64;
    if x < xi as f64 { xi - 1 } else { xi }
}

/// Converts a noise sample to a steering angle in radians:
/// `angle = sample * steps * 2π`.
///
/// A sample of 0 always maps to angle 0, whatever the step count.
#[inline]
pub fn angle_from_sample(sample: f32, steps: u32) -> f32 {
    sample * steps as f32 * TAU
}
