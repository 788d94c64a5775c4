//! # Simplex Noise Implementation
//!
//! Deterministic 2D/3D noise sampled by the modifier and distortion kernels.
//!
//! ## Determinism Guarantee
//!
//! Given the same `Seed`, this implementation will produce **exactly** the
//! same values on any platform, any time. No kernel may reach for process
//! global randomness.

use grimoire_shared::{fnv1a, Vec3};

/// Seed for deterministic generation.
///
/// All procedural randomness of one build derives from this seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Seed(u64);

impl Seed {
    /// Creates a new seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Derives a sub-seed for a specific purpose (e.g., branch angles).
    ///
    /// Uses a hash function to create independent streams from one seed.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u64) -> Self {
        let mut hash = self.0;
        hash ^= purpose;
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        Self(hash)
    }

    /// Seed derived from text with FNV-1a.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self(fnv1a(text.as_bytes()))
    }
}

impl Default for Seed {
    fn default() -> Self {
        Self(0xDEAD_BEEF_CAFE_BABE)
    }
}

/// Pre-computed permutation table for noise.
///
/// This is computed once from the seed and reused.
struct PermutationTable {
    /// 512-entry permutation table (256 entries, doubled for overflow handling).
    perm: [u8; 512],
}

impl PermutationTable {
    /// 12 gradients for 2D simplex.
    const GRAD2: [[i8; 2]; 12] = [
        [1, 0], [1, 1], [0, 1], [-1, 1],
        [-1, 0], [-1, -1], [0, -1], [1, -1],
        [1, 0], [0, 1], [-1, 0], [0, -1],
    ];

    /// 12 cube-edge gradients for 3D simplex.
    const GRAD3: [[i8; 3]; 12] = [
        [1, 1, 0], [-1, 1, 0], [1, -1, 0], [-1, -1, 0],
        [1, 0, 1], [-1, 0, 1], [1, 0, -1], [-1, 0, -1],
        [0, 1, 1], [0, -1, 1], [0, 1, -1], [0, -1, -1],
    ];

    /// Creates a new permutation table from a seed.
    fn new(seed: Seed) -> Self {
        let mut perm = [0u8; 512];

        // Initialize with identity permutation
        for (i, slot) in perm.iter_mut().take(256).enumerate() {
            *slot = i as u8;
        }

        // Fisher-Yates shuffle with xorshift64; a zero state would stall
        let mut rng_state = seed.value() | 1;
        for i in (1..256).rev() {
            rng_state ^= rng_state << 13;
            rng_state ^= rng_state >> 7;
            rng_state ^= rng_state << 17;

            let j = (rng_state as usize) % (i + 1);
            perm.swap(i, j);
        }

        // Double the table to avoid index wrapping
        for i in 0..256 {
            perm[256 + i] = perm[i];
        }

        Self { perm }
    }

    /// Gets a permutation value (with automatic wrapping).
    #[inline]
    fn get(&self, index: usize) -> usize {
        self.perm[index & 511] as usize
    }
}

/// 2D/3D Simplex noise generator.
///
/// Produces smooth, continuous noise values in the range [-1, 1].
///
/// # Example
///
/// ```rust
/// use grimoire_procedural::{Seed, SimplexNoise};
///
/// let noise = SimplexNoise::new(Seed::new(42));
/// let value = noise.sample3(0.3, 1.7, -2.2);
/// assert!((-1.0..=1.0).contains(&value));
/// ```
pub struct SimplexNoise {
    /// The permutation table.
    perm_table: PermutationTable,
}

impl SimplexNoise {
    /// Skewing factor for 2D simplex grid.
    const F2: f64 = 0.366_025_403_784_439; // (sqrt(3) - 1) / 2
    /// Unskewing factor for 2D simplex grid.
    const G2: f64 = 0.211_324_865_405_187; // (3 - sqrt(3)) / 6
    /// Skewing factor for 3D simplex grid.
    const F3: f64 = 1.0 / 3.0;
    /// Unskewing factor for 3D simplex grid.
    const G3: f64 = 1.0 / 6.0;

    /// Creates a new simplex noise generator from a seed.
    #[must_use]
    pub fn new(seed: Seed) -> Self {
        Self {
            perm_table: PermutationTable::new(seed),
        }
    }

    /// Samples 2D simplex noise at the given coordinates.
    ///
    /// # Returns
    ///
    /// A value in the range [-1, 1].
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        // Skew input coordinates to simplex grid
        let skew = (x + y) * Self::F2;
        let i = fast_floor(x + skew);
        let j = fast_floor(y + skew);

        // Unskew to get first corner in simplex
        let unskew = f64::from(i + j) * Self::G2;
        let x0 = x - (f64::from(i) - unskew);
        let y0 = y - (f64::from(j) - unskew);

        // Upper or lower triangle
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - f64::from(i1) + Self::G2;
        let y1 = y0 - f64::from(j1) + Self::G2;
        let x2 = x0 - 1.0 + 2.0 * Self::G2;
        let y2 = y0 - 1.0 + 2.0 * Self::G2;

        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let p = &self.perm_table;

        let gi0 = p.get(ii + p.get(jj));
        let gi1 = p.get(ii + i1 as usize + p.get(jj + j1 as usize));
        let gi2 = p.get(ii + 1 + p.get(jj + 1));

        let n0 = Self::contribution2(x0, y0, gi0);
        let n1 = Self::contribution2(x1, y1, gi1);
        let n2 = Self::contribution2(x2, y2, gi2);

        // The magic number 70.0 normalizes the output
        (70.0 * (n0 + n1 + n2)).clamp(-1.0, 1.0)
    }

    /// Samples 3D simplex noise at the given coordinates.
    ///
    /// # Returns
    ///
    /// A value in the range [-1, 1].
    #[must_use]
    pub fn sample3(&self, x: f64, y: f64, z: f64) -> f64 {
        let skew = (x + y + z) * Self::F3;
        let i = fast_floor(x + skew);
        let j = fast_floor(y + skew);
        let k = fast_floor(z + skew);

        let unskew = f64::from(i + j + k) * Self::G3;
        let x0 = x - (f64::from(i) - unskew);
        let y0 = y - (f64::from(j) - unskew);
        let z0 = z - (f64::from(k) - unskew);

        // Which of the six tetrahedra we're in
        let (i1, j1, k1, i2, j2, k2): (usize, usize, usize, usize, usize, usize) = if x0 >= y0 {
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

        let x1 = x0 - (i1 as f64) + Self::G3;
        let y1 = y0 - (j1 as f64) + Self::G3;
        let z1 = z0 - (k1 as f64) + Self::G3;
        let x2 = x0 - (i2 as f64) + 2.0 * Self::G3;
        let y2 = y0 - (j2 as f64) + 2.0 * Self::G3;
        let z2 = z0 - (k2 as f64) + 2.0 * Self::G3;
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

        let n0 = Self::contribution3(x0, y0, z0, gi0);
        let n1 = Self::contribution3(x1, y1, z1, gi1);
        let n2 = Self::contribution3(x2, y2, z2, gi2);
        let n3 = Self::contribution3(x3, y3, z3, gi3);

        (32.0 * (n0 + n1 + n2 + n3)).clamp(-1.0, 1.0)
    }

    /// Calculates the contribution from one corner of a 2D simplex.
    #[inline]
    fn contribution2(x: f64, y: f64, hash: usize) -> f64 {
        let t = 0.5 - x * x - y * y;
        if t < 0.0 {
            0.0
        } else {
            let grad = PermutationTable::GRAD2[hash % 12];
            let t2 = t * t;
            t2 * t2 * (x * f64::from(grad[0]) + y * f64::from(grad[1]))
        }
    }

    /// Calculates the contribution from one corner of a 3D simplex.
    #[inline]
    fn contribution3(x: f64, y: f64, z: f64, hash: usize) -> f64 {
        let t = 0.6 - x * x - y * y - z * z;
        if t < 0.0 {
            0.0
        } else {
            let grad = PermutationTable::GRAD3[hash % 12];
            let t2 = t * t;
            t2 * t2 * (x * f64::from(grad[0]) + y * f64::from(grad[1]) + z * f64::from(grad[2]))
        }
    }

    /// Generates octaved (fractal) 3D noise.
    ///
    /// # Arguments
    ///
    /// * `x`, `y`, `z` - Coordinates
    /// * `octaves` - Number of noise layers (typically 3-5)
    /// * `persistence` - Amplitude decay per octave (typically 0.5)
    /// * `lacunarity` - Frequency increase per octave (typically 2.0)
    ///
    /// # Returns
    ///
    /// A value in the range [-1, 1].
    #[must_use]
    pub fn fbm3(
        &self,
        x: f64,
        y: f64,
        z: f64,
        octaves: u32,
        persistence: f64,
        lacunarity: f64,
    ) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_amplitude = 0.0;

        for _ in 0..octaves.max(1) {
            total += self.sample3(x * frequency, y * frequency, z * frequency) * amplitude;
            max_amplitude += amplitude;
            amplitude *= persistence;
            frequency *= lacunarity;
        }

        total / max_amplitude
    }

    /// Single-octave sample at a mesh-space point.
    #[inline]
    #[must_use]
    pub fn at(&self, p: Vec3) -> f32 {
        self.sample3(f64::from(p.x), f64::from(p.y), f64::from(p.z)) as f32
    }

    /// Four-octave fbm at a mesh-space point.
    #[inline]
    #[must_use]
    pub fn fbm_at(&self, p: Vec3) -> f32 {
        self.fbm3(f64::from(p.x), f64::from(p.y), f64::from(p.z), 4, 0.5, 2.0) as f32
    }
}

/// Fast floor function.
#[inline]
fn fast_floor(x: f64) -> i32 {
    let xi = x as i32;
    if x < f64::from(xi) { xi - 1 } else { xi }
}
