//! Reproducible synthetic chains shared by the integration tests.
//!
//! `LegacyNormal` replays NumPy's legacy `np.random.seed(s)` /
//! `np.random.normal` stream (MT19937 + polar Box–Muller with a cached
//! second deviate), so chains built here are bit-identical to the ones a
//! NumPy user gets from the same seed.

#![allow(dead_code)]

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

pub struct LegacyNormal {
    state: [u32; N],
    pos: usize,
    cached_gauss: Option<f64>,
}

impl LegacyNormal {
    pub fn seed(seed: u32) -> Self {
        let mut state = [0u32; N];
        state[0] = seed;
        for i in 1..N {
            let prev = state[i - 1];
            state[i] = 1_812_433_253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        Self {
            state,
            pos: N,
            cached_gauss: None,
        }
    }

    fn twist(&mut self) {
        for k in 0..N {
            let y = (self.state[k] & UPPER_MASK) | (self.state[(k + 1) % N] & LOWER_MASK);
            let mag = if y & 1 == 1 { MATRIX_A } else { 0 };
            self.state[k] = self.state[(k + M) % N] ^ (y >> 1) ^ mag;
        }
        self.pos = 0;
    }

    pub fn next_u32(&mut self) -> u32 {
        if self.pos >= N {
            self.twist();
        }
        let mut y = self.state[self.pos];
        self.pos += 1;
        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^= y >> 18;
        y
    }

    /// 53-bit uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        let a = f64::from(self.next_u32() >> 5);
        let b = f64::from(self.next_u32() >> 6);
        (a * 67_108_864.0 + b) / 9_007_199_254_740_992.0
    }

    pub fn gauss(&mut self) -> f64 {
        if let Some(g) = self.cached_gauss.take() {
            return g;
        }
        let (x1, x2, r2) = loop {
            let x1 = 2.0 * self.next_f64() - 1.0;
            let x2 = 2.0 * self.next_f64() - 1.0;
            let r2 = x1 * x1 + x2 * x2;
            if r2 < 1.0 && r2 != 0.0 {
                break (x1, x2, r2);
            }
        };
        let f = (-2.0 * r2.ln() / r2).sqrt();
        self.cached_gauss = Some(f * x1);
        f * x2
    }

    pub fn normal(&mut self, loc: f64, scale: f64) -> f64 {
        loc + scale * self.gauss()
    }
}

/// Three-parameter posterior used throughout the integration tests:
/// `a ~ N(0, 0.1)`, `b ~ N(π, 1)` and `c ~ N(1, 0.2)^3.5`, 1000 draws each,
/// drawn in the same order as
///
/// ```text
/// np.random.seed(42)
/// np.hstack([np.random.normal([0, np.pi], [0.1, 1], (1000, 2)),
///            np.random.normal(1, 0.2, (1000, 1)) ** 3.5])
/// ```
pub fn reference_chain_rows() -> Vec<Vec<f64>> {
    const N_POINTS: usize = 1000;
    let mut rng = LegacyNormal::seed(42);
    let mut rows: Vec<Vec<f64>> = (0..N_POINTS)
        .map(|_| {
            let a = rng.normal(0.0, 0.1);
            let b = rng.normal(std::f64::consts::PI, 1.0);
            vec![a, b]
        })
        .collect();
    for row in &mut rows {
        row.push(rng.normal(1.0, 0.2).powf(3.5));
    }
    rows
}

pub const REFERENCE_LATEX: &str = r"\begin{table}
\begin{tabular}{cc}
Parameter & Measurement \\
a & ${0.004}_{-0.096}^{+0.095}$ \\
b & ${183}_{-56}^{+58}$ \\
c & ${1.00}_{-0.52}^{+0.81}$ \\
\end{tabular}
\end{table}
";
