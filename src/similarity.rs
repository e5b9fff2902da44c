//! Pairwise cosine similarity over a [`Dataset`].
//!
//! Zero vectors are given similarity `0.0` with everything, themselves
//! included, so the matrix is always total.

use log::debug;

use crate::data::model::Dataset;

/// Inner product of two equal-length slices.
#[inline]
fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

// ---------------------------------------------------------------------------
// Scaled – a feature vector prepared for cosine
// ---------------------------------------------------------------------------

/// A non-zero vector divided by its largest absolute component, plus the
/// norm of the result. Cosine is scale invariant, and after scaling the
/// norm lies in `[1, sqrt(d)]`, so neither `dot` nor `norm` can overflow
/// or underflow to zero for finite input.
#[derive(Debug, Clone)]
struct Scaled {
    data: Vec<f64>,
    norm: f64,
}

impl Scaled {
    /// `None` when every component is exactly zero.
    fn new(v: &[f64]) -> Option<Self> {
        let max_abs = v.iter().fold(0.0_f64, |m, x| m.max(x.abs()));
        if max_abs == 0.0 {
            return None;
        }
        let data: Vec<f64> = v.iter().map(|x| x / max_abs).collect();
        let norm = dot(&data, &data).sqrt();
        Some(Scaled { data, norm })
    }

    fn cosine(&self, other: &Scaled) -> f64 {
        (dot(&self.data, &other.data) / (self.norm * other.norm)).clamp(-1.0, 1.0)
    }
}

// ---------------------------------------------------------------------------
// SimilarityMatrix
// ---------------------------------------------------------------------------

/// Dense `n x n` similarity matrix, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Compute every pair. Only the upper triangle is evaluated and then
    /// mirrored, so `get(i, j) == get(j, i)` holds exactly.
    pub fn compute(dataset: &Dataset) -> Self {
        let scaled: Vec<Option<Scaled>> = dataset
            .entities()
            .iter()
            .map(|e| Scaled::new(&e.features))
            .collect();
        let n = scaled.len();
        let mut values = vec![0.0; n * n];

        for i in 0..n {
            let Some(u) = &scaled[i] else {
                continue;
            };
            values[i * n + i] = 1.0;
            for j in (i + 1)..n {
                if let Some(v) = &scaled[j] {
                    let s = u.cosine(v);
                    values[i * n + j] = s;
                    values[j * n + i] = s;
                }
            }
        }

        debug!("computed {n}x{n} similarity matrix");
        SimilarityMatrix { n, values }
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.n
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.n..(i + 1) * self.n]
    }

    /// Min / max / mean over every entry, diagonal included.
    pub fn stats(&self) -> Option<MatrixStats> {
        if self.values.is_empty() {
            return None;
        }
        let min = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = self.values.iter().sum::<f64>() / self.values.len() as f64;
        Some(MatrixStats { min, max, mean })
    }
}

/// Summary statistics over a non-empty matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}
