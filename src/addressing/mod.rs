//! Differentiable addressing primitives over the memory matrix
//!
//! Each submodule is one addressing mechanism:
//! - `content`: cosine-similarity lookup sharpened by a key strength
//! - `usage`: per-slot usage tracking driven by writes and free gates
//! - `allocation`: usage-sorted free-list weighting for unused slots
//! - `linkage`: precedence weighting and the temporal link matrix
//!
//! All operations are pure functions from previous values to new values so
//! each mechanism can be tested in isolation and so a recording tensor
//! engine can treat every update as a chain of differentiable primitives.

pub mod allocation;
pub mod content;
pub mod linkage;
pub mod usage;

pub use allocation::allocation_weighting;
pub use content::content_weighting;
pub use linkage::{updated_link, updated_precedence};
pub use usage::updated_usage;

use ndarray::Array1;

/// Numerically stable softmax over a score vector.
pub(crate) fn softmax(scores: &Array1<f32>) -> Array1<f32> {
    let max = scores.fold(f32::NEG_INFINITY, |m, &v| m.max(v));
    let exp = scores.mapv(|v| (v - max).exp());
    let sum = exp.sum();
    exp / sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn softmax_is_a_distribution() {
        let w = softmax(&arr1(&[0.5, -1.0, 3.0]));
        assert!(w.iter().all(|&v| v >= 0.0));
        assert!((w.sum() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn softmax_of_zeros_is_uniform() {
        let w = softmax(&Array1::zeros(4));
        for &v in w.iter() {
            assert!((v - 0.25).abs() < 1e-6);
        }
    }
}
