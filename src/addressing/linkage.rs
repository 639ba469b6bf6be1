//! Temporal linkage: precedence weighting and the slot-to-slot link matrix

use ndarray::{Array1, Array2};

/// Precedence update: decays toward the most recent write location.
///
/// p' = (1 − Σww) · p + ww
pub fn updated_precedence(precedence: &Array1<f32>, write_weights: &Array1<f32>) -> Array1<f32> {
    let write_sum = write_weights.sum();
    precedence * (1.0 - write_sum) + write_weights
}

/// Link matrix update over the full N×N grid:
///
/// L'[i, j] = (1 − ww_i − ww_j) · L[i, j] + ww_i · p_prev[j]
///
/// using the precedence from *before* this step's precedence update. The
/// diagonal is forced to zero after the elementwise pass (a slot cannot
/// precede itself), so a nonzero diagonal in the input cannot survive.
pub fn updated_link(
    link: &Array2<f32>,
    prev_precedence: &Array1<f32>,
    write_weights: &Array1<f32>,
) -> Array2<f32> {
    let n = link.nrows();
    let mut updated = Array2::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            updated[[i, j]] = (1.0 - write_weights[i] - write_weights[j]) * link[[i, j]]
                + write_weights[i] * prev_precedence[j];
        }
    }
    for i in 0..n {
        updated[[i, i]] = 0.0;
    }
    updated
}
