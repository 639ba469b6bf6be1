//! Usage tracking: how occupied each memory slot is

use ndarray::{Array1, Array2};

/// Usage update for one timestep.
///
/// The retention vector ψ is the probability that a slot is *not* freed by
/// any read head this step: ψ_i = Π_h (1 − free_h · wr_prev[i, h]). The new
/// usage is the probabilistic OR of previous usage and the previous write
/// weighting, discounted by retention:
///
/// u' = (u + ww_prev − u ∘ ww_prev) ∘ ψ
///
/// With every input in [0, 1] the result stays in [0, 1].
pub fn updated_usage(
    usage: &Array1<f32>,
    prev_write_weights: &Array1<f32>,
    prev_read_weights: &Array2<f32>,
    free_gates: &Array1<f32>,
) -> Array1<f32> {
    let mut retention = Array1::<f32>::ones(usage.len());
    for (head, &gate) in free_gates.iter().enumerate() {
        let column = prev_read_weights.column(head);
        retention.zip_mut_with(&column, |psi, &w| *psi *= 1.0 - gate * w);
    }
    (usage + prev_write_weights - &(usage * prev_write_weights)) * &retention
}
