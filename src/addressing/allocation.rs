//! Allocation weighting: a usage-sorted free list over memory slots

use ndarray::Array1;

/// Allocation weighting from the usage vector.
///
/// Slot indices are argsorted ascending by usage; the sort is stable and the
/// initial order is 0..N, so ties resolve to the lowest original index. That
/// tie-break is load-bearing: it pins which slot wins when several are
/// equally free, and reorderings would change outputs bit-for-bit.
///
/// Walking the sorted order with a running product of usages seen so far:
///
/// a[φ_j] = (Π_{k<j} u[φ_k]) · (1 − u[φ_j])
///
/// so the least-used slot takes the largest share and the weight decays
/// multiplicatively through occupied slots. For u ∈ [0,1]^N the result is
/// componentwise nonnegative with Σa ≤ 1.
pub fn allocation_weighting(usage: &Array1<f32>) -> Array1<f32> {
    let n = usage.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| usage[a].total_cmp(&usage[b]));

    let mut allocation = Array1::zeros(n);
    let mut cumprod = 1.0f32;
    for &slot in &order {
        allocation[slot] = cumprod * (1.0 - usage[slot]);
        cumprod *= usage[slot];
    }
    allocation
}
