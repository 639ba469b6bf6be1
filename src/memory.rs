//! Memory state and the per-timestep state transition
//!
//! [`MemoryState`] is the complete persistent state of the memory module
//! for one in-flight sequence. It is never mutated in place: `advance`
//! takes the previous state by reference and produces the next one, which
//! keeps aliasing out of the picture and every intermediate testable.

use crate::addressing::{
    allocation_weighting, content_weighting, updated_link, updated_precedence, updated_usage,
};
use crate::interface::Interface;
use ndarray::{s, Array1, Array2};

/// Persistent memory-module state, one instance per sequence.
///
/// All fields are zeroed at sequence start and replaced wholesale each
/// timestep. `read_vectors` is derived state: the flattened, heads-major
/// concatenation of the R per-head read vectors, fed back to the
/// controller on the next step.
#[derive(Debug, Clone)]
pub struct MemoryState {
    /// Memory matrix (N×W)
    pub memory: Array2<f32>,
    /// Per-slot usage in [0, 1] (N)
    pub usage: Array1<f32>,
    /// Precedence weighting (N)
    pub precedence: Array1<f32>,
    /// Temporal link matrix, zero diagonal (N×N)
    pub link: Array2<f32>,
    /// Read weightings, one column per head (N×R)
    pub read_weights: Array2<f32>,
    /// Write weighting (N)
    pub write_weights: Array1<f32>,
    /// Flattened read vectors, heads-major (R·W)
    pub read_vectors: Array1<f32>,
}

impl MemoryState {
    /// All-zero state for a memory of `slots`×`width` with `heads` read heads.
    pub fn zeroed(slots: usize, width: usize, heads: usize) -> Self {
        Self {
            memory: Array2::zeros((slots, width)),
            usage: Array1::zeros(slots),
            precedence: Array1::zeros(slots),
            link: Array2::zeros((slots, slots)),
            read_weights: Array2::zeros((slots, heads)),
            write_weights: Array1::zeros(slots),
            read_vectors: Array1::zeros(heads * width),
        }
    }

    /// Number of memory slots N.
    pub fn slots(&self) -> usize {
        self.memory.nrows()
    }

    /// Slot width W.
    pub fn width(&self) -> usize {
        self.memory.ncols()
    }

    /// Number of read heads R.
    pub fn heads(&self) -> usize {
        self.read_weights.ncols()
    }

    /// One full timestep of the memory module.
    ///
    /// Order is fixed: usage update (from the previous write and read
    /// weightings), allocation, write-content lookup, write weighting and
    /// memory mutation, temporal linkage, then the read heads over the
    /// freshly written memory and the new link matrix.
    pub fn advance(&self, iface: &Interface) -> MemoryState {
        let heads = self.heads();
        let width = self.width();

        let usage = updated_usage(
            &self.usage,
            &self.write_weights,
            &self.read_weights,
            &iface.free_gates,
        );
        let allocation = allocation_weighting(&usage);
        let write_content = content_weighting(&self.memory, &iface.write_key, iface.write_strength);
        let write_weights = write_weighting(
            &allocation,
            &write_content,
            iface.allocation_gate,
            iface.write_gate,
        );
        let memory = erase_and_write(&self.memory, &write_weights, &iface.erase, &iface.write);

        let link = updated_link(&self.link, &self.precedence, &write_weights);
        let precedence = updated_precedence(&self.precedence, &write_weights);

        // Backward/forward weightings for all heads at once (N×R).
        let backward = link.t().dot(&self.read_weights);
        let forward = link.dot(&self.read_weights);

        let mut read_weights = Array2::zeros((self.slots(), heads));
        for head in 0..heads {
            let key = iface.read_keys.row(head).to_owned();
            let content = content_weighting(&memory, &key, iface.read_strengths[head]);
            let modes = iface.read_modes.row(head);
            let fused = backward.column(head).to_owned() * modes[0]
                + content * modes[1]
                + forward.column(head).to_owned() * modes[2];
            read_weights.column_mut(head).assign(&fused);
        }

        // Read vectors per head, concatenated heads-major.
        let stacked = memory.t().dot(&read_weights); // W×R
        let mut read_vectors = Array1::zeros(heads * width);
        for head in 0..heads {
            read_vectors
                .slice_mut(s![head * width..(head + 1) * width])
                .assign(&stacked.column(head));
        }

        MemoryState {
            memory,
            usage,
            precedence,
            link,
            read_weights,
            write_weights,
            read_vectors,
        }
    }
}

/// Gated write weighting: blend of the allocation and content candidates,
/// scaled by the overall write gate. Both candidates sum to 1, the blend is
/// convex, so the result sums to at most `write_gate` ≤ 1.
pub fn write_weighting(
    allocation: &Array1<f32>,
    content: &Array1<f32>,
    allocation_gate: f32,
    write_gate: f32,
) -> Array1<f32> {
    (allocation * allocation_gate + &(content * (1.0 - allocation_gate))) * write_gate
}

/// Erase-then-write memory mutation:
///
/// M'[i, j] = M[i, j] · (1 − ww_i · e_j) + ww_i · v_j
pub fn erase_and_write(
    memory: &Array2<f32>,
    write_weights: &Array1<f32>,
    erase: &Array1<f32>,
    write: &Array1<f32>,
) -> Array2<f32> {
    let mut updated = memory.clone();
    for (i, mut row) in updated.outer_iter_mut().enumerate() {
        let w = write_weights[i];
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = *cell * (1.0 - w * erase[j]) + w * write[j];
        }
    }
    updated
}
