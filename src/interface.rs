//! Interface vector: the controller's per-timestep addressing parameters
//!
//! The controller emits one flat vector per step; this module slices it
//! into the named sub-vectors that drive every addressing operation and
//! applies the fixed activations that put each parameter in its legal
//! range (strengths ≥ 1, gates and erase in (0, 1), read modes on the
//! 3-simplex).

use crate::addressing::softmax;
use crate::error::DncError;
use anyhow::Result;
use ndarray::{s, Array1, Array2};

/// Interface vector length for a given slot width W and read-head count R:
/// R·W read keys, R read strengths, W write key, 1 write strength, W erase,
/// W write, R free gates, 1 allocation gate, 1 write gate, 3·R read modes.
pub fn interface_len(slot_width: usize, read_heads: usize) -> usize {
    read_heads * slot_width + 3 * slot_width + 5 * read_heads + 3
}

/// Parsed interface vector, activations applied.
#[derive(Debug, Clone)]
pub struct Interface {
    /// Content keys for the read heads, one row per head (R×W)
    pub read_keys: Array2<f32>,
    /// Read key strengths, ≥ 1 (R)
    pub read_strengths: Array1<f32>,
    /// Content key for the write head (W)
    pub write_key: Array1<f32>,
    /// Write key strength, ≥ 1
    pub write_strength: f32,
    /// Erase vector, each component in (0, 1) (W)
    pub erase: Array1<f32>,
    /// Write vector, unconstrained (W)
    pub write: Array1<f32>,
    /// Free gates in (0, 1), one per read head (R)
    pub free_gates: Array1<f32>,
    /// Allocation gate in (0, 1): blend between allocation and content writes
    pub allocation_gate: f32,
    /// Write gate in (0, 1): overall write intensity
    pub write_gate: f32,
    /// Read mode distributions over {backward, content, forward} (R×3)
    pub read_modes: Array2<f32>,
}

impl Interface {
    /// Slice a raw interface vector in the fixed cumulative order and apply
    /// the activations. Fails only on a length mismatch, which is a
    /// configuration error on the caller's side.
    pub fn parse(xi: &Array1<f32>, slot_width: usize, read_heads: usize) -> Result<Self> {
        let expected = interface_len(slot_width, read_heads);
        if xi.len() != expected {
            return Err(DncError::InterfaceLengthMismatch {
                expected,
                actual: xi.len(),
            }
            .into());
        }

        let w = slot_width;
        let r = read_heads;
        let mut at = 0;
        let mut take = |len: usize| {
            let slice = xi.slice(s![at..at + len]).to_owned();
            at += len;
            slice
        };

        let read_keys = take(r * w).into_shape((r, w))?;
        let read_strengths = take(r).mapv(|v| 1.0 + softplus(v));
        let write_key = take(w);
        let write_strength = 1.0 + softplus(take(1)[0]);
        let erase = take(w).mapv(sigmoid);
        let write = take(w);
        let free_gates = take(r).mapv(sigmoid);
        let allocation_gate = sigmoid(take(1)[0]);
        let write_gate = sigmoid(take(1)[0]);
        let mode_logits = take(3 * r).into_shape((r, 3))?;

        let mut read_modes = Array2::zeros((r, 3));
        for (head, logits) in mode_logits.outer_iter().enumerate() {
            read_modes.row_mut(head).assign(&softmax(&logits.to_owned()));
        }

        Ok(Self {
            read_keys,
            read_strengths,
            write_key,
            write_strength,
            erase,
            write,
            free_gates,
            allocation_gate,
            write_gate,
            read_modes,
        })
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

fn softplus(x: f32) -> f32 {
    // ln(1 + e^x), written to stay finite for large |x|.
    x.max(0.0) + (-x.abs()).exp().ln_1p()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_wrong_length() {
        let xi = Array1::zeros(10);
        let err = Interface::parse(&xi, 4, 2).unwrap_err();
        let expected = interface_len(4, 2);
        assert!(err.to_string().contains(&expected.to_string()));
    }

    #[test]
    fn activations_land_in_legal_ranges() {
        let w = 4;
        let r = 2;
        let xi = Array1::from_iter((0..interface_len(w, r)).map(|i| (i as f32) * 0.37 - 3.0));
        let iface = Interface::parse(&xi, w, r).unwrap();

        assert_eq!(iface.read_keys.dim(), (r, w));
        assert!(iface.read_strengths.iter().all(|&b| b >= 1.0));
        assert!(iface.write_strength >= 1.0);
        assert!(iface.erase.iter().all(|&e| (0.0..=1.0).contains(&e)));
        assert!(iface.free_gates.iter().all(|&f| (0.0..=1.0).contains(&f)));
        assert!((0.0..=1.0).contains(&iface.allocation_gate));
        assert!((0.0..=1.0).contains(&iface.write_gate));
        for head in iface.read_modes.outer_iter() {
            assert!((head.sum() - 1.0).abs() < 1e-6);
            assert!(head.iter().all(|&m| m >= 0.0));
        }
    }

    #[test]
    fn slices_land_in_declared_order() {
        let w = 2;
        let r = 1;
        // kr(2) betar(1) kw(2) betaw(1) e(2) v(2) f(1) ga(1) gw(1) pi(3)
        let xi = Array1::from(vec![
            9.0, 8.0, 0.0, 7.0, 6.0, 0.0, 0.0, 0.0, 5.0, 4.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        ]);
        let iface = Interface::parse(&xi, w, r).unwrap();
        assert_eq!(iface.read_keys[[0, 0]], 9.0);
        assert_eq!(iface.read_keys[[0, 1]], 8.0);
        assert_eq!(iface.write_key[0], 7.0);
        assert_eq!(iface.write_key[1], 6.0);
        assert_eq!(iface.write[0], 5.0);
        assert_eq!(iface.write[1], 4.0);
    }
}
