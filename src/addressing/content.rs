//! Content-based addressing: sharpened cosine-similarity lookup

use super::softmax;
use ndarray::{Array1, Array2, Axis};

/// Content weighting over the rows of the memory matrix.
///
/// Each row is scored by cosine similarity against `key`, scaled by the
/// key `strength`, and the scores are passed through a softmax, so the
/// result is a probability distribution over the N slots.
///
/// When the product of the row and key norms is exactly zero the raw dot
/// product is used in place of the normalized similarity. This keeps the
/// operation defined over a freshly zeroed memory (every row then scores
/// 0 and the weighting degenerates to uniform). The check is exact, not
/// epsilon-tolerant.
pub fn content_weighting(memory: &Array2<f32>, key: &Array1<f32>, strength: f32) -> Array1<f32> {
    let key_norm = key.dot(key).sqrt();
    let mut scores = Array1::zeros(memory.nrows());
    for (i, row) in memory.axis_iter(Axis(0)).enumerate() {
        let dot = row.dot(key);
        let denominator = row.dot(&row).sqrt() * key_norm;
        let similarity = if denominator == 0.0 {
            dot
        } else {
            dot / denominator
        };
        scores[i] = similarity * strength;
    }
    softmax(&scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    fn sample_memory() -> Array2<f32> {
        let mut memory = Array2::zeros((4, 3));
        memory.row_mut(0).assign(&arr1(&[1.0, 0.0, 0.0]));
        memory.row_mut(1).assign(&arr1(&[0.0, 1.0, 0.0]));
        memory.row_mut(2).assign(&arr1(&[1.0, 1.0, 0.0]));
        memory.row_mut(3).assign(&arr1(&[-1.0, 0.0, 0.0]));
        memory
    }

    #[test]
    fn weighting_is_a_distribution() {
        let memory = sample_memory();
        let key = arr1(&[1.0, 0.2, 0.0]);
        for &strength in &[0.0, 1.0, 5.0, 20.0] {
            let w = content_weighting(&memory, &key, strength);
            assert!(w.iter().all(|&v| v >= 0.0));
            assert!((w.sum() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn higher_strength_sharpens_toward_best_match() {
        let memory = sample_memory();
        let key = arr1(&[1.0, 0.0, 0.0]);
        let soft = content_weighting(&memory, &key, 1.0);
        let sharp = content_weighting(&memory, &key, 10.0);
        assert!(sharp[0] > soft[0]);
        assert!(sharp[0] > sharp[3]);
    }

    #[test]
    fn zero_memory_falls_back_to_uniform() {
        let memory = Array2::zeros((5, 3));
        let key = arr1(&[0.4, -0.3, 1.0]);
        let w = content_weighting(&memory, &key, 7.0);
        for &v in w.iter() {
            assert!((v - 0.2).abs() < 1e-6);
        }
    }

    #[test]
    fn zero_key_falls_back_to_uniform() {
        let memory = sample_memory();
        let key = arr1(&[0.0, 0.0, 0.0]);
        let w = content_weighting(&memory, &key, 3.0);
        for &v in w.iter() {
            assert!((v - 0.25).abs() < 1e-6);
        }
    }
}
