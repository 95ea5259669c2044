//! Vector math for similarity computation

use ndarray::Array2;

/// Dot product of two vectors. Mismatched lengths yield 0.
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Cosine similarity between two vectors
///
/// Returns 0.0 when either vector has zero norm or the lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot = dot_product(a, b);
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Pairwise cosine similarity between all rows of a matrix
///
/// Rows are L2-normalized and multiplied by their transpose, producing a
/// square symmetric matrix. Zero rows contribute 0.0 everywhere instead
/// of NaN.
pub fn pairwise_cosine(rows: &Array2<f32>) -> Array2<f32> {
    let mut normalized = rows.clone();
    for mut row in normalized.rows_mut() {
        let norm: f32 = row.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            row.mapv_inplace(|x| x / norm);
        }
    }
    normalized.dot(&normalized.t())
}
