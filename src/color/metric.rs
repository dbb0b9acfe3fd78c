use crate::color::{ColorError, Lab};

/// Euclidean distance between two LAB colors. Lower means more similar;
/// symmetric, and zero for identical inputs.
pub fn euclidean_distance(a: &Lab, b: &Lab) -> f64 {
    let dl = a.l - b.l;
    let da = a.a - b.a;
    let db = a.b - b.b;
    (dl * dl + da * da + db * db).sqrt()
}

/// Cosine similarity between two concatenated signature vectors. Higher
/// means more similar; symmetric, and clamped to [-1, 1] against floating
/// point drift.
///
/// # Errors
///
/// Fails with `ColorError::DegenerateVector` if either vector has zero norm,
/// and with `ColorError::InvalidParameter` if the dimensions differ (which
/// means the caller compared signatures from different configurations).
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64, ColorError> {
    if a.len() != b.len() {
        return Err(ColorError::InvalidParameter(format!(
            "signature dimensions differ: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(ColorError::DegenerateVector);
    }

    Ok((dot / (norm_a * norm_b)).clamp(-1.0, 1.0))
}
