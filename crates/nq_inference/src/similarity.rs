use nq_core::{Error, Result};

/// Cosine similarity of two equal-length vectors, in `[-1, 1]`.
///
/// NaN components count as zero. If either vector has zero norm the
/// similarity is `0.0`.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let (dot, norm_a, norm_b) = a
        .iter()
        .zip(b)
        .map(|(&x, &y)| (component(x), component(y)))
        .fold((0.0, 0.0, 0.0), |(dot, norm_a, norm_b), (x, y)| {
            (dot + x * y, norm_a + x * x, norm_b + y * y)
        });

    let norm = norm_a.sqrt() * norm_b.sqrt();
    if norm == 0.0 {
        return Ok(0.0);
    }
    Ok((dot / norm).clamp(-1.0, 1.0))
}

fn component(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}
