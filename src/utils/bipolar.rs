//! Bipolar vector helpers
//!
//! States and memories are `f64` vectors whose entries are `-1.0` or `+1.0`.
//! Images are `n×n` matrices of `0.0` (off) and `1.0` (on).

use ndarray::{Array1, Array2, ArrayBase, Data, Ix1};
use rand::seq::index;
use rand::Rng;

use crate::error::{HopfieldError, Result};

/// Check whether a value is `-1.0` or `+1.0`
pub fn is_bipolar(value: f64) -> bool {
    value == 1.0 || value == -1.0
}

/// Reject the first entry that is not bipolar
///
/// Works on anything that iterates over `&f64`: slices, `Array1`, views,
/// and `Array2` (in which case the reported index is the logical
/// row-major position).
pub fn validate_bipolar<'a, I>(values: I) -> Result<()>
where
    I: IntoIterator<Item = &'a f64>,
{
    match values
        .into_iter()
        .enumerate()
        .find(|(_, value)| !is_bipolar(**value))
    {
        Some((index, &value)) => Err(HopfieldError::NotBipolar { index, value }),
        None => Ok(()),
    }
}

/// Count the positions where two equal-length vectors differ
pub fn hamming<S1, S2>(a: &ArrayBase<S1, Ix1>, b: &ArrayBase<S2, Ix1>) -> Result<usize>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    if a.len() != b.len() {
        return Err(HopfieldError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    Ok(a.iter().zip(b.iter()).filter(|(x, y)| x != y).count())
}

/// Decode a bipolar state of length `n²` into an `n×n` image
///
/// `-1` becomes `0.0` and `+1` becomes `1.0`; the state is laid out
/// row-major. An empty state decodes to a `0×0` image.
pub fn decode<S>(state: &ArrayBase<S, Ix1>) -> Result<Array2<f64>>
where
    S: Data<Elem = f64>,
{
    let len = state.len();
    let side = (len as f64).sqrt().round() as usize;
    if side * side != len {
        return Err(HopfieldError::NotPerfectSquare(len));
    }
    validate_bipolar(state)?;

    Ok(Array2::from_shape_fn((side, side), |(row, col)| {
        if state[row * side + col] > 0.0 {
            1.0
        } else {
            0.0
        }
    }))
}

/// Encode an image into a bipolar state (row-major)
///
/// Pixels at or above `0.5` are on (`+1`), everything else is off (`-1`).
pub fn encode<S>(image: &ArrayBase<S, ndarray::Ix2>) -> Array1<f64>
where
    S: Data<Elem = f64>,
{
    image
        .iter()
        .map(|&pixel| if pixel >= 0.5 { 1.0 } else { -1.0 })
        .collect()
}

/// Flip a fraction of the entries of a bipolar state
///
/// Exactly `round(fraction * len)` distinct positions are flipped, so the
/// Hamming distance between input and output is known in advance.
/// `fraction` is clamped to `[0, 1]`.
pub fn corrupt<S, R>(state: &ArrayBase<S, Ix1>, fraction: f64, rng: &mut R) -> Array1<f64>
where
    S: Data<Elem = f64>,
    R: Rng + ?Sized,
{
    let mut noisy = state.to_owned();
    let len = noisy.len();
    let flips = (fraction.clamp(0.0, 1.0) * len as f64).round() as usize;

    for position in index::sample(rng, len, flips.min(len)).into_iter() {
        noisy[position] = -noisy[position];
    }

    noisy
}

/// Draw `count` random bipolar memories of the given dimension
///
/// Returns an `dimension × count` matrix; each column is one memory.
pub fn random_memories<R>(dimension: usize, count: usize, rng: &mut R) -> Array2<f64>
where
    R: Rng + ?Sized,
{
    Array2::from_shape_fn((dimension, count), |_| {
        if rng.gen_bool(0.5) {
            1.0
        } else {
            -1.0
        }
    })
}
