//! Verse identifier sampling.
//!
//! Draws are uniform and independent over `[1, universe_size]`; duplicates
//! are permitted and each duplicate is enriched independently downstream.

use rand::Rng;

use versefeed_shared::{Result, VerseId, VersefeedError};

/// Draw exactly `count` identifiers uniformly from `[1, universe_size]`.
///
/// `count == 0` yields an empty vec. A zero universe is a caller error.
pub fn sample(count: u32, universe_size: u32) -> Result<Vec<VerseId>> {
    sample_with(&mut rand::rng(), count, universe_size)
}

/// Like [`sample`], but drawing from the given RNG so callers and tests can
/// make the draw deterministic.
pub fn sample_with<R: Rng + ?Sized>(
    rng: &mut R,
    count: u32,
    universe_size: u32,
) -> Result<Vec<VerseId>> {
    if universe_size == 0 {
        return Err(VersefeedError::invalid_argument(
            "universe size must be at least 1",
        ));
    }

    let ids = (0..count)
        .map(|_| VerseId(rng.random_range(1..=universe_size)))
        .collect();

    Ok(ids)
}

/// Produce the explicit inclusive identifier range `[from, to]`.
///
/// The range must be non-empty and lie within `[1, universe_size]`.
pub fn sample_range(from: u32, to: u32, universe_size: u32) -> Result<Vec<VerseId>> {
    if universe_size == 0 {
        return Err(VersefeedError::invalid_argument(
            "universe size must be at least 1",
        ));
    }
    if from == 0 || from > to {
        return Err(VersefeedError::invalid_argument(format!(
            "invalid verse range {from}..={to}"
        )));
    }
    if to > universe_size {
        return Err(VersefeedError::invalid_argument(format!(
            "range end {to} exceeds universe size {universe_size}"
        )));
    }

    Ok((from..=to).map(VerseId).collect())
}
