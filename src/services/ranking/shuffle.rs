use std::num::NonZeroUsize;

use rand::{seq::SliceRandom, Rng};

/// Sorts by descending score. The sort is stable, so ties keep input order.
pub fn sort_by_score_desc<T, F>(items: &mut [T], score_of: F)
where
    F: Fn(&T) -> f64,
{
    items.sort_by(|a, b| score_of(b).total_cmp(&score_of(a)));
}

/// Quality-preserving randomized ordering
///
/// Items are sorted by descending score and cut into contiguous bands of
/// `band_size`; each band is shuffled on its own and the bands are
/// concatenated in order. An item therefore never lands more than
/// `band_size - 1` positions away from its sorted rank, and a band size of 1
/// returns the sorted order unchanged.
///
/// Callers truncate the returned sequence, never the input, so a band that
/// straddles the cut is shuffled as a whole first.
pub fn intelligent_shuffle<T, F, R>(
    mut items: Vec<T>,
    score_of: F,
    band_size: NonZeroUsize,
    rng: &mut R,
) -> Vec<T>
where
    F: Fn(&T) -> f64,
    R: Rng + ?Sized,
{
    sort_by_score_desc(&mut items, score_of);

    if band_size.get() > 1 {
        for band in items.chunks_mut(band_size.get()) {
            band.shuffle(rng);
        }
    }

    items
}
