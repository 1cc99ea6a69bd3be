//! Shuffle order generation

use rand::Rng;

/// Produce a shuffled play order for `len` tracks with the track at
/// `current` first
///
/// The active track leads the shuffled order so toggling shuffle never
/// interrupts what is playing. The remainder is a uniform Fisher-Yates
/// permutation.
pub(crate) fn shuffled_order<R: Rng>(len: usize, current: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).filter(|&i| i != current).collect();

    // Fisher-Yates over everything after the pinned head
    for i in (1..order.len()).rev() {
        let j = rng.gen_range(0..=i);
        order.swap(i, j);
    }

    let mut result = Vec::with_capacity(len);
    if current < len {
        result.push(current);
    }
    result.extend(order);
    result
}
