//! Derived statistics recomputed from full snapshots.
//!
//! # Responsibility
//! - Turn one section's snapshot into the aggregate view model it displays.
//!
//! # Invariants
//! - Every function here is pure: same snapshot (and `today`) in, same output.
//! - Empty input yields zeroed aggregates, never NaN.
//! - Grouped rollups keep first-seen order of their keys.

pub mod clients;
pub mod finance;
pub mod inventory;
pub mod schedule;
pub mod technicians;

use std::collections::HashMap;

/// Rounds half away from zero to `decimals` places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

/// `part / whole * 100`, or `0` when `whole` is not positive.
pub(crate) fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// Arithmetic mean, or `0` for an empty set.
pub(crate) fn mean(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// Groups `items` by `key`, folding each into an accumulator, in first-seen key order.
pub(crate) fn rollup<'a, T, V, K, U>(
    items: impl IntoIterator<Item = &'a T>,
    key: K,
    mut update: U,
) -> Vec<(String, V)>
where
    T: 'a,
    V: Default,
    K: Fn(&T) -> String,
    U: FnMut(&mut V, &T),
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, V)> = Vec::new();
    for item in items {
        let name = key(item);
        let slot = *index.entry(name.clone()).or_insert_with(|| {
            groups.push((name, V::default()));
            groups.len() - 1
        });
        update(&mut groups[slot].1, item);
    }
    groups
}
