//! Slice helpers: queries, set operations, grouping and batching.

use rand::seq::SliceRandom;
use rand::thread_rng;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use super::{UtilError, UtilResult};

/// Sort direction for [`sort_by_key`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

pub fn first<T>(items: &[T]) -> Option<&T> {
    items.first()
}

pub fn last<T>(items: &[T]) -> Option<&T> {
    items.last()
}

/// Remove duplicates, keeping the first occurrence of each value
pub fn unique<T: Eq + Hash + Clone>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect()
}

/// Flatten one level of nesting
pub fn flatten<T: Clone>(nested: &[Vec<T>]) -> Vec<T> {
    nested.iter().flatten().cloned().collect()
}

/// Copy of `items` without any element equal to `value`
pub fn remove_value<T: PartialEq + Clone>(items: &[T], value: &T) -> Vec<T> {
    items.iter().filter(|item| *item != value).cloned().collect()
}

/// Copy of `items` without the elements matching `predicate`
///
/// The predicate receives each element and its index.
pub fn remove_where<T, F>(items: &[T], mut predicate: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T, usize) -> bool,
{
    items
        .iter()
        .enumerate()
        .filter(|(index, item)| !predicate(*item, *index))
        .map(|(_, item)| item.clone())
        .collect()
}

pub fn random_element<T>(items: &[T]) -> Option<&T> {
    items.choose(&mut thread_rng())
}

/// Shuffle in place (Fisher-Yates)
pub fn shuffle<T>(items: &mut [T]) {
    items.shuffle(&mut thread_rng());
}

/// Inclusive range from `start` to `end`
///
/// Counts down when `start > end`. Only the magnitude of `step` is used, so
/// the sequence always moves toward `end`.
///
/// # Errors
/// * `UtilError::ZeroStep` - If `step` is zero
pub fn range(start: i64, end: i64, step: i64) -> UtilResult<Vec<i64>> {
    if step == 0 {
        return Err(UtilError::ZeroStep);
    }
    let step = step
        .checked_abs()
        .ok_or_else(|| UtilError::invalid("range", "step magnitude overflows"))?;

    let mut values = Vec::new();
    let mut current = start;
    if start < end {
        while current <= end {
            values.push(current);
            match current.checked_add(step) {
                Some(next) => current = next,
                None => break,
            }
        }
    } else {
        while current >= end {
            values.push(current);
            match current.checked_sub(step) {
                Some(next) => current = next,
                None => break,
            }
        }
    }
    Ok(values)
}

/// Group elements by the key returned from `key_fn`
pub fn group_by<T, K, F>(items: &[T], mut key_fn: F) -> HashMap<K, Vec<T>>
where
    T: Clone,
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut groups: HashMap<K, Vec<T>> = HashMap::new();
    for item in items {
        groups.entry(key_fn(item)).or_default().push(item.clone());
    }
    groups
}

/// Elements of `left` that also appear in `right`, in `left` order
pub fn intersection<T: Eq + Hash + Clone>(left: &[T], right: &[T]) -> Vec<T> {
    if left.is_empty() || right.is_empty() {
        return Vec::new();
    }
    let lookup: HashSet<&T> = right.iter().collect();
    left.iter()
        .filter(|item| lookup.contains(item))
        .cloned()
        .collect()
}

/// All distinct elements of `left` followed by those of `right`, first-seen order
pub fn union<T: Eq + Hash + Clone>(left: &[T], right: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(left.len() + right.len());
    left.iter()
        .chain(right.iter())
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect()
}

/// Elements of `left` absent from `right`
pub fn difference<T: Eq + Hash + Clone>(left: &[T], right: &[T]) -> Vec<T> {
    let lookup: HashSet<&T> = right.iter().collect();
    left.iter()
        .filter(|item| !lookup.contains(item))
        .cloned()
        .collect()
}

/// Split into batches of at most `size` elements; a zero size yields no batches
pub fn chunk<T: Clone>(items: &[T], size: usize) -> Vec<Vec<T>> {
    if size == 0 {
        return Vec::new();
    }
    items.chunks(size).map(<[T]>::to_vec).collect()
}

/// Sum of the values, ignoring NaN
pub fn sum(values: &[f64]) -> f64 {
    values.iter().filter(|value| !value.is_nan()).sum()
}

/// Mean of the values, ignoring NaN; `0.0` when nothing is left
pub fn average(values: &[f64]) -> f64 {
    let numbers: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if numbers.is_empty() {
        0.0
    } else {
        numbers.iter().sum::<f64>() / numbers.len() as f64
    }
}

/// Stable in-place sort by a derived key
pub fn sort_by_key<T, K, F>(items: &mut [T], mut key_fn: F, order: SortOrder)
where
    K: PartialOrd,
    F: FnMut(&T) -> K,
{
    items.sort_by(|a, b| {
        let ordering = key_fn(a)
            .partial_cmp(&key_fn(b))
            .unwrap_or(Ordering::Equal);
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}
