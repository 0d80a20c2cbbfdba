use std::collections::HashSet;
use std::hash::Hash;

/// Elements of `a` that are not present in `b`.
///
/// Membership uses value equality through a hash set built from `b`. The
/// result keeps `a`'s order; duplicates in `a` are kept.
pub fn difference<T>(a: &[T], b: &[T]) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let exclude: HashSet<&T> = b.iter().collect();
    a.iter()
        .filter(|item| !exclude.contains(item))
        .cloned()
        .collect()
}

/// `items` with later duplicates dropped, first-seen order kept.
pub fn unique<T>(items: &[T]) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let mut seen: HashSet<&T> = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| seen.insert(*item))
        .cloned()
        .collect()
}
