//! Post-query grouping of flat joined rows
//!
//! Joins such as `industries LEFT JOIN companies_industries` return one row per
//! association, with a null on the far side when there is none. Handlers turn
//! those rows into nested structures with [`group_by_key`].

use indexmap::IndexMap;
use std::hash::Hash;

/// Group rows into `key -> values`, keeping first-seen key order.
///
/// `split` maps a row to its key and an optional associated value. A `None`
/// value still registers the key (with no values), which is how left-joined
/// rows without a match are represented. Duplicate values under one key are
/// kept once.
pub fn group_by_key<R, K, V, F>(rows: impl IntoIterator<Item = R>, split: F) -> IndexMap<K, Vec<V>>
where
    K: Hash + Eq,
    V: PartialEq,
    F: Fn(R) -> (K, Option<V>),
{
    let mut groups: IndexMap<K, Vec<V>> = IndexMap::new();

    for row in rows {
        let (key, value) = split(row);
        let values = groups.entry(key).or_default();
        if let Some(value) = value {
            if !values.contains(&value) {
                values.push(value);
            }
        }
    }

    groups
}
