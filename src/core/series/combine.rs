use std::{
    collections::{HashMap, hash_map::Entry},
    hash::Hash,
    ops::AddAssign,
};

impl<T> CombineChannels for T where T: ?Sized {}

pub trait CombineChannels {
    /// Fold per-component series into element-wise totals per key.
    ///
    /// The first sequence seen under a key becomes the running total; every
    /// later sequence adds into it index by index. An index where the total is
    /// already `None` stays `None`, and a `None` contribution leaves a numeric
    /// total untouched. Sequences are assumed positionally aligned; nothing is
    /// sorted or interpolated.
    #[must_use]
    fn combine_channels<K, V>(self) -> HashMap<K, Vec<Option<V>>>
    where
        Self: Sized + Iterator<Item = (K, Vec<Option<V>>)>,
        K: Eq + Hash,
        V: Copy + AddAssign,
    {
        let mut totals: HashMap<K, Vec<Option<V>>> = HashMap::new();
        for (key, points) in self {
            match totals.entry(key) {
                Entry::Vacant(entry) => {
                    entry.insert(points);
                }
                Entry::Occupied(entry) => {
                    for (total, point) in entry.into_mut().iter_mut().zip(points) {
                        if let (Some(total), Some(point)) = (total.as_mut(), point) {
                            *total += point;
                        }
                    }
                }
            }
        }
        totals
    }
}
