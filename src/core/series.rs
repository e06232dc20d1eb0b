mod combine;

pub use self::combine::CombineChannels;

use std::collections::HashMap;

/// Per-channel-per-date totals keyed by `<channel>_<date>`.
pub type AggregatedSeries = HashMap<String, Vec<Option<f64>>>;
