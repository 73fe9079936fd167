//! Data module - Recorded values and input parsing

mod series;

pub use series::{parse_value, InputError, ValueSeries};
