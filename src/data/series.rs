//! Value Series
//! Append-only record of submitted temperatures and the parser that feeds it.

use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Please enter a valid integer (got {input:?})")]
    InvalidNumericInput {
        input: String,
        #[source]
        source: ParseIntError,
    },
}

/// Parse the raw contents of the entry field as a signed integer.
pub fn parse_value(raw: &str) -> Result<i64, InputError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|source| InputError::InvalidNumericInput {
            input: raw.to_string(),
            source,
        })
}

/// Submitted values in submission order. Only ever grows.
#[derive(Debug, Clone, Default)]
pub struct ValueSeries {
    values: Vec<i64>,
}

impl ValueSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value and return the new length, which is also its 1-based index.
    pub fn push(&mut self, value: i64) -> usize {
        self.values.push(value);
        self.values.len()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at a 1-based index.
    pub fn get(&self, index: usize) -> Option<i64> {
        index
            .checked_sub(1)
            .and_then(|i| self.values.get(i))
            .copied()
    }

    pub fn last(&self) -> Option<i64> {
        self.values.last().copied()
    }

    #[cfg(test)]
    pub fn values(&self) -> &[i64] {
        &self.values
    }
}
