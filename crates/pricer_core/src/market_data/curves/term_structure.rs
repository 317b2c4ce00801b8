//! Shared storage for tenor-indexed curves.

use crate::math::interpolators::lerp;
use crate::types::Date;

/// Named sequence of `(tenor, value)` points kept in insertion order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) struct TermStructure {
    name: String,
    tenors: Vec<Date>,
    values: Vec<f64>,
}

impl TermStructure {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tenors: Vec::new(),
            values: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Appends a point unless the tenor is already present.
    pub(crate) fn insert(&mut self, tenor: Date, value: f64) -> bool {
        if self.tenors.contains(&tenor) {
            return false;
        }
        self.tenors.push(tenor);
        self.values.push(value);
        true
    }

    /// Flat outside the tenor range, linear in calendar days inside it.
    /// A curve with no points evaluates to zero.
    pub(crate) fn value_at(&self, date: Date) -> f64 {
        let (first, last) = match (self.tenors.first(), self.tenors.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return 0.0,
        };
        let n = self.values.len();
        if date <= first {
            return self.values[0];
        }
        if date >= last {
            return self.values[n - 1];
        }

        // n >= 2 here; the clamp only matters for out-of-order tenors
        let pos = self
            .tenors
            .partition_point(|t| *t <= date)
            .clamp(1, n - 1);
        let (t0, t1) = (self.tenors[pos - 1], self.tenors[pos]);
        if t0 == date {
            return self.values[pos - 1];
        }
        lerp(
            t0.day_number() as f64,
            self.values[pos - 1],
            t1.day_number() as f64,
            self.values[pos],
            date.day_number() as f64,
        )
    }

    pub(crate) fn shock(&mut self, delta: f64) {
        for value in &mut self.values {
            *value += delta;
        }
    }

    pub(crate) fn pillars(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.tenors.iter().copied().zip(self.values.iter().copied())
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.tenors.len()
    }
}
