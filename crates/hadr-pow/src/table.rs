use crate::error::{PowTableError, PowTableResult};

/// Values of a function sampled at every integer in `[0, len)`.
///
/// Index 0 keeps the fill value; tables whose function is undefined at zero
/// mark it reserved so it refuses queries.
#[derive(Clone, Debug)]
pub struct IndexTable {
    name: &'static str,
    values: Vec<f64>,
    first_valid: usize,
}

impl IndexTable {
    pub fn new<F>(name: &'static str, len: usize, fill: f64, evaluate: F) -> Self
    where
        F: Fn(usize) -> f64,
    {
        let mut values = vec![fill; len];
        for (i, value) in values.iter_mut().enumerate().skip(1) {
            *value = evaluate(i);
        }

        Self::from_values(name, values)
    }

    /// Wraps values computed elsewhere, e.g. a running product.
    pub fn from_values(name: &'static str, values: Vec<f64>) -> Self {
        Self {
            name,
            values,
            first_valid: 0,
        }
    }

    pub fn with_reserved_zero(mut self) -> Self {
        self.first_valid = 1;
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> PowTableResult<f64> {
        if i < self.first_valid {
            return Err(PowTableError::ReservedIndex {
                table: self.name,
                index: i,
            });
        }

        self.values
            .get(i)
            .copied()
            .ok_or(PowTableError::OutOfRange {
                table: self.name,
                index: i,
                bound: self.values.len(),
            })
    }

    /// Lookup for indices already clamped by the caller's interpolation bounds.
    #[inline]
    pub(crate) fn at(&self, i: usize) -> f64 {
        debug_assert!(i >= self.first_valid);
        self.values[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_from_one_and_keeps_fill_at_zero() {
        let table = IndexTable::new("square", 4, -1.0, |i| (i * i) as f64);

        assert_eq!(table.len(), 4);
        assert_eq!(table.get(0), Ok(-1.0));
        assert_eq!(table.get(3), Ok(9.0));
    }

    #[test]
    fn rejects_reserved_and_out_of_range() {
        let table = IndexTable::new("square", 4, 0.0, |i| (i * i) as f64).with_reserved_zero();

        assert_eq!(
            table.get(0),
            Err(PowTableError::ReservedIndex {
                table: "square",
                index: 0
            })
        );
        assert_eq!(
            table.get(4),
            Err(PowTableError::OutOfRange {
                table: "square",
                index: 4,
                bound: 4
            })
        );
    }
}
