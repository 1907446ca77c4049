use crate::problem::{GuestId, TimeValue};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
enum IntervalSide {
    End,
    Begin,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, derive_more::Display)]
pub enum IntervalError {
    #[display(fmt = "empty interval [{}, {})", _0, _1)]
    Empty(TimeValue, TimeValue),
    #[display(fmt = "overlaps the interval held by {}", _0)]
    Overlap(GuestId),
}

impl std::error::Error for IntervalError {}

/// Half-open intervals `[a, b)` that never overlap, each tagged with the guest
/// holding it. An end and a begin at the same instant are allowed to touch.
#[derive(Default, Debug)]
pub struct NonOverlappingIntervals {
    intervals: Vec<((TimeValue, IntervalSide), GuestId)>,
}

impl NonOverlappingIntervals {
    pub fn new() -> Self {
        NonOverlappingIntervals {
            intervals: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.intervals.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn try_insert(&mut self, a: TimeValue, b: TimeValue, guest: GuestId) -> Result<(), IntervalError> {
        if a >= b {
            return Err(IntervalError::Empty(a, b));
        }

        let start = (a, IntervalSide::Begin);
        let end = (b, IntervalSide::End);

        let idx1 = match self.intervals.binary_search_by_key(&&start, |(k, _)| k) {
            Ok(idx) => {
                return Err(IntervalError::Overlap(self.intervals[idx].1));
            }
            Err(idx) => idx,
        };

        if idx1 > 0 && !matches!(self.intervals[idx1 - 1].0 .1, IntervalSide::End) {
            return Err(IntervalError::Overlap(self.intervals[idx1 - 1].1));
        }

        let idx2 = match self.intervals.binary_search_by_key(&&end, |(k, _)| k) {
            Ok(idx) => {
                return Err(IntervalError::Overlap(self.intervals[idx].1));
            }
            Err(idx) => idx,
        };

        if idx2 < self.intervals.len() && !matches!(self.intervals[idx2].0 .1, IntervalSide::Begin)
        {
            return Err(IntervalError::Overlap(self.intervals[idx2].1));
        }

        // Anything between the two insertion points is swallowed by [a, b).
        if idx1 != idx2 {
            return Err(IntervalError::Overlap(self.intervals[idx2 - 1].1));
        }

        self.intervals
            .splice(idx1..idx1, [(start, guest), (end, guest)]);

        Ok(())
    }

    pub fn remove(&mut self, a: TimeValue, b: TimeValue) -> Option<GuestId> {
        let start = (a, IntervalSide::Begin);
        let end = (b, IntervalSide::End);

        let idx1 = self
            .intervals
            .binary_search_by_key(&&start, |(k, _)| k)
            .ok()?;
        let idx2 = self
            .intervals
            .binary_search_by_key(&&end, |(k, _)| k)
            .ok()?;

        if idx1 + 1 != idx2 || self.intervals[idx1].1 != self.intervals[idx2].1 {
            return None;
        }

        let guest = self.intervals[idx1].1;
        self.intervals.drain(idx1..=idx2);

        Some(guest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g(i: usize) -> GuestId {
        GuestId::from(i)
    }

    #[test]
    pub fn adjacent_intervals_fit() {
        {
            let mut x = NonOverlappingIntervals::new();
            for i in (-100..100).step_by(2) {
                assert!(x.try_insert(i, i + 1, g(0)).is_ok());
            }
        }
        {
            let mut x = NonOverlappingIntervals::new();
            for i in (-100..100).step_by(1).rev() {
                assert!(x.try_insert(i, i + 1, g(0)).is_ok());
            }
            assert_eq!(x.len(), 200);
        }
    }

    #[test]
    pub fn overlaps_are_reported() {
        let mut x = NonOverlappingIntervals::new();
        assert!(x.try_insert(50, 60, g(9)).is_ok());
        assert!(x.try_insert(40, 50, g(0)).is_ok());
        assert_eq!(x.remove(40, 50), Some(g(0)));

        assert_eq!(x.try_insert(45, 55, g(0)), Err(IntervalError::Overlap(g(9))));
        assert_eq!(x.try_insert(50, 55, g(0)), Err(IntervalError::Overlap(g(9))));
        assert_eq!(x.try_insert(55, 56, g(0)), Err(IntervalError::Overlap(g(9))));
        assert_eq!(x.try_insert(45, 65, g(0)), Err(IntervalError::Overlap(g(9))));
        assert_eq!(x.try_insert(55, 65, g(0)), Err(IntervalError::Overlap(g(9))));

        assert!(x.try_insert(61, 65, g(1)).is_ok());
        assert!(x.try_insert(60, 61, g(2)).is_ok());
        assert_eq!(x.len(), 3);
    }

    #[test]
    pub fn empty_and_unknown() {
        let mut x = NonOverlappingIntervals::new();
        assert_eq!(x.try_insert(5, 5, g(0)), Err(IntervalError::Empty(5, 5)));
        assert!(x.try_insert(1, 4, g(0)).is_ok());
        assert_eq!(x.remove(1, 3), None);
        assert_eq!(x.remove(1, 4), Some(g(0)));
        assert!(x.is_empty());
    }
}
