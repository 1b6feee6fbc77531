//! Capacity schedule: the fixed, ascending sequence of bucket counts the
//! hash form moves through as it grows.

use core::fmt;

/// Default bucket counts, each a prime just below a power of two.
pub const DEFAULT_BUCKET_COUNTS: [usize; 8] = [509, 1021, 2039, 4093, 8191, 16381, 32749, 65521];

/// An immutable, validated sequence of bucket counts.
///
/// A table starts at [`Schedule::initial`] and steps to
/// [`Schedule::next_after`] its current count when it grows. Once the
/// largest count is reached the table stops growing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Schedule {
    sizes: &'static [usize],
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScheduleError {
    Empty,
    ZeroCapacity,
    NotAscending { index: usize },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::Empty => f.write_str("capacity schedule is empty"),
            ScheduleError::ZeroCapacity => f.write_str("capacity schedule contains zero"),
            ScheduleError::NotAscending { index } => {
                write!(f, "capacity schedule is not ascending at index {}", index)
            }
        }
    }
}

impl std::error::Error for ScheduleError {}

impl Schedule {
    pub const DEFAULT: Schedule = Schedule {
        sizes: &DEFAULT_BUCKET_COUNTS,
    };

    /// Validate a custom schedule: non-empty, no zero entries, strictly
    /// ascending.
    pub fn new(sizes: &'static [usize]) -> Result<Self, ScheduleError> {
        match sizes.first() {
            None => return Err(ScheduleError::Empty),
            Some(0) => return Err(ScheduleError::ZeroCapacity),
            Some(_) => {}
        }
        if let Some(i) = sizes.windows(2).position(|w| w[0] >= w[1]) {
            return Err(ScheduleError::NotAscending { index: i + 1 });
        }
        Ok(Self { sizes })
    }

    pub fn initial(&self) -> usize {
        self.sizes[0]
    }

    pub fn largest(&self) -> usize {
        self.sizes[self.sizes.len() - 1]
    }

    /// Next bucket count above `current`, or `None` once the schedule is
    /// exhausted.
    pub fn next_after(&self, current: usize) -> Option<usize> {
        self.sizes.iter().copied().find(|&size| size > current)
    }

    pub fn sizes(&self) -> &'static [usize] {
        self.sizes
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_steps_through_primes() {
        let s = Schedule::default();
        assert_eq!(s.initial(), 509);
        assert_eq!(s.largest(), 65521);

        let mut seen = vec![s.initial()];
        let mut cur = s.initial();
        while let Some(next) = s.next_after(cur) {
            seen.push(next);
            cur = next;
        }
        assert_eq!(seen, DEFAULT_BUCKET_COUNTS);
    }

    #[test]
    fn next_after_largest_is_none() {
        let s = Schedule::DEFAULT;
        assert_eq!(s.next_after(65521), None);
        assert_eq!(s.next_after(usize::MAX), None);
    }

    #[test]
    fn custom_schedule_validation() {
        assert_eq!(Schedule::new(&[]), Err(ScheduleError::Empty));
        assert_eq!(Schedule::new(&[0, 4]), Err(ScheduleError::ZeroCapacity));
        assert_eq!(
            Schedule::new(&[3, 7, 7]),
            Err(ScheduleError::NotAscending { index: 2 })
        );
        assert_eq!(
            Schedule::new(&[5, 2]),
            Err(ScheduleError::NotAscending { index: 1 })
        );

        let s = Schedule::new(&[1, 2, 5]).unwrap();
        assert_eq!(s.sizes(), &[1, 2, 5]);
        assert_eq!(s.next_after(1), Some(2));
        assert_eq!(s.next_after(2), Some(5));
        assert_eq!(s.next_after(5), None);
    }

    #[test]
    fn single_entry_schedule_never_grows() {
        let s = Schedule::new(&[13]).unwrap();
        assert_eq!(s.initial(), s.largest());
        assert_eq!(s.next_after(13), None);
    }
}
