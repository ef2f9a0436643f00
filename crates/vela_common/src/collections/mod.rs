mod aligned_array;

pub use aligned_array::*;

/// A trait used to define a strategy to reserve additional memory for containers.
pub trait ReserveStrategy {
    /// Calculate the new capacity for a container.
    ///
    /// `cur_capacity` represents the current capacity of the container.
    ///
    /// `min_capacity` represents the minimum required capacity to be able to resize.
    ///
    /// Returns `None` if the capacity were to overflow
    fn calculate(cur_capacity: usize, min_capacity: usize) -> Option<usize>;
}

/// A reserve strategy that will try to either return double the current capacity, or the minimum required capacity, whichever is bigger.
pub struct DoubleOrMinReserveStrategy;

impl ReserveStrategy for DoubleOrMinReserveStrategy {
    fn calculate(cur_capacity: usize, min_capacity: usize) -> Option<usize> {
        let double_cap = cur_capacity.saturating_mul(2);
        let new_cap = double_cap.max(min_capacity);
        (new_cap <= isize::MAX as usize).then_some(new_cap)
    }
}

/// A reserve strategy that will return a power of 2 capacity
pub struct Pow2ReserveStrategy;

impl ReserveStrategy for Pow2ReserveStrategy {
    fn calculate(_cur_capacity: usize, min_capacity: usize) -> Option<usize> {
        min_capacity.checked_next_power_of_two().filter(|cap| *cap <= isize::MAX as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_or_min() {
        assert_eq!(DoubleOrMinReserveStrategy::calculate(0, 4), Some(4));
        assert_eq!(DoubleOrMinReserveStrategy::calculate(8, 9), Some(16));
        assert_eq!(DoubleOrMinReserveStrategy::calculate(8, 20), Some(20));
        assert_eq!(DoubleOrMinReserveStrategy::calculate(0, usize::MAX), None);
    }

    #[test]
    fn pow2() {
        assert_eq!(Pow2ReserveStrategy::calculate(0, 5), Some(8));
        assert_eq!(Pow2ReserveStrategy::calculate(8, 16), Some(16));
        assert_eq!(Pow2ReserveStrategy::calculate(0, usize::MAX), None);
    }
}
