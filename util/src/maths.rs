//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Limit a value to the closed range `[min, max]`.
pub fn clamp<T>(value: &T, min: &T, max: &T) -> T 
where
    T: Float
{
    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}

/// Return the largest absolute value in the slice, or zero if it is empty.
pub fn max_abs<T>(values: &[T]) -> T
where
    T: Float
{
    values
        .iter()
        .fold(T::zero(), |acc, v| acc.max(v.abs()))
}

/// Square a value while preserving its sign.
pub fn signed_square<T>(value: T) -> T
where
    T: Float
{
    (value * value).copysign(value)
}
