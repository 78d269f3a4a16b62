use mazing_core::BigInt;
use num_traits::Zero;

// HELPER FUNCTIONS
// ================================================================================================

/// Returns the nth triangular number, the cell count of an n-row triangular arena.
#[inline(always)]
pub(crate) const fn tri(n: usize) -> usize {
    n * (n + 1) / 2
}

/// Divides `num` by `den`, which must divide it exactly.
///
/// Fraction-free elimination guarantees divisibility here; a nonzero remainder means the
/// elimination state is corrupt.
#[inline]
pub(crate) fn exact_div(num: BigInt, den: &BigInt) -> BigInt {
    debug_assert!(
        (&num % den).is_zero(),
        "inexact division in fraction-free elimination: {num} / {den}"
    );
    num / den
}

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangular_numbers() {
        assert_eq!(tri(0), 0);
        assert_eq!(tri(1), 1);
        assert_eq!(tri(4), 10);
        assert_eq!(tri(10), 55);
    }

    #[test]
    fn exact_division_divides() {
        let num = BigInt::from(21);
        let den = BigInt::from(-7);
        assert_eq!(exact_div(num, &den), BigInt::from(-3));
    }

    #[test]
    #[should_panic(expected = "inexact division")]
    fn inexact_division_panics() {
        exact_div(BigInt::from(10), &BigInt::from(3));
    }
}
