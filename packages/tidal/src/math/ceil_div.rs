use num_traits::{One, Zero};

pub trait CheckedCeilDiv: Sized {
    /// Perform ceiling division
    fn checked_ceil_div(&self, rhs: Self) -> Option<Self>;
}

macro_rules! checked_impl {
    ($t:ty) => {
        impl CheckedCeilDiv for $t {
            #[track_caller]
            #[inline]
            fn checked_ceil_div(&self, rhs: $t) -> Option<$t> {
                let quotient = self.checked_div(rhs)?;

                let remainder = self.checked_rem(rhs)?;

                if remainder > <$t>::zero() {
                    quotient.checked_add(<$t>::one())
                } else {
                    Some(quotient)
                }
            }
        }
    };
}

checked_impl!(u128);
checked_impl!(u64);
checked_impl!(u32);
checked_impl!(i128);
checked_impl!(i64);
checked_impl!(i32);

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(10, 3, Some(4); "rounds up on remainder")]
    #[test_case(9, 3, Some(3); "exact division")]
    #[test_case(0, 5, Some(0); "zero numerator")]
    #[test_case(7, 0, None; "division by zero")]
    fn ceil_div_i128(lhs: i128, rhs: i128, expected: Option<i128>) {
        assert_eq!(lhs.checked_ceil_div(rhs), expected);
    }
}
