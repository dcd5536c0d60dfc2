use crate::error::{ErrorCode, TidalResult};
use crate::math::ceil_div::CheckedCeilDiv;

pub trait SafeMath: Sized {
    fn safe_add(self, rhs: Self) -> TidalResult<Self>;
    fn safe_sub(self, rhs: Self) -> TidalResult<Self>;
    fn safe_mul(self, rhs: Self) -> TidalResult<Self>;
    fn safe_div(self, rhs: Self) -> TidalResult<Self>;
    fn safe_div_ceil(self, rhs: Self) -> TidalResult<Self>;
}

macro_rules! checked_impl {
    ($t:ty) => {
        impl SafeMath for $t {
            #[track_caller]
            #[inline(always)]
            fn safe_add(self, v: $t) -> TidalResult<$t> {
                self.checked_add(v).ok_or(ErrorCode::MathError)
            }

            #[track_caller]
            #[inline(always)]
            fn safe_sub(self, v: $t) -> TidalResult<$t> {
                self.checked_sub(v).ok_or(ErrorCode::MathError)
            }

            #[track_caller]
            #[inline(always)]
            fn safe_mul(self, v: $t) -> TidalResult<$t> {
                self.checked_mul(v).ok_or(ErrorCode::MathError)
            }

            #[track_caller]
            #[inline(always)]
            fn safe_div(self, v: $t) -> TidalResult<$t> {
                self.checked_div(v).ok_or(ErrorCode::MathError)
            }

            #[track_caller]
            #[inline(always)]
            fn safe_div_ceil(self, v: $t) -> TidalResult<$t> {
                self.checked_ceil_div(v).ok_or(ErrorCode::MathError)
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

    #[test]
    fn add_overflow_is_error() {
        assert_eq!(i128::MAX.safe_add(1), Err(ErrorCode::MathError));
        assert_eq!(2i128.safe_add(3), Ok(5));
    }

    #[test]
    fn sub_underflow_is_error() {
        assert_eq!(0u64.safe_sub(1), Err(ErrorCode::MathError));
        assert_eq!(5u64.safe_sub(3), Ok(2));
    }

    #[test]
    fn div_by_zero_is_error() {
        assert_eq!(10i128.safe_div(0), Err(ErrorCode::MathError));
        assert_eq!(10i128.safe_div_ceil(0), Err(ErrorCode::MathError));
        assert_eq!(10i128.safe_div_ceil(4), Ok(3));
    }
}
