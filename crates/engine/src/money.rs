use crate::{EngineError, ResultEngine};

/// Largest amount accepted for a single revenue or cost (2^53 minor units).
///
/// Every amount up to this bound is exact as an `f64`, so proportional splits
/// never land above the amount they divide.
pub const MAX_AMOUNT_MINOR: i64 = 1 << 53;

/// Signed amount in **integer minor units** with overflow-checked arithmetic.
///
/// Totals over allocation rows go through this type so a sum that no longer
/// fits in an `i64` surfaces as an error instead of wrapping or panicking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_add(rhs.0).map(MoneyCents)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_sub(rhs.0).map(MoneyCents)
    }

    /// Sum of `amounts`, failing with [`EngineError::Validation`] on overflow.
    pub fn total(amounts: impl IntoIterator<Item = i64>) -> ResultEngine<MoneyCents> {
        amounts.into_iter().try_fold(Self::ZERO, |acc, minor| {
            acc.checked_add(Self(minor)).ok_or_else(too_large)
        })
    }

    pub fn try_add(self, rhs: MoneyCents) -> ResultEngine<MoneyCents> {
        self.checked_add(rhs).ok_or_else(too_large)
    }

    pub fn try_sub(self, rhs: MoneyCents) -> ResultEngine<MoneyCents> {
        self.checked_sub(rhs).ok_or_else(too_large)
    }
}

impl From<i64> for MoneyCents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<MoneyCents> for i64 {
    fn from(value: MoneyCents) -> Self {
        value.0
    }
}

pub(crate) fn too_large() -> EngineError {
    EngineError::Validation("amount too large".to_string())
}

/// A single recorded amount: strictly positive and at most [`MAX_AMOUNT_MINOR`].
pub(crate) fn ensure_recordable_amount(amount_minor: i64) -> ResultEngine<MoneyCents> {
    if amount_minor <= 0 {
        return Err(EngineError::Validation(
            "amount_minor must be > 0".to_string(),
        ));
    }
    if amount_minor > MAX_AMOUNT_MINOR {
        return Err(too_large());
    }
    Ok(MoneyCents(amount_minor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_overflow_is_an_error() {
        assert_eq!(MoneyCents::total([1, 2, 3]).unwrap().minor(), 6);
        assert_eq!(MoneyCents::total([i64::MAX, 1]), Err(too_large()));
        assert_eq!(MoneyCents::total([i64::MIN, -1]), Err(too_large()));
    }

    #[test]
    fn checked_sub_overflow() {
        assert_eq!(MoneyCents::new(i64::MIN).checked_sub(MoneyCents::new(1)), None);
        assert_eq!(
            MoneyCents::new(10).try_sub(MoneyCents::new(25)).unwrap().minor(),
            -15
        );
    }

    #[test]
    fn recordable_amount_bounds() {
        assert!(ensure_recordable_amount(0).is_err());
        assert!(ensure_recordable_amount(-5).is_err());
        assert_eq!(ensure_recordable_amount(1).unwrap().minor(), 1);
        assert_eq!(
            ensure_recordable_amount(MAX_AMOUNT_MINOR).unwrap().minor(),
            MAX_AMOUNT_MINOR
        );
        assert_eq!(ensure_recordable_amount(MAX_AMOUNT_MINOR + 1), Err(too_large()));
        assert_eq!(ensure_recordable_amount(i64::MAX), Err(too_large()));
    }
}
