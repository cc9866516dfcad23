//! Bit tricks used to navigate implicit trees.

/// Returns the value of the least significant set bit of `x`, or `0` if `x == 0`.
///
/// # Examples
///
/// ```
/// use cpds::broadword::lowbit;
///
/// assert_eq!(lowbit(0), 0);
/// assert_eq!(lowbit(6), 2);
/// assert_eq!(lowbit(8), 8);
/// assert_eq!(lowbit(11), 1);
/// ```
#[inline(always)]
pub const fn lowbit(x: usize) -> usize {
    x & x.wrapping_neg()
}

/// Returns the position of the most significant set bit of `x`, or [`None`] if `x == 0`.
///
/// # Examples
///
/// ```
/// use cpds::broadword::msb;
///
/// assert_eq!(msb(0), None);
/// assert_eq!(msb(1), Some(0));
/// assert_eq!(msb(10), Some(3));
/// assert_eq!(msb(16), Some(4));
/// ```
#[inline(always)]
pub const fn msb(x: usize) -> Option<usize> {
    if x != 0 {
        Some((usize::BITS - 1 - x.leading_zeros()) as usize)
    } else {
        None
    }
}
