//! Integers modulo a compile-time constant.

use std::fmt;
use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::{FromPrimitive, One, Zero};

/// Element of the ring $`\mathbb{Z}/n\mathbb{Z}`$ with $`n = `$ `MOD`,
/// stored as its representative in $`[0, n)`$.
///
/// It implements [`Zero`], [`One`], and [`FromPrimitive`], so it can be stored in any
/// Fenwick tree of [`crate::fenwick_trees`].
///
/// # Examples
///
/// ```
/// use cpds::zn::Mod1e9p7;
///
/// let a = Mod1e9p7::new(5);
/// let b = Mod1e9p7::new(1_000_000_000);
///
/// assert_eq!((a + b).value(), 1_000_000_005);
/// assert_eq!((a - b).value(), 12);
///
/// let c = (a + b) * Mod1e9p7::new(2);
/// assert_eq!(c.value(), 999_999_996);
/// assert_eq!(c / Mod1e9p7::new(2), a + b);
/// ```
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Zn<const MOD: u32> {
    value: u32,
}

/// Integers modulo the prime $`10^9 + 7`$.
pub type Mod1e9p7 = Zn<1_000_000_007>;

/// Integers modulo the NTT-friendly prime $`998244353`$.
pub type Mod998244353 = Zn<998_244_353>;

impl<const MOD: u32> Zn<MOD> {
    /// Creates the residue of `v`, mapping negative values into $`[0, n)`$.
    ///
    /// # Examples
    ///
    /// ```
    /// use cpds::zn::Zn;
    ///
    /// assert_eq!(Zn::<7>::new(-1).value(), 6);
    /// assert_eq!(Zn::<7>::new(15).value(), 1);
    /// ```
    pub const fn new(v: i64) -> Self {
        Self {
            value: v.rem_euclid(MOD as i64) as u32,
        }
    }

    /// Returns the modulus $`n`$.
    #[inline(always)]
    pub const fn modulus() -> u32 {
        MOD
    }

    /// Returns the representative in $`[0, n)`$.
    #[inline(always)]
    pub const fn value(self) -> u32 {
        self.value
    }

    /// Computes `self` raised to the power `exp` by repeated squaring.
    ///
    /// # Examples
    ///
    /// ```
    /// use cpds::zn::Zn;
    ///
    /// assert_eq!(Zn::<13>::new(2).pow(10).value(), 1024 % 13);
    /// assert_eq!(Zn::<13>::new(0).pow(0).value(), 1);
    /// ```
    pub fn pow(self, mut exp: u64) -> Self {
        let mut res = Self::one();
        let mut base = self;
        while exp > 0 {
            if exp & 1 == 1 {
                res *= base;
            }
            base *= base;
            exp >>= 1;
        }
        res
    }

    /// Returns the multiplicative inverse, or [`None`] if `self` and $`n`$ are not coprime.
    ///
    /// The extended Euclidean algorithm is used, so $`n`$ need not be prime.
    ///
    /// # Examples
    ///
    /// ```
    /// use cpds::zn::Zn;
    ///
    /// assert_eq!(Zn::<10>::new(3).inv(), Some(Zn::new(7)));
    /// assert_eq!(Zn::<10>::new(4).inv(), None);
    /// ```
    pub fn inv(self) -> Option<Self> {
        let (mut r0, mut r1) = (i64::from(MOD), i64::from(self.value));
        let (mut t0, mut t1) = (0i64, 1i64);
        while r1 != 0 {
            let q = r0 / r1;
            (r0, r1) = (r1, r0 - q * r1);
            (t0, t1) = (t1, t0 - q * t1);
        }
        (r0 == 1).then(|| Self::new(t0))
    }

    /// Divides `self` by `rhs`, returning [`None`] if `rhs` is not invertible.
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        rhs.inv().map(|inv| self * inv)
    }
}

impl<const MOD: u32> fmt::Debug for Zn<MOD> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (mod {MOD})", self.value)
    }
}

impl<const MOD: u32> fmt::Display for Zn<MOD> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<const MOD: u32> From<u32> for Zn<MOD> {
    fn from(v: u32) -> Self {
        Self::new(i64::from(v))
    }
}

impl<const MOD: u32> From<i64> for Zn<MOD> {
    fn from(v: i64) -> Self {
        Self::new(v)
    }
}

impl<const MOD: u32> Add for Zn<MOD> {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        let sum = u64::from(self.value) + u64::from(rhs.value);
        Self {
            value: (sum % u64::from(MOD)) as u32,
        }
    }
}

impl<const MOD: u32> Sub for Zn<MOD> {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        let diff = u64::from(self.value) + u64::from(MOD) - u64::from(rhs.value);
        Self {
            value: (diff % u64::from(MOD)) as u32,
        }
    }
}

impl<const MOD: u32> Mul for Zn<MOD> {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        let prod = u64::from(self.value) * u64::from(rhs.value);
        Self {
            value: (prod % u64::from(MOD)) as u32,
        }
    }
}

impl<const MOD: u32> Div for Zn<MOD> {
    type Output = Self;

    /// # Panics
    ///
    /// It panics if `rhs` is not invertible, like integer division by zero.
    /// Use [`Zn::checked_div()`] for a fallible version.
    fn div(self, rhs: Self) -> Self {
        match self.checked_div(rhs) {
            Some(q) => q,
            None => panic!("{rhs:?} is not invertible."),
        }
    }
}

impl<const MOD: u32> Neg for Zn<MOD> {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        Self::zero() - self
    }
}

impl<const MOD: u32> AddAssign for Zn<MOD> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<const MOD: u32> SubAssign for Zn<MOD> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<const MOD: u32> MulAssign for Zn<MOD> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<const MOD: u32> DivAssign for Zn<MOD> {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl<const MOD: u32> Sum for Zn<MOD> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<const MOD: u32> Product for Zn<MOD> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::one(), Mul::mul)
    }
}

impl<const MOD: u32> Zero for Zn<MOD> {
    fn zero() -> Self {
        Self::new(0)
    }

    fn is_zero(&self) -> bool {
        self.value == 0
    }
}

impl<const MOD: u32> One for Zn<MOD> {
    fn one() -> Self {
        Self::new(1)
    }
}

impl<const MOD: u32> FromPrimitive for Zn<MOD> {
    fn from_i64(n: i64) -> Option<Self> {
        Some(Self::new(n))
    }

    fn from_u64(n: u64) -> Option<Self> {
        Some(Self {
            value: (n % u64::from(MOD)) as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaChaRng;

    #[test]
    fn test_arithmetic_against_i128() {
        let mut rng = ChaChaRng::seed_from_u64(7);
        let m = i128::from(Mod998244353::modulus());
        for _ in 0..1000 {
            let a: i64 = rng.gen_range(-(1 << 40)..(1 << 40));
            let b: i64 = rng.gen_range(-(1 << 40)..(1 << 40));
            let (za, zb) = (Mod998244353::new(a), Mod998244353::new(b));
            let norm = |x: i128| x.rem_euclid(m) as u32;
            assert_eq!((za + zb).value(), norm(i128::from(a) + i128::from(b)));
            assert_eq!((za - zb).value(), norm(i128::from(a) - i128::from(b)));
            assert_eq!((za * zb).value(), norm(i128::from(a) * i128::from(b)));
            assert_eq!((-za).value(), norm(-i128::from(a)));
        }
    }

    #[test]
    fn test_inverse_prime() {
        for v in 1..200 {
            let x = Mod1e9p7::new(v);
            let inv = x.inv().unwrap();
            assert_eq!(x * inv, Mod1e9p7::one());
            assert_eq!(inv, x.pow(1_000_000_005));
        }
        assert_eq!(Mod1e9p7::zero().inv(), None);
    }

    #[test]
    fn test_inverse_composite() {
        for v in 0..12 {
            let x = Zn::<12>::new(v);
            let coprime = [1, 5, 7, 11].contains(&v);
            assert_eq!(x.inv().is_some(), coprime);
            if let Some(inv) = x.inv() {
                assert_eq!((x * inv).value(), 1);
            }
        }
    }

    #[test]
    fn test_checked_div() {
        let x = Zn::<12>::new(9);
        assert_eq!(x.checked_div(Zn::new(5)), Some(Zn::new(9 * 5)));
        assert_eq!(x.checked_div(Zn::new(4)), None);
    }

    #[test]
    #[should_panic]
    fn test_div_by_zero() {
        let _ = Mod1e9p7::one() / Mod1e9p7::zero();
    }

    #[test]
    fn test_large_modulus() {
        type Big = Zn<4_294_967_291>;
        let x = Big::new(4_294_967_290);
        assert_eq!((x + x).value(), 4_294_967_289);
        assert_eq!((x * x).value(), 1);
        assert_eq!(Big::from_u64(u64::MAX).unwrap().value(), (u64::MAX % 4_294_967_291) as u32);
    }

    #[test]
    fn test_sum_product() {
        let xs: Vec<Zn<11>> = (1..=10).map(Zn::new).collect();
        assert_eq!(xs.iter().copied().sum::<Zn<11>>(), Zn::new(55));
        // Wilson's theorem.
        assert_eq!(xs.into_iter().product::<Zn<11>>(), Zn::new(-1));
    }

    #[test]
    fn test_display() {
        assert_eq!(Zn::<7>::new(-3).to_string(), "4");
        assert_eq!(format!("{:?}", Zn::<7>::new(10)), "3 (mod 7)");
    }
}
