//! # Scalar coefficients
//!
//! A coefficient is either exact (an arbitrary precision rational) or approximate (`f64`).
//! Arithmetic is agnostic of the kind: exact op exact stays exact, anything touching a float
//! becomes a float. Interval endpoints of piecewise functions are scalars too, so `±∞` is
//! represented as `Approx(±inf)`.
use crate::errors::{PolyError, PolyResult};
use num::{BigInt, BigRational};
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// tolerance used whenever a floating value takes part in a comparison
pub const DEFAULT_EPS: f64 = 1e-10;

#[derive(Clone, Debug)]
pub enum Scalar {
    /// exact rational number
    Exact(BigRational),
    /// floating point approximation
    Approx(f64),
}

impl Scalar {
    pub fn zero() -> Self {
        Scalar::Exact(BigRational::zero())
    }

    pub fn one() -> Self {
        Scalar::Exact(BigRational::one())
    }

    pub fn integer(n: i64) -> Self {
        Scalar::Exact(BigRational::from_integer(BigInt::from(n)))
    }

    /// exact fraction `numer/denom`
    pub fn ratio(numer: i64, denom: i64) -> PolyResult<Self> {
        if denom == 0 {
            return Err(PolyError::domain(format!(
                "cannot build fraction {}/{}: zero denominator",
                numer, denom
            )));
        }
        Ok(Scalar::Exact(BigRational::new(
            BigInt::from(numer),
            BigInt::from(denom),
        )))
    }

    /// exact `1/n`, used for the `c/(k+1)` factors of antiderivatives
    pub(crate) fn unit_fraction(n: usize) -> Self {
        Scalar::Exact(BigRational::new(BigInt::one(), BigInt::from(n.max(1))))
    }

    pub fn infinity() -> Self {
        Scalar::Approx(f64::INFINITY)
    }

    pub fn neg_infinity() -> Self {
        Scalar::Approx(f64::NEG_INFINITY)
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Scalar::Exact(r) => r.is_zero(),
            Scalar::Approx(f) => *f == 0.0,
        }
    }

    pub fn is_one(&self) -> bool {
        match self {
            Scalar::Exact(r) => r.is_one(),
            Scalar::Approx(f) => *f == 1.0,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Scalar::Exact(_))
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Scalar::Approx(f) if f.is_nan())
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Scalar::Exact(_) => true,
            Scalar::Approx(f) => f.is_finite(),
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Scalar::Exact(r) => r.is_negative(),
            Scalar::Approx(f) => *f < 0.0,
        }
    }

    pub fn is_integer(&self) -> bool {
        match self {
            Scalar::Exact(r) => r.is_integer(),
            Scalar::Approx(f) => f.is_finite() && f.fract() == 0.0,
        }
    }

    /// non-negative integer value, if the scalar is one
    pub fn to_u32(&self) -> Option<u32> {
        if !self.is_integer() || self.is_negative() {
            return None;
        }
        match self {
            Scalar::Exact(r) => r.to_integer().to_u32(),
            Scalar::Approx(f) => f.to_u32(),
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Scalar::Exact(r) => r.to_f64().unwrap_or(f64::NAN),
            Scalar::Approx(f) => *f,
        }
    }

    pub fn abs(&self) -> Scalar {
        match self {
            Scalar::Exact(r) => Scalar::Exact(r.abs()),
            Scalar::Approx(f) => Scalar::Approx(f.abs()),
        }
    }

    /// multiplicative inverse, `None` for zero
    pub fn recip(&self) -> Option<Scalar> {
        if self.is_zero() {
            return None;
        }
        match self {
            Scalar::Exact(r) => Some(Scalar::Exact(r.recip())),
            Scalar::Approx(f) => Some(Scalar::Approx(1.0 / f)),
        }
    }

    /// `self / other`, failing with `Domain` when `other` is zero
    pub fn checked_div(&self, other: &Scalar) -> PolyResult<Scalar> {
        if other.is_zero() {
            return Err(PolyError::domain(format!("division of {} by zero", self)));
        }
        Ok(self / other)
    }

    pub fn midpoint(a: &Scalar, b: &Scalar) -> Scalar {
        &(a + b) * &Scalar::unit_fraction(2)
    }

    pub fn min_of(a: &Scalar, b: &Scalar) -> Scalar {
        if b < a { b.clone() } else { a.clone() }
    }

    pub fn max_of(a: &Scalar, b: &Scalar) -> Scalar {
        if b > a { b.clone() } else { a.clone() }
    }

    /// Comparison used by polynomial equality.
    ///
    /// `eps == None`: exact when both values are exact, `DEFAULT_EPS` otherwise.
    /// `eps == Some(0.0)`: plain equality. `Some(e)`: `|a - b| < e`.
    pub fn approx_eq(&self, other: &Scalar, eps: Option<f64>) -> bool {
        let eps = match eps {
            Some(e) => e,
            None if self.is_exact() && other.is_exact() => 0.0,
            None => DEFAULT_EPS,
        };
        if eps == 0.0 {
            return self == other;
        }
        (self - other).abs().to_f64() < eps
    }

    /// total order good enough for sorting breakpoints (NaN sorts as equal)
    pub fn sort_cmp(a: &Scalar, b: &Scalar) -> Ordering {
        a.partial_cmp(b).unwrap_or(Ordering::Equal)
    }
}

fn combine(
    lhs: &Scalar,
    rhs: &Scalar,
    exact: fn(&BigRational, &BigRational) -> BigRational,
    approx: fn(f64, f64) -> f64,
) -> Scalar {
    match (lhs, rhs) {
        (Scalar::Exact(a), Scalar::Exact(b)) => Scalar::Exact(exact(a, b)),
        _ => Scalar::Approx(approx(lhs.to_f64(), rhs.to_f64())),
    }
}

macro_rules! scalar_binop {
    ($trait:ident, $method:ident, $exact:expr, $approx:expr) => {
        impl $trait<&Scalar> for &Scalar {
            type Output = Scalar;
            fn $method(self, rhs: &Scalar) -> Scalar {
                combine(self, rhs, $exact, $approx)
            }
        }
        impl $trait<Scalar> for Scalar {
            type Output = Scalar;
            fn $method(self, rhs: Scalar) -> Scalar {
                combine(&self, &rhs, $exact, $approx)
            }
        }
        impl $trait<&Scalar> for Scalar {
            type Output = Scalar;
            fn $method(self, rhs: &Scalar) -> Scalar {
                combine(&self, rhs, $exact, $approx)
            }
        }
    };
}

scalar_binop!(Add, add, |a, b| a + b, |a, b| a + b);
scalar_binop!(Sub, sub, |a, b| a - b, |a, b| a - b);
scalar_binop!(Mul, mul, |a, b| a * b, |a, b| a * b);

/// Division never panics: a zero divisor gives the `f64` result (`±inf` or `NaN`) whatever the
/// kinds of the operands. Use [`Scalar::checked_div`] to get a `Domain` error instead.
impl Div<&Scalar> for &Scalar {
    type Output = Scalar;
    fn div(self, rhs: &Scalar) -> Scalar {
        match (self, rhs) {
            (Scalar::Exact(_), Scalar::Exact(b)) if b.is_zero() => {
                Scalar::Approx(self.to_f64() / 0.0)
            }
            (Scalar::Exact(a), Scalar::Exact(b)) => Scalar::Exact(a / b),
            _ => Scalar::Approx(self.to_f64() / rhs.to_f64()),
        }
    }
}

impl Div<Scalar> for Scalar {
    type Output = Scalar;
    fn div(self, rhs: Scalar) -> Scalar {
        &self / &rhs
    }
}

impl Neg for Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        match self {
            Scalar::Exact(r) => Scalar::Exact(-r),
            Scalar::Approx(f) => Scalar::Approx(-f),
        }
    }
}

impl Neg for &Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        -self.clone()
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Scalar) -> bool {
        match (self, other) {
            (Scalar::Exact(a), Scalar::Exact(b)) => a == b,
            _ => self.to_f64() == other.to_f64(),
        }
    }
}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Scalar) -> Option<Ordering> {
        match (self, other) {
            (Scalar::Exact(a), Scalar::Exact(b)) => Some(a.cmp(b)),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Scalar::Exact(r) => write!(f, "{}", r),
            Scalar::Approx(v) => write!(f, "{}", v),
        }
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::integer(n as i64)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::integer(n)
    }
}

impl From<u32> for Scalar {
    fn from(n: u32) -> Self {
        Scalar::integer(n as i64)
    }
}

impl From<usize> for Scalar {
    fn from(n: usize) -> Self {
        Scalar::Exact(BigRational::from_integer(BigInt::from(n)))
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Scalar::Approx(f)
    }
}

impl From<BigRational> for Scalar {
    fn from(r: BigRational) -> Self {
        Scalar::Exact(r)
    }
}

impl From<BigInt> for Scalar {
    fn from(n: BigInt) -> Self {
        Scalar::Exact(BigRational::from_integer(n))
    }
}

/// Tolerances for the diagnostic checks of piecewise functions.
///
/// Comparisons between two exact values are always exact; `float_eps` applies as soon as a
/// floating value is involved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance {
    pub float_eps: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance {
            float_eps: DEFAULT_EPS,
        }
    }
}

impl Tolerance {
    pub fn new(float_eps: f64) -> Self {
        Tolerance { float_eps }
    }

    /// tolerance to use when comparing `a` with `b`
    pub fn between(&self, a: &Scalar, b: &Scalar) -> Scalar {
        if a.is_exact() && b.is_exact() {
            Scalar::zero()
        } else {
            Scalar::Approx(self.float_eps)
        }
    }
}
