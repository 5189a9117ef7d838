//! # Polynomial arithmetic
//!
//! Addition, subtraction and multiplication accept any [`PolyOperand`]: a scalar, a raw list of
//! coefficients (interpreted in the receiver's variable) or another polynomial. When two
//! polynomials use different variables, the one with the smaller variable becomes a coefficient of
//! the other, which is what keeps inner variables ordering below outer ones.
//!
//! The same operations are available through `std::ops`:
//! ```rust, ignore
//! let x = Polynomial::symbol("x")?;
//! let y = Polynomial::symbol("y")?;
//! let p = (&x + &y) * (&x - &y); // -y^2 + x^2
//! ```
use crate::errors::{PolyError, PolyResult};
use crate::symbolic::polynomial::{Coefficient, Polynomial};
use crate::symbolic::scalar::Scalar;
use log::warn;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// upper bound of term quotients computed by one long division
pub const MAX_DIVISION_STEPS: usize = 10_000;

/// Operand accepted by polynomial arithmetic.
#[derive(Clone, Debug)]
pub enum PolyOperand {
    Scalar(Scalar),
    /// coefficients in ascending powers of the receiver's variable, nested ones may use any
    /// variable
    Coefficients(Vec<Coefficient>),
    Polynomial(Polynomial),
}

impl PolyOperand {
    fn negated(self) -> PolyOperand {
        match self {
            PolyOperand::Scalar(s) => PolyOperand::Scalar(-s),
            PolyOperand::Coefficients(cs) => {
                PolyOperand::Coefficients(cs.iter().map(coeff_neg).collect())
            }
            PolyOperand::Polynomial(p) => PolyOperand::Polynomial(-p),
        }
    }
}

impl From<Scalar> for PolyOperand {
    fn from(s: Scalar) -> Self {
        PolyOperand::Scalar(s)
    }
}

impl From<&Scalar> for PolyOperand {
    fn from(s: &Scalar) -> Self {
        PolyOperand::Scalar(s.clone())
    }
}

impl From<i64> for PolyOperand {
    fn from(n: i64) -> Self {
        PolyOperand::Scalar(Scalar::integer(n))
    }
}

impl From<i32> for PolyOperand {
    fn from(n: i32) -> Self {
        PolyOperand::Scalar(Scalar::from(n))
    }
}

impl From<f64> for PolyOperand {
    fn from(f: f64) -> Self {
        PolyOperand::Scalar(Scalar::Approx(f))
    }
}

impl From<Vec<Coefficient>> for PolyOperand {
    fn from(cs: Vec<Coefficient>) -> Self {
        PolyOperand::Coefficients(cs)
    }
}

impl From<Polynomial> for PolyOperand {
    fn from(p: Polynomial) -> Self {
        PolyOperand::Polynomial(p)
    }
}

impl From<&Polynomial> for PolyOperand {
    fn from(p: &Polynomial) -> Self {
        PolyOperand::Polynomial(p.clone())
    }
}

impl From<Coefficient> for PolyOperand {
    fn from(c: Coefficient) -> Self {
        match c {
            Coefficient::Scalar(s) => PolyOperand::Scalar(s),
            Coefficient::Nested(p) => PolyOperand::Polynomial(p),
        }
    }
}

impl From<&Coefficient> for PolyOperand {
    fn from(c: &Coefficient) -> Self {
        PolyOperand::from(c.clone())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////
//                          COEFFICIENT ARITHMETIC
////////////////////////////////////////////////////////////////////////////////////////////

/// `Σ cs[i] var^i`. A nested coefficient whose variable does not order below `var` is multiplied
/// in through the polynomial operations, so it ends up as the main variable instead of being
/// stored under `var`.
pub(crate) fn polynomial_from_coeffs(var: &str, cs: Vec<Coefficient>) -> Polynomial {
    let ordered = cs
        .iter()
        .all(|c| c.as_polynomial().is_none_or(|p| p.var.as_str() < var));
    if ordered {
        return Polynomial::from_parts(var.to_string(), cs);
    }
    let id = Polynomial::identity(var.to_string());
    let mut acc = Polynomial::zero_in(var);
    for c in cs.into_iter().rev() {
        acc.mul_in_place(&id);
        acc.add_in_place(c);
    }
    acc
}

pub(crate) fn coeff_add(a: &Coefficient, b: &Coefficient) -> Coefficient {
    match (a, b) {
        (Coefficient::Scalar(x), Coefficient::Scalar(y)) => Coefficient::Scalar(x + y),
        (Coefficient::Nested(p), Coefficient::Scalar(s))
        | (Coefficient::Scalar(s), Coefficient::Nested(p)) => Coefficient::Nested(p + s),
        (Coefficient::Nested(p), Coefficient::Nested(q)) => Coefficient::Nested(p + q),
    }
}

pub(crate) fn coeff_neg(a: &Coefficient) -> Coefficient {
    match a {
        Coefficient::Scalar(s) => Coefficient::Scalar(-s),
        Coefficient::Nested(p) => Coefficient::Nested(-p),
    }
}

pub(crate) fn coeff_scale(a: &Coefficient, s: &Scalar) -> Coefficient {
    match a {
        Coefficient::Scalar(x) => Coefficient::Scalar(x * s),
        Coefficient::Nested(p) => Coefficient::Nested(p.scaled(s)),
    }
}

pub(crate) fn coeff_mul(a: &Coefficient, b: &Coefficient) -> Coefficient {
    match (a, b) {
        (Coefficient::Scalar(x), Coefficient::Scalar(y)) => Coefficient::Scalar(x * y),
        (Coefficient::Nested(p), Coefficient::Scalar(s))
        | (Coefficient::Scalar(s), Coefficient::Nested(p)) => Coefficient::Nested(p.scaled(s)),
        (Coefficient::Nested(p), Coefficient::Nested(q)) => Coefficient::Nested(p * q),
    }
}

/// Cauchy product of two coefficient sequences
fn mul_coeffs(a: &[Coefficient], b: &[Coefficient]) -> Vec<Coefficient> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![Coefficient::zero(); a.len() + b.len() - 1];
    for (i, ai) in a.iter().enumerate() {
        if ai.is_zero() {
            continue;
        }
        for (j, bj) in b.iter().enumerate() {
            out[i + j] = coeff_add(&out[i + j], &coeff_mul(ai, bj));
        }
    }
    out
}

impl Polynomial {
    fn add_coeffs(&mut self, coeffs: &[Coefficient]) {
        for (i, c) in coeffs.iter().enumerate() {
            if i < self.coeffs.len() {
                self.coeffs[i] = coeff_add(&self.coeffs[i], c);
            } else {
                self.coeffs.push(c.clone());
            }
        }
        self.normalize();
    }

    /// in-place `self += other`
    pub fn add_in_place(&mut self, other: impl Into<PolyOperand>) {
        match other.into() {
            PolyOperand::Scalar(s) => self.add_coeffs(&[Coefficient::Scalar(s)]),
            PolyOperand::Coefficients(cs) => {
                let p = polynomial_from_coeffs(&self.var, cs);
                self.add_in_place(p);
            }
            PolyOperand::Polynomial(p) => {
                if self.var == p.var {
                    self.add_coeffs(&p.coeffs);
                } else if self.var > p.var {
                    self.add_coeffs(&[Coefficient::Nested(p)]);
                } else {
                    // the other polynomial's variable becomes the main one
                    let previous = std::mem::replace(self, p);
                    self.add_coeffs(&[Coefficient::Nested(previous)]);
                }
            }
        }
    }

    /// in-place `self -= other`
    pub fn sub_in_place(&mut self, other: impl Into<PolyOperand>) {
        self.add_in_place(other.into().negated());
    }

    /// in-place `self *= other`
    pub fn mul_in_place(&mut self, other: impl Into<PolyOperand>) {
        *self = self.mul_operand(&other.into());
    }

    fn mul_operand(&self, other: &PolyOperand) -> Polynomial {
        match other {
            PolyOperand::Scalar(s) => self.scaled(s),
            PolyOperand::Coefficients(cs) => {
                let p = polynomial_from_coeffs(&self.var, cs.clone());
                self.mul_operand(&PolyOperand::Polynomial(p))
            }
            PolyOperand::Polynomial(p) => {
                if self.var == p.var {
                    Polynomial::from_parts(self.var.clone(), mul_coeffs(&self.coeffs, &p.coeffs))
                } else if self.var > p.var {
                    self.scaled_by_polynomial(p)
                } else {
                    p.scaled_by_polynomial(self)
                }
            }
        }
    }

    /// every coefficient multiplied by a polynomial in a smaller variable
    fn scaled_by_polynomial(&self, factor: &Polynomial) -> Polynomial {
        if factor.is_zero() {
            return Polynomial::zero_in(&self.var);
        }
        let factor = Coefficient::Nested(factor.clone());
        let coeffs = self.coeffs.iter().map(|c| coeff_mul(c, &factor)).collect();
        Polynomial::from_parts(self.var.clone(), coeffs)
    }

    /// multiplies every coefficient by `s`; scaling by zero gives the zero polynomial
    pub fn scale(&mut self, s: &Scalar) {
        if s.is_zero() {
            self.coeffs.clear();
            return;
        }
        for c in self.coeffs.iter_mut() {
            *c = coeff_scale(c, s);
        }
        self.normalize();
    }

    pub fn scaled(&self, s: &Scalar) -> Polynomial {
        let mut out = self.clone();
        out.scale(s);
        out
    }

    /// division by a nonzero scalar, exact for exact coefficients
    pub fn div_scalar(&self, s: &Scalar) -> PolyResult<Polynomial> {
        let inv = s
            .recip()
            .ok_or_else(|| PolyError::domain(format!("cannot divide '{}' by zero", self)))?;
        Ok(self.scaled(&inv))
    }

    /// `self^e` by binary exponentiation
    pub fn pow(&self, e: u32) -> Polynomial {
        let mut result = Polynomial::constant_in(Scalar::one(), &self.var);
        let mut base = self.clone();
        let mut e = e;
        while e > 0 {
            if e & 1 == 1 {
                result = &result * &base;
            }
            e >>= 1;
            if e > 0 {
                base = &base * &base;
            }
        }
        result
    }

    /// single term of the quotient `self / divisor`, `None` once no leading term can be divided
    fn term_quotient(&self, divisor: &Polynomial) -> Option<Polynomial> {
        if divisor.degree() <= 0 {
            let d0 = divisor.constant_value()?;
            return self.div_scalar(&d0).ok();
        }
        if divisor.var > self.var {
            return None;
        }
        let deg1 = self.degree();
        let (deg2, lead) = if divisor.var == self.var {
            (divisor.degree(), divisor.coeffs.last()?.clone())
        } else {
            (0, Coefficient::Nested(divisor.clone()))
        };
        let mut exp = deg1;
        while exp >= deg2 {
            let shift = (exp - deg2) as usize;
            match (&self.coeffs[exp as usize], &lead) {
                (Coefficient::Nested(ci), Coefficient::Scalar(d)) => {
                    let q = ci.div_scalar(d).ok()?;
                    return Some(self.monomial(Coefficient::Nested(q), shift));
                }
                (Coefficient::Nested(ci), Coefficient::Nested(d)) => {
                    let q = ci.term_quotient(d)?;
                    return Some(self.monomial(Coefficient::Nested(q), shift));
                }
                (Coefficient::Scalar(ci), Coefficient::Scalar(d)) => {
                    let q = ci.checked_div(d).ok()?;
                    return Some(self.monomial(Coefficient::Scalar(q), shift));
                }
                (Coefficient::Scalar(_), Coefficient::Nested(_)) => {}
            }
            exp -= 1;
        }
        None
    }

    fn monomial(&self, c: Coefficient, power: usize) -> Polynomial {
        let mut coeffs = vec![Coefficient::zero(); power];
        coeffs.push(c);
        Polynomial::from_parts(self.var.clone(), coeffs)
    }

    /// Polynomial long division, returns `(quotient, remainder)`.
    ///
    /// Terms are divided off as long as the leading term of the remainder is divisible by the
    /// leading term of the divisor.
    /// ```rust, ignore
    /// let (q, r) = Polynomial::parse("x^3-1")?.divide(&Polynomial::parse("x+1")?)?;
    /// // q = x^2 - x + 1, r = -2
    /// ```
    /// # Errors
    /// `Domain` for a zero divisor, or for a divisor whose main variable orders above the
    /// dividend's while the dividend is not a constant.
    pub fn divide(&self, divisor: &Polynomial) -> PolyResult<(Polynomial, Polynomial)> {
        if divisor.is_zero() {
            return Err(PolyError::domain(format!(
                "cannot divide '{}' by the zero polynomial",
                self
            )));
        }
        if divisor.degree() > 0 && divisor.var > self.var && !self.is_constant() {
            return Err(PolyError::domain(format!(
                "cannot divide '{}' by '{}'",
                self, divisor
            )));
        }
        let mut quotient = Polynomial::zero_in(&self.var);
        let mut remainder = self.clone();
        let mut steps = 0;
        while !remainder.is_zero() {
            let Some(q) = remainder.term_quotient(divisor) else {
                break;
            };
            steps += 1;
            if steps > MAX_DIVISION_STEPS {
                warn!(
                    "division of '{}' by '{}' stopped after {} steps",
                    self, divisor, MAX_DIVISION_STEPS
                );
                break;
            }
            remainder.sub_in_place(&q * divisor);
            quotient.add_in_place(q);
        }
        Ok((quotient, remainder))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////
//                          OPERATORS
////////////////////////////////////////////////////////////////////////////////////////////

macro_rules! impl_poly_binop {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $inplace:ident) => {
        impl<T: Into<PolyOperand>> $trait<T> for Polynomial {
            type Output = Polynomial;
            fn $method(mut self, rhs: T) -> Polynomial {
                self.$inplace(rhs);
                self
            }
        }

        impl<T: Into<PolyOperand>> $trait<T> for &Polynomial {
            type Output = Polynomial;
            fn $method(self, rhs: T) -> Polynomial {
                let mut out = self.clone();
                out.$inplace(rhs);
                out
            }
        }

        impl<T: Into<PolyOperand>> $assign_trait<T> for Polynomial {
            fn $assign_method(&mut self, rhs: T) {
                self.$inplace(rhs);
            }
        }
    };
}

impl_poly_binop!(Add, add, AddAssign, add_assign, add_in_place);
impl_poly_binop!(Sub, sub, SubAssign, sub_assign, sub_in_place);
impl_poly_binop!(Mul, mul, MulAssign, mul_assign, mul_in_place);

// scalar on the left hand side
macro_rules! impl_scalar_lhs {
    ($($t:ty),*) => {
        $(
            impl Add<Polynomial> for $t {
                type Output = Polynomial;
                fn add(self, rhs: Polynomial) -> Polynomial {
                    rhs + self
                }
            }

            impl Sub<Polynomial> for $t {
                type Output = Polynomial;
                fn sub(self, rhs: Polynomial) -> Polynomial {
                    -rhs + self
                }
            }

            impl Mul<Polynomial> for $t {
                type Output = Polynomial;
                fn mul(self, rhs: Polynomial) -> Polynomial {
                    rhs * self
                }
            }
        )*
    };
}

impl_scalar_lhs!(Scalar, i64, i32, f64);

impl Neg for Polynomial {
    type Output = Polynomial;
    fn neg(self) -> Polynomial {
        self.scaled(&Scalar::integer(-1))
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;
    fn neg(self) -> Polynomial {
        self.scaled(&Scalar::integer(-1))
    }
}
