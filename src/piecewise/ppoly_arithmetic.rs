//! # Arithmetic of piecewise functions
//!
//! Binary operations work on the common refinement of the breakpoints: the sorted union of the
//! interval endpoints of both operands (of `self` only when the other operand is a scalar or a
//! polynomial). On every subinterval the governing polynomial of each operand is looked up at
//! the midpoint and the operation is applied to the two polynomials. Outside of the breakpoints
//! of `self` (and of a piecewise right hand side) the result is zero.
use crate::errors::{PolyError, PolyResult};
use crate::piecewise::PPoly::PiecewisePolynomialFunction;
use crate::piecewise::poly_piece::{PolynomialPiece, as_x_polynomial};
use crate::symbolic::polynomial::Polynomial;
use crate::symbolic::scalar::Scalar;
use itertools::Itertools;
use log::debug;
use std::ops::{Add, Mul, Neg, Sub};

/// Right hand side accepted by the fallible piecewise operations.
#[derive(Clone, Debug, PartialEq)]
pub enum PiecewiseOperand {
    Scalar(Scalar),
    Polynomial(Polynomial),
    Piecewise(PiecewisePolynomialFunction),
}

impl From<Scalar> for PiecewiseOperand {
    fn from(s: Scalar) -> Self {
        PiecewiseOperand::Scalar(s)
    }
}

impl From<i64> for PiecewiseOperand {
    fn from(n: i64) -> Self {
        PiecewiseOperand::Scalar(Scalar::from(n))
    }
}

impl From<i32> for PiecewiseOperand {
    fn from(n: i32) -> Self {
        PiecewiseOperand::Scalar(Scalar::from(n))
    }
}

impl From<f64> for PiecewiseOperand {
    fn from(f: f64) -> Self {
        PiecewiseOperand::Scalar(Scalar::from(f))
    }
}

impl From<Polynomial> for PiecewiseOperand {
    fn from(p: Polynomial) -> Self {
        PiecewiseOperand::Polynomial(p)
    }
}

impl From<&Polynomial> for PiecewiseOperand {
    fn from(p: &Polynomial) -> Self {
        PiecewiseOperand::Polynomial(p.clone())
    }
}

impl From<PiecewisePolynomialFunction> for PiecewiseOperand {
    fn from(f: PiecewisePolynomialFunction) -> Self {
        PiecewiseOperand::Piecewise(f)
    }
}

impl From<&PiecewisePolynomialFunction> for PiecewiseOperand {
    fn from(f: &PiecewisePolynomialFunction) -> Self {
        PiecewiseOperand::Piecewise(f.clone())
    }
}

/// borrowed right hand side of a refinement
enum Rhs<'a> {
    Function(&'a PiecewisePolynomialFunction),
    Polynomial(&'a Polynomial),
}

impl PiecewisePolynomialFunction {
    fn refine<F>(&self, rhs: Rhs<'_>, op: F) -> PiecewisePolynomialFunction
    where
        F: Fn(&Polynomial, &Polynomial) -> Polynomial,
    {
        let mut points = self.breakpoints();
        if let Rhs::Function(g) = &rhs {
            points.extend(g.breakpoints());
        }
        let points: Vec<Scalar> = points
            .into_iter()
            .sorted_by(Scalar::sort_cmp)
            .dedup()
            .collect();
        debug!("refinement on {} breakpoints", points.len());

        let zero = Polynomial::zero();
        let (mut i1, mut i2) = (0, 0);
        let mut pieces = Vec::with_capacity(points.len());
        for (lo, hi) in points.iter().tuple_windows() {
            let mid = if lo.is_finite() || hi.is_finite() {
                Scalar::midpoint(lo, hi)
            } else {
                Scalar::zero()
            };
            let (piece, next) = self.select_piece(&mid, i1);
            i1 = next;
            let p1 = piece.map_or(&zero, |pp| pp.polynomial());
            let p2 = match &rhs {
                Rhs::Function(g) => {
                    let (piece, next) = g.select_piece(&mid, i2);
                    i2 = next;
                    piece.map_or(&zero, |pp| pp.polynomial())
                }
                Rhs::Polynomial(p) => *p,
            };
            pieces.push(PolynomialPiece::from_parts(op(p1, p2), lo.clone(), hi.clone()));
        }
        PiecewisePolynomialFunction::from_sorted_pieces(pieces)
    }

    fn apply<F>(&self, other: PiecewiseOperand, op: F) -> PolyResult<PiecewisePolynomialFunction>
    where
        F: Fn(&Polynomial, &Polynomial) -> Polynomial,
    {
        match other {
            PiecewiseOperand::Scalar(s) => {
                Ok(self.refine(Rhs::Polynomial(&Polynomial::constant(s)), op))
            }
            PiecewiseOperand::Polynomial(p) => {
                let text = p.to_string();
                let p = as_x_polynomial(p).ok_or_else(|| {
                    PolyError::type_mismatch(format!(
                        "piecewise arithmetic needs a polynomial in x, got {}",
                        text
                    ))
                })?;
                Ok(self.refine(Rhs::Polynomial(&p), op))
            }
            PiecewiseOperand::Piecewise(g) => Ok(self.refine(Rhs::Function(&g), op)),
        }
    }

    pub fn try_add(&self, other: impl Into<PiecewiseOperand>) -> PolyResult<PiecewisePolynomialFunction> {
        self.apply(other.into(), |a, b| a + b)
    }

    pub fn try_sub(&self, other: impl Into<PiecewiseOperand>) -> PolyResult<PiecewisePolynomialFunction> {
        self.apply(other.into(), |a, b| a - b)
    }

    pub fn try_mul(&self, other: impl Into<PiecewiseOperand>) -> PolyResult<PiecewisePolynomialFunction> {
        self.apply(other.into(), |a, b| a * b)
    }

    /// Division by a nonzero scalar; any other divisor is a `TypeMismatch`.
    pub fn try_div(&self, other: impl Into<PiecewiseOperand>) -> PolyResult<PiecewisePolynomialFunction> {
        match other.into() {
            PiecewiseOperand::Scalar(s) => {
                let inv = s
                    .recip()
                    .ok_or_else(|| PolyError::domain("division of a piecewise function by zero"))?;
                Ok(self.scaled(&inv))
            }
            PiecewiseOperand::Polynomial(p) => Err(PolyError::type_mismatch(format!(
                "piecewise functions can only be divided by scalars, got polynomial {}",
                p
            ))),
            PiecewiseOperand::Piecewise(_) => Err(PolyError::type_mismatch(
                "piecewise functions can only be divided by scalars, got a piecewise function",
            )),
        }
    }

    /// every piece multiplied by `s`
    pub fn scaled(&self, s: &Scalar) -> PiecewisePolynomialFunction {
        let pieces = self
            .pieces
            .iter()
            .map(|pp| {
                PolynomialPiece::from_parts(pp.polynomial().scaled(s), pp.low().clone(), pp.high().clone())
            })
            .collect();
        PiecewisePolynomialFunction::from_sorted_pieces(pieces)
    }
}

macro_rules! impl_piecewise_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<&PiecewisePolynomialFunction> for &PiecewisePolynomialFunction {
            type Output = PiecewisePolynomialFunction;
            fn $method(self, rhs: &PiecewisePolynomialFunction) -> PiecewisePolynomialFunction {
                self.refine(Rhs::Function(rhs), |a, b| a $op b)
            }
        }

        impl $trait<PiecewisePolynomialFunction> for PiecewisePolynomialFunction {
            type Output = PiecewisePolynomialFunction;
            fn $method(self, rhs: PiecewisePolynomialFunction) -> PiecewisePolynomialFunction {
                &self $op &rhs
            }
        }

        impl $trait<&PiecewisePolynomialFunction> for PiecewisePolynomialFunction {
            type Output = PiecewisePolynomialFunction;
            fn $method(self, rhs: &PiecewisePolynomialFunction) -> PiecewisePolynomialFunction {
                &self $op rhs
            }
        }

        impl $trait<PiecewisePolynomialFunction> for &PiecewisePolynomialFunction {
            type Output = PiecewisePolynomialFunction;
            fn $method(self, rhs: PiecewisePolynomialFunction) -> PiecewisePolynomialFunction {
                self $op &rhs
            }
        }
    };
}

impl_piecewise_binop!(Add, add, +);
impl_piecewise_binop!(Sub, sub, -);
impl_piecewise_binop!(Mul, mul, *);

// scalars on either side
macro_rules! impl_piecewise_scalar_ops {
    ($($t:ty),*) => {
        $(
            impl Add<$t> for &PiecewisePolynomialFunction {
                type Output = PiecewisePolynomialFunction;
                fn add(self, rhs: $t) -> PiecewisePolynomialFunction {
                    self.refine(Rhs::Polynomial(&Polynomial::constant(rhs)), |a, b| a + b)
                }
            }

            impl Sub<$t> for &PiecewisePolynomialFunction {
                type Output = PiecewisePolynomialFunction;
                fn sub(self, rhs: $t) -> PiecewisePolynomialFunction {
                    self.refine(Rhs::Polynomial(&Polynomial::constant(rhs)), |a, b| a - b)
                }
            }

            impl Mul<$t> for &PiecewisePolynomialFunction {
                type Output = PiecewisePolynomialFunction;
                fn mul(self, rhs: $t) -> PiecewisePolynomialFunction {
                    self.scaled(&Scalar::from(rhs))
                }
            }

            impl Add<$t> for PiecewisePolynomialFunction {
                type Output = PiecewisePolynomialFunction;
                fn add(self, rhs: $t) -> PiecewisePolynomialFunction {
                    &self + rhs
                }
            }

            impl Sub<$t> for PiecewisePolynomialFunction {
                type Output = PiecewisePolynomialFunction;
                fn sub(self, rhs: $t) -> PiecewisePolynomialFunction {
                    &self - rhs
                }
            }

            impl Mul<$t> for PiecewisePolynomialFunction {
                type Output = PiecewisePolynomialFunction;
                fn mul(self, rhs: $t) -> PiecewisePolynomialFunction {
                    &self * rhs
                }
            }

            impl Add<PiecewisePolynomialFunction> for $t {
                type Output = PiecewisePolynomialFunction;
                fn add(self, rhs: PiecewisePolynomialFunction) -> PiecewisePolynomialFunction {
                    &rhs + self
                }
            }

            impl Sub<PiecewisePolynomialFunction> for $t {
                type Output = PiecewisePolynomialFunction;
                fn sub(self, rhs: PiecewisePolynomialFunction) -> PiecewisePolynomialFunction {
                    -rhs + self
                }
            }

            impl Mul<PiecewisePolynomialFunction> for $t {
                type Output = PiecewisePolynomialFunction;
                fn mul(self, rhs: PiecewisePolynomialFunction) -> PiecewisePolynomialFunction {
                    &rhs * self
                }
            }
        )*
    };
}

impl_piecewise_scalar_ops!(Scalar, i64, i32, f64);

impl Neg for &PiecewisePolynomialFunction {
    type Output = PiecewisePolynomialFunction;
    fn neg(self) -> PiecewisePolynomialFunction {
        self.scaled(&Scalar::integer(-1))
    }
}

impl Neg for PiecewisePolynomialFunction {
    type Output = PiecewisePolynomialFunction;
    fn neg(self) -> PiecewisePolynomialFunction {
        -&self
    }
}
