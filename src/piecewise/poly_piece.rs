//! # Polynomial pieces
//!
//! A piece is a polynomial in `x` restricted to a closed interval `[low, high]`. The convolution of
//! two pieces is computed symbolically: the integration variable `t` is bounded by constants or by
//! `x - offset`, and the integral of `p1(t) p2(x - t)` is expanded by repeated integration by parts
//! until the derivatives of the lower degree polynomial vanish.
use crate::errors::{PolyError, PolyResult};
use crate::piecewise::PPoly::PiecewisePolynomialFunction;
use crate::symbolic::poly_format::float_repr;
use crate::symbolic::polynomial::{DEFAULT_VAR, Polynomial};
use crate::symbolic::scalar::Scalar;
use itertools::Itertools;
use log::debug;
use std::fmt;

/// `Some(p)` re-expressed in `x` when `p` is a constant or depends on `x` only.
pub(crate) fn as_x_polynomial(p: Polynomial) -> Option<Polynomial> {
    if let Some(c) = p.constant_value() {
        return Some(Polynomial::constant_in(c, DEFAULT_VAR));
    }
    if p.var() == DEFAULT_VAR && p.all_var_names().len() == 1 {
        Some(p)
    } else {
        None
    }
}

pub(crate) fn endpoint_repr(s: &Scalar) -> String {
    match s {
        Scalar::Exact(r) => r.to_string(),
        Scalar::Approx(f) => float_repr(*f, None, false),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PolynomialPiece {
    pub(crate) polynomial: Polynomial,
    pub(crate) low: Scalar,
    pub(crate) high: Scalar,
}

impl PolynomialPiece {
    /// Piece `polynomial` on `[low, high]`.
    ///
    /// Fails with `Construction` when `low > high`, when an endpoint is `NaN` or when the
    /// polynomial depends on anything but `x`.
    pub fn new(
        polynomial: Polynomial,
        low: impl Into<Scalar>,
        high: impl Into<Scalar>,
    ) -> PolyResult<Self> {
        let (low, high) = (low.into(), high.into());
        if low.is_nan() || high.is_nan() {
            return Err(PolyError::construction(format!(
                "interval [{},{}] is not an interval of reals",
                endpoint_repr(&low),
                endpoint_repr(&high)
            )));
        }
        if low > high {
            return Err(PolyError::construction(format!(
                "invalid interval [{},{}]: lower bound exceeds upper bound",
                endpoint_repr(&low),
                endpoint_repr(&high)
            )));
        }
        let text = polynomial.to_string();
        let polynomial = as_x_polynomial(polynomial).ok_or_else(|| {
            PolyError::construction(format!("piece polynomial {} must be univariate in x", text))
        })?;
        Ok(PolynomialPiece {
            polynomial,
            low,
            high,
        })
    }

    /// no checks, callers guarantee `low <= high` and a polynomial in `x`
    pub(crate) fn from_parts(polynomial: Polynomial, low: Scalar, high: Scalar) -> Self {
        let polynomial = match polynomial.constant_value() {
            Some(c) if polynomial.var() != DEFAULT_VAR => Polynomial::constant_in(c, DEFAULT_VAR),
            _ => polynomial,
        };
        PolynomialPiece {
            polynomial,
            low,
            high,
        }
    }

    pub fn polynomial(&self) -> &Polynomial {
        &self.polynomial
    }

    pub fn low(&self) -> &Scalar {
        &self.low
    }

    pub fn high(&self) -> &Scalar {
        &self.high
    }

    pub fn interval(&self) -> (&Scalar, &Scalar) {
        (&self.low, &self.high)
    }

    pub fn contains(&self, x: &Scalar) -> bool {
        &self.low <= x && x <= &self.high
    }

    /// Convolution `(p1 * p2)(x) = ∫ p1(t) p2(x - t) dt` of two pieces.
    ///
    /// The result has at most three pieces with breakpoints
    /// `a1+a2, min(a1+b2, b1+a2), max(a1+b2, b1+a2), b1+b2`. On each of them
    /// `Σ_k [F_k(t) p2^(k-1)(x - t)]` is taken between the two `t` bounds, where `F_k` is the
    /// `k`-th antiderivative of `p1`. The higher degree operand is the one integrated.
    ///
    /// Pieces must have finite intervals, otherwise the result fails with `Domain`.
    pub fn convolve(&self, other: &PolynomialPiece) -> PolyResult<PiecewisePolynomialFunction> {
        if self.polynomial.degree() < other.polynomial.degree() {
            return other.convolve(self);
        }
        for bound in [&self.low, &self.high, &other.low, &other.high] {
            if !bound.is_finite() {
                return Err(PolyError::domain(format!(
                    "cannot convolve pieces on [{},{}] and [{},{}]: intervals must be finite",
                    endpoint_repr(&self.low),
                    endpoint_repr(&self.high),
                    endpoint_repr(&other.low),
                    endpoint_repr(&other.high)
                )));
            }
        }
        if other.polynomial.is_zero() {
            return Ok(PiecewisePolynomialFunction::zero());
        }
        let (a1, b1) = (&self.low, &self.high);
        let (a2, b2) = (&other.low, &other.high);
        let x = Polynomial::identity(DEFAULT_VAR.to_string());
        let fixed = |c: &Scalar| Polynomial::constant_in(c.clone(), DEFAULT_VAR);
        let shifted = |offset: &Scalar| &x - offset;

        // t bounds of every subinterval of x
        let mut x_limits = vec![a1 + a2];
        let mut t_bounds = vec![(fixed(a1), shifted(a2))];
        let (left, right) = (a1 + b2, b1 + a2);
        if left < right {
            debug!("convolution: second piece is the shorter one");
            t_bounds.push((shifted(b2), shifted(a2)));
            x_limits.push(left);
            x_limits.push(right);
        } else if left > right {
            debug!("convolution: first piece is the shorter one");
            t_bounds.push((fixed(a1), fixed(b1)));
            x_limits.push(right);
            x_limits.push(left);
        } else {
            debug!("convolution: pieces of equal length");
            x_limits.push(left);
        }
        t_bounds.push((shifted(b2), fixed(b1)));
        x_limits.push(b1 + b2);

        let mut sums = vec![Polynomial::zero(); t_bounds.len()];
        let mut antiderivative = self.polynomial.indefinite_integral();
        let mut derivative = other.polynomial.clone();
        let mut step = 0;
        loop {
            step += 1;
            for (sum, (lower, upper)) in sums.iter_mut().zip(t_bounds.iter()) {
                let at_upper = antiderivative.compose(upper) * derivative.compose(&x - upper);
                let at_lower = antiderivative.compose(lower) * derivative.compose(&x - lower);
                *sum += at_upper;
                *sum -= at_lower;
            }
            derivative = derivative.derivative();
            if derivative.is_zero() {
                break;
            }
            antiderivative = antiderivative.indefinite_integral();
        }
        debug!(
            "convolution of {} and {}: {} integration by parts steps",
            self, other, step
        );

        let pieces = sums
            .into_iter()
            .zip(x_limits.iter().tuple_windows())
            .map(|(p, (lo, hi))| PolynomialPiece::from_parts(p, lo.clone(), hi.clone()))
            .collect();
        Ok(PiecewisePolynomialFunction::from_sorted_pieces(pieces))
    }
}

impl fmt::Display for PolynomialPiece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}, x in [{},{}]",
            self.polynomial,
            endpoint_repr(&self.low),
            endpoint_repr(&self.high)
        )
    }
}
