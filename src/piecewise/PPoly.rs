//! # Piecewise polynomial functions
//!
//! A [`PiecewisePolynomialFunction`] is a list of [`PolynomialPiece`]s sorted by interval, with
//! intervals that touch at most in their endpoints. The function is zero outside of all pieces.
//! Every operation returns a new, normalized function: pieces with a zero polynomial or an
//! interval of zero length are dropped.
//!
//! Lookup of the piece governing a point is a scan that can resume from an index hint, so
//! monotonic batches of points (evaluation of many points, breakpoint refinement) are linear in
//! the number of pieces.
use crate::errors::{PolyError, PolyResult};
use crate::piecewise::poly_piece::{PolynomialPiece, as_x_polynomial, endpoint_repr};
use crate::symbolic::polynomial::{DEFAULT_VAR, Polynomial};
use crate::symbolic::scalar::{DEFAULT_EPS, Scalar, Tolerance};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::fmt;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PiecewisePolynomialFunction {
    pub(crate) pieces: Vec<PolynomialPiece>,
}

/// Result of composing a piecewise function with a polynomial of degree <= 1.
#[derive(Clone, Debug, PartialEq)]
pub enum Composed {
    /// constant argument: the function value
    Value(Scalar),
    /// affine argument: the function with remapped intervals
    Function(PiecewisePolynomialFunction),
}

impl PiecewisePolynomialFunction {
    /// Builds a function from pieces sorted by interval.
    ///
    /// Zero polynomials and empty intervals are dropped first, then the remaining pieces must
    /// not overlap (`Construction` error otherwise).
    pub fn new(pieces: Vec<PolynomialPiece>) -> PolyResult<Self> {
        let f = PiecewisePolynomialFunction::from_sorted_pieces(pieces);
        if !f.is_consistent() {
            return Err(PolyError::construction(
                "pieces must be sorted by interval and must not overlap",
            ));
        }
        Ok(f)
    }

    /// pieces known to be sorted and disjoint; only pruned
    pub(crate) fn from_sorted_pieces(mut pieces: Vec<PolynomialPiece>) -> Self {
        pieces.retain(|pp| !pp.polynomial.is_zero() && pp.low != pp.high);
        PiecewisePolynomialFunction { pieces }
    }

    pub fn from_piece(piece: PolynomialPiece) -> Self {
        PiecewisePolynomialFunction::from_sorted_pieces(vec![piece])
    }

    /// from `(polynomial, low, high)` triples
    pub fn from_pairs<L: Into<Scalar>, H: Into<Scalar>>(
        pairs: Vec<(Polynomial, L, H)>,
    ) -> PolyResult<Self> {
        let pieces = pairs
            .into_iter()
            .map(|(p, low, high)| PolynomialPiece::new(p, low, high))
            .collect::<PolyResult<Vec<_>>>()?;
        PiecewisePolynomialFunction::new(pieces)
    }

    /// From `(polynomial, upper bound)` pairs: each polynomial holds from the previous bound
    /// (`-∞` for the first one) up to its own. A leading zero polynomial only marks where the
    /// function starts.
    /// ```rust, ignore
    /// // 0 up to 0, x on [0,1], 1 on [1,2]
    /// let f = PiecewisePolynomialFunction::from_upper_bounds(vec![(zero, 0), (x, 1), (one, 2)])?;
    /// ```
    pub fn from_upper_bounds<B: Into<Scalar>>(pairs: Vec<(Polynomial, B)>) -> PolyResult<Self> {
        let mut low = Scalar::neg_infinity();
        let mut pieces = Vec::with_capacity(pairs.len());
        for (p, bound) in pairs {
            let high: Scalar = bound.into();
            if !(low == Scalar::neg_infinity() && p.is_zero()) {
                pieces.push(PolynomialPiece::new(p, low, high.clone())?);
            }
            low = high;
        }
        PiecewisePolynomialFunction::new(pieces)
    }

    pub fn zero() -> Self {
        PiecewisePolynomialFunction { pieces: Vec::new() }
    }

    pub fn pieces(&self) -> &[PolynomialPiece] {
        &self.pieces
    }

    pub fn is_zero(&self) -> bool {
        self.pieces.is_empty()
    }

    /// all interval endpoints in order (shared endpoints repeated)
    pub fn breakpoints(&self) -> Vec<Scalar> {
        self.pieces
            .iter()
            .flat_map(|pp| [pp.low.clone(), pp.high.clone()])
            .collect()
    }

    /// Piece governing `x`, scanning from `idx_start`.
    ///
    /// Returns the piece (or `None` where the function is zero) together with the index to resume
    /// the next scan from. Points below `pieces[idx_start]` are never looked up backwards.
    pub fn select_piece(&self, x: &Scalar, idx_start: usize) -> (Option<&PolynomialPiece>, usize) {
        match self.pieces.get(idx_start) {
            None => return (None, idx_start),
            Some(first) if x < &first.low => return (None, idx_start),
            _ => {}
        }
        for (i, pp) in self.pieces.iter().enumerate().skip(idx_start) {
            if &pp.low > x {
                return (None, i);
            }
            if x <= &pp.high {
                return (Some(pp), i);
            }
        }
        (None, self.pieces.len())
    }

    fn value_in(piece: Option<&PolynomialPiece>, x: &Scalar) -> Scalar {
        piece
            .and_then(|pp| pp.polynomial.evaluate_scalar(x))
            .unwrap_or_else(Scalar::zero)
    }

    /// value at `x`, zero outside of all pieces
    pub fn evaluate(&self, x: impl Into<Scalar>) -> Scalar {
        let x = x.into();
        let (piece, _) = self.select_piece(&x, 0);
        PiecewisePolynomialFunction::value_in(piece, &x)
    }

    pub fn eval_f64(&self, x: f64) -> f64 {
        self.evaluate(x).to_f64()
    }

    /// Values at many points. Sorted input is scanned once; the scan restarts whenever a point
    /// is smaller than its predecessor.
    pub fn evaluate_many(&self, xs: &[Scalar]) -> Vec<Scalar> {
        let mut idx = 0;
        let mut previous: Option<&Scalar> = None;
        xs.iter()
            .map(|x| {
                if previous.is_some_and(|p| x < p) {
                    idx = 0;
                }
                previous = Some(x);
                let (piece, next) = self.select_piece(x, idx);
                idx = next;
                PiecewisePolynomialFunction::value_in(piece, x)
            })
            .collect()
    }

    /// Composition `self(arg)` with a constant or affine polynomial in `x`.
    ///
    /// A constant argument gives the function value. For `d + k x` every piece becomes
    /// `p(d + k x)` on `[(a - d)/k, (b - d)/k]`, mirrored (and re-ordered) when `k < 0`.
    /// Arguments of degree >= 2 fail with `Domain`.
    pub fn compose(&self, arg: &Polynomial) -> PolyResult<Composed> {
        if arg.degree() <= 0 {
            let value = arg.constant_value().ok_or_else(|| {
                PolyError::type_mismatch(format!("cannot evaluate at {}", arg))
            })?;
            return Ok(Composed::Value(self.evaluate(value)));
        }
        if arg.degree() > 1 {
            return Err(PolyError::domain(format!(
                "composition with {} of degree {} > 1 is not supported",
                arg,
                arg.degree()
            )));
        }
        let arg = as_x_polynomial(arg.clone()).ok_or_else(|| {
            PolyError::type_mismatch(format!("composition argument {} must be a polynomial in x", arg))
        })?;
        let coeff = |pow: usize| arg.coeff(pow, None).as_scalar().cloned();
        let (d, k) = match (coeff(0), coeff(1)) {
            (Some(d), Some(k)) => (d, k),
            _ => {
                return Err(PolyError::type_mismatch(format!(
                    "composition argument {} must have scalar coefficients",
                    arg
                )));
            }
        };
        let k_inv = k
            .recip()
            .ok_or_else(|| PolyError::domain("composition with a zero slope"))?;
        let mirrored = k.is_negative();
        let mut pieces: Vec<PolynomialPiece> = self
            .pieces
            .iter()
            .map(|pp| {
                let a = &(&pp.low - &d) * &k_inv;
                let b = &(&pp.high - &d) * &k_inv;
                let (low, high) = if mirrored { (b, a) } else { (a, b) };
                PolynomialPiece::from_parts(pp.polynomial.compose(&arg), low, high)
            })
            .collect();
        if mirrored {
            pieces.reverse();
        }
        debug!("composed {} pieces with {}", pieces.len(), arg);
        Ok(Composed::Function(
            PiecewisePolynomialFunction::from_sorted_pieces(pieces),
        ))
    }

    /// Piecewise derivative. Jumps at breakpoints are not represented (no Dirac deltas).
    pub fn derivative(&self) -> PiecewisePolynomialFunction {
        let pieces = self
            .pieces
            .iter()
            .map(|pp| {
                PolynomialPiece::from_parts(pp.polynomial.derivative(), pp.low.clone(), pp.high.clone())
            })
            .collect();
        PiecewisePolynomialFunction::from_sorted_pieces(pieces)
    }

    /// integral over `[lower, upper]`
    pub fn definite_integral(&self, lower: impl Into<Scalar>, upper: impl Into<Scalar>) -> Scalar {
        let (lower, upper) = (lower.into(), upper.into());
        let mut total = Scalar::zero();
        for pp in &self.pieces {
            if pp.low > upper {
                break;
            }
            if pp.high < lower {
                continue;
            }
            let lo = Scalar::max_of(&lower, &pp.low);
            let hi = Scalar::min_of(&upper, &pp.high);
            let part = pp.polynomial.definite_integral(lo, hi);
            total = &total + &part.constant_value().unwrap_or_else(Scalar::zero);
        }
        total
    }

    /// integral over the whole real line
    pub fn integral(&self) -> Scalar {
        self.definite_integral(Scalar::neg_infinity(), Scalar::infinity())
    }

    /// Convolution `∫ self(t) other(x - t) dt`, summed over all pairs of pieces.
    ///
    /// Fails with `Domain` when a piece has an infinite interval.
    pub fn convolve(&self, other: &PiecewisePolynomialFunction) -> PolyResult<PiecewisePolynomialFunction> {
        let mut total = PiecewisePolynomialFunction::zero();
        for p1 in &self.pieces {
            for p2 in &other.pieces {
                total = &total + &p1.convolve(p2)?;
            }
        }
        info!(
            "convolution of {} by {} pieces produced {} pieces",
            self.pieces.len(),
            other.pieces.len(),
            total.pieces.len()
        );
        Ok(total)
    }

    /// Convolution of all `functions`, reduced pairwise as a binary tree on the rayon pool.
    ///
    /// Fails with `Domain` on an empty slice: the neutral element of convolution is not a
    /// piecewise polynomial.
    pub fn convolve_all(functions: &[PiecewisePolynomialFunction]) -> PolyResult<PiecewisePolynomialFunction> {
        info!("tree reduction of {} convolutions", functions.len());
        functions
            .par_iter()
            .map(|f| Ok(f.clone()))
            .reduce_with(|a: PolyResult<PiecewisePolynomialFunction>, b| a?.convolve(&b?))
            .unwrap_or_else(|| Err(PolyError::domain("convolution of an empty list of functions")))
    }

    /// left fold of [`PiecewisePolynomialFunction::convolve`] over `functions`
    pub fn convolve_all_sequential(
        functions: &[PiecewisePolynomialFunction],
    ) -> PolyResult<PiecewisePolynomialFunction> {
        let (first, rest) = functions
            .split_first()
            .ok_or_else(|| PolyError::domain("convolution of an empty list of functions"))?;
        rest.iter().try_fold(first.clone(), |acc, f| acc.convolve(f))
    }

    pub fn is_consistent(&self) -> bool {
        self.is_consistent_with(&Tolerance::default())
    }

    /// Intervals are proper, sorted and overlap at most in their endpoints, up to `tol` when
    /// floating endpoints are involved.
    pub fn is_consistent_with(&self, tol: &Tolerance) -> bool {
        let mut previous: Option<&PolynomialPiece> = None;
        for pp in &self.pieces {
            if pp.low > &pp.high + &tol.between(&pp.low, &pp.high) {
                warn!("inconsistent piece {}: interval is reversed", pp);
                return false;
            }
            if let Some(prev) = previous {
                if pp.low < &prev.high - &tol.between(&pp.low, &prev.high) {
                    warn!("inconsistent pieces: {} overlaps {}", pp, prev);
                    return false;
                }
            }
            previous = Some(pp);
        }
        true
    }

    pub fn is_continuous(&self) -> bool {
        self.is_continuous_with(None)
    }

    /// Continuity at the finite left end of every piece. The left limit there is the previous
    /// piece's value when the two pieces touch and the implicit zero otherwise.
    ///
    /// `prec == None` compares exact values exactly and floating ones up to `DEFAULT_EPS`.
    pub fn is_continuous_with(&self, prec: Option<f64>) -> bool {
        if !self.is_consistent() {
            return false;
        }
        let tol_for = |v: &Scalar| match prec {
            Some(e) => Scalar::Approx(e),
            None if v.is_exact() => Scalar::zero(),
            None => Scalar::Approx(DEFAULT_EPS),
        };
        let close = |a: &Scalar, b: &Scalar| {
            let diff = (a - b).abs();
            diff <= tol_for(&diff)
        };
        let mut previous: Option<&PolynomialPiece> = None;
        for pp in &self.pieces {
            if pp.low.is_finite() {
                let left_limit = match previous {
                    Some(prev) if close(&pp.low, &prev.high) => {
                        PiecewisePolynomialFunction::value_in(Some(prev), &pp.low)
                    }
                    _ => Scalar::zero(),
                };
                let value = PiecewisePolynomialFunction::value_in(Some(pp), &pp.low);
                if !close(&value, &left_limit) {
                    debug!("jump at {}: {} -> {}", endpoint_repr(&pp.low), left_limit, value);
                    return false;
                }
            }
            previous = Some(pp);
        }
        true
    }
}

impl fmt::Display for PiecewisePolynomialFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.pieces.is_empty() {
            return write!(f, "f(x) = 0");
        }
        let heads: Vec<String> = self
            .pieces
            .iter()
            .map(|pp| format!("{}, ", pp.polynomial))
            .collect();
        let width = heads.iter().map(|h| h.chars().count()).max().unwrap_or(0);
        let lines: Vec<String> = heads
            .iter()
            .zip(&self.pieces)
            .map(|(head, pp)| {
                format!(
                    "{:<width$}{} in [{},{}]",
                    head,
                    DEFAULT_VAR,
                    endpoint_repr(&pp.low),
                    endpoint_repr(&pp.high),
                    width = width
                )
            })
            .collect();
        write!(f, "f(x) =\n  {}\n  0, else", lines.join("\n  "))
    }
}
