//! # Nested polynomial representation
//!
//! A multivariate polynomial is stored as a univariate polynomial whose coefficients are either
//! scalars or polynomials in a variable that orders strictly below the outer one:
//!
//! `(x+y)^2` is kept as `y^2 + (2x)y + x^2`, i.e. `var = "y"`, `coeffs = [x^2, 2x, 1]`.
//!
//! Coefficients are stored in ascending powers. Every constructor and every in-place operation
//! re-establishes the normal form:
//! - nested coefficients of degree <= 0 are collapsed into scalars,
//! - trailing zero coefficients are removed (the zero polynomial has no coefficients),
//! - a polynomial whose only coefficient is a nested polynomial becomes that polynomial.
use crate::errors::{PolyError, PolyResult};
use crate::symbolic::scalar::Scalar;
use std::collections::BTreeSet;

/// Coefficient of a nested polynomial.
#[derive(Clone, Debug)]
pub enum Coefficient {
    Scalar(Scalar),
    Nested(Polynomial),
}

impl Coefficient {
    pub fn zero() -> Self {
        Coefficient::Scalar(Scalar::zero())
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Coefficient::Scalar(s) => s.is_zero(),
            Coefficient::Nested(p) => p.is_zero(),
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Coefficient::Scalar(s) => Some(s),
            Coefficient::Nested(_) => None,
        }
    }

    pub fn as_polynomial(&self) -> Option<&Polynomial> {
        match self {
            Coefficient::Scalar(_) => None,
            Coefficient::Nested(p) => Some(p),
        }
    }

    /// wraps a polynomial, collapsing it into a scalar when it is constant
    pub fn from_polynomial(p: Polynomial) -> Self {
        match p.constant_value() {
            Some(c) => Coefficient::Scalar(c),
            None => Coefficient::Nested(p),
        }
    }

    /// the coefficient as a polynomial; scalars become constants in `var`
    pub fn into_polynomial(self, var: &str) -> Polynomial {
        match self {
            Coefficient::Scalar(s) => Polynomial::constant_in(s, var),
            Coefficient::Nested(p) => p,
        }
    }

    pub fn approx_eq(&self, other: &Coefficient, eps: Option<f64>) -> bool {
        match (self, other) {
            (Coefficient::Scalar(a), Coefficient::Scalar(b)) => a.approx_eq(b, eps),
            (Coefficient::Scalar(s), Coefficient::Nested(p))
            | (Coefficient::Nested(p), Coefficient::Scalar(s)) => p.approx_eq_scalar(s, eps),
            (Coefficient::Nested(p), Coefficient::Nested(q)) => p.approx_eq(q, eps),
        }
    }
}

impl PartialEq for Coefficient {
    fn eq(&self, other: &Coefficient) -> bool {
        self.approx_eq(other, None)
    }
}

impl From<Scalar> for Coefficient {
    fn from(s: Scalar) -> Self {
        Coefficient::Scalar(s)
    }
}

impl From<Polynomial> for Coefficient {
    fn from(p: Polynomial) -> Self {
        Coefficient::from_polynomial(p)
    }
}

impl From<i64> for Coefficient {
    fn from(n: i64) -> Self {
        Coefficient::Scalar(Scalar::integer(n))
    }
}

impl From<i32> for Coefficient {
    fn from(n: i32) -> Self {
        Coefficient::Scalar(Scalar::from(n))
    }
}

impl From<f64> for Coefficient {
    fn from(f: f64) -> Self {
        Coefficient::Scalar(Scalar::Approx(f))
    }
}

/// Nested univariate polynomial.
#[derive(Clone, Debug)]
pub struct Polynomial {
    pub(crate) var: String,
    pub(crate) coeffs: Vec<Coefficient>,
}

/// default variable of constructors that do not name one
pub const DEFAULT_VAR: &str = "x";

/// Variable names must start with a letter; surrounding whitespace is dropped.
pub(crate) fn check_var_name(name: &str) -> PolyResult<String> {
    let name = name.trim();
    match name.chars().next() {
        Some(c) if c.is_alphabetic() => Ok(name.to_string()),
        _ => Err(PolyError::construction(format!(
            "variable name must start with a letter, '{}' given",
            name
        ))),
    }
}

impl Polynomial {
    /// Builds a polynomial from coefficients given in ascending powers of `var`.
    ///
    /// Fails if `var` is not a valid variable name or if a nested coefficient does not use a
    /// variable ordering strictly below `var`.
    pub fn new(coeffs: Vec<Coefficient>, var: &str) -> PolyResult<Self> {
        let var = check_var_name(var)?;
        let nested_max = coeffs
            .iter()
            .filter_map(|c| c.as_polynomial().map(|p| p.var.as_str()))
            .max();
        if let Some(inner) = nested_max {
            if inner >= var.as_str() {
                return Err(PolyError::construction(format!(
                    "coefficients of a polynomial must use variables ordering below the main variable '{}', but '{}' found",
                    var, inner
                )));
            }
        }
        Ok(Polynomial::from_parts(var, coeffs))
    }

    /// scalar coefficients in ascending powers of `x`
    pub fn from_vec<S: Into<Scalar>>(coeffs: Vec<S>) -> Self {
        Polynomial::from_parts(
            DEFAULT_VAR.to_string(),
            coeffs.into_iter().map(|c| Coefficient::Scalar(c.into())).collect(),
        )
    }

    /// scalar coefficients in ascending powers of `var`
    pub fn with_var<S: Into<Scalar>>(coeffs: Vec<S>, var: &str) -> PolyResult<Self> {
        let var = check_var_name(var)?;
        Ok(Polynomial::from_parts(
            var,
            coeffs.into_iter().map(|c| Coefficient::Scalar(c.into())).collect(),
        ))
    }

    /// normalized polynomial from trusted parts (name already validated, nesting order respected)
    pub(crate) fn from_parts(var: String, coeffs: Vec<Coefficient>) -> Self {
        let mut p = Polynomial { var, coeffs };
        p.normalize();
        p
    }

    pub fn zero() -> Self {
        Polynomial::zero_in(DEFAULT_VAR)
    }

    pub(crate) fn zero_in(var: &str) -> Self {
        Polynomial {
            var: var.to_string(),
            coeffs: Vec::new(),
        }
    }

    pub fn constant(c: impl Into<Scalar>) -> Self {
        Polynomial::constant_in(c.into(), DEFAULT_VAR)
    }

    pub(crate) fn constant_in(c: Scalar, var: &str) -> Self {
        Polynomial::from_parts(var.to_string(), vec![Coefficient::Scalar(c)])
    }

    /// identity polynomial of a variable, e.g. `y` for `"y"`
    pub fn symbol(name: &str) -> PolyResult<Self> {
        let var = check_var_name(name)?;
        Ok(Polynomial::identity(var))
    }

    pub(crate) fn identity(var: String) -> Self {
        Polynomial {
            var,
            coeffs: vec![Coefficient::zero(), Coefficient::Scalar(Scalar::one())],
        }
    }

    /// several symbols at once: `Polynomial::symbols("x, y")`
    pub fn symbols(names: &str) -> PolyResult<Vec<Self>> {
        names
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|n| !n.is_empty())
            .map(Polynomial::symbol)
            .collect()
    }

    pub fn var(&self) -> &str {
        &self.var
    }

    /// coefficients in ascending powers of the main variable
    pub fn coeffs(&self) -> &[Coefficient] {
        &self.coeffs
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn is_constant(&self) -> bool {
        self.degree() <= 0
    }

    /// degree in the main variable, -1 for the zero polynomial
    pub fn degree(&self) -> i32 {
        self.coeffs.len() as i32 - 1
    }

    /// degree in an arbitrary variable, searched recursively through nested coefficients
    pub fn degree_in(&self, var: &str) -> i32 {
        if var == self.var {
            return self.degree();
        }
        self.coeffs
            .iter()
            .map(|c| match c {
                Coefficient::Nested(p) => p.degree_in(var),
                Coefficient::Scalar(s) if s.is_zero() => -1,
                Coefficient::Scalar(_) => 0,
            })
            .max()
            .unwrap_or(-1)
    }

    /// Coefficient of the monomial `var^pow` (main variable when `var` is `None`).
    ///
    /// For an inner variable the result is a polynomial in the remaining variables, or a scalar
    /// if it does not depend on any.
    pub fn coeff(&self, pow: usize, var: Option<&str>) -> Coefficient {
        let var = match var {
            None => return self.coeffs.get(pow).cloned().unwrap_or_else(Coefficient::zero),
            Some(v) if v == self.var => {
                return self.coeffs.get(pow).cloned().unwrap_or_else(Coefficient::zero);
            }
            Some(v) => v,
        };
        if var > self.var.as_str() {
            return Coefficient::zero();
        }
        let coeffs = self
            .coeffs
            .iter()
            .map(|c| match c {
                Coefficient::Nested(p) => p.coeff(pow, Some(var)),
                Coefficient::Scalar(_) => Coefficient::zero(),
            })
            .collect();
        Coefficient::from_polynomial(Polynomial::from_parts(self.var.clone(), coeffs))
    }

    pub fn all_var_names(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        names.insert(self.var.clone());
        for c in &self.coeffs {
            if let Coefficient::Nested(p) = c {
                names.extend(p.all_var_names());
            }
        }
        names
    }

    /// value of a polynomial of degree <= 0
    pub fn constant_value(&self) -> Option<Scalar> {
        match self.coeffs.as_slice() {
            [] => Some(Scalar::zero()),
            [Coefficient::Scalar(s)] => Some(s.clone()),
            _ => None,
        }
    }

    /// Evaluates the main variable at `x` (Horner scheme).
    ///
    /// Returns a scalar when the result does not depend on other variables, the remaining
    /// polynomial otherwise.
    pub fn evaluate(&self, x: &Scalar) -> Coefficient {
        Coefficient::from_polynomial(self.compose(x.clone()))
    }

    /// value at `x` of a polynomial that depends on its main variable only
    pub fn evaluate_scalar(&self, x: &Scalar) -> Option<Scalar> {
        match self.evaluate(x) {
            Coefficient::Scalar(s) => Some(s),
            Coefficient::Nested(_) => None,
        }
    }

    pub(crate) fn normalize(&mut self) {
        for c in self.coeffs.iter_mut() {
            if let Coefficient::Nested(p) = c {
                p.normalize();
                if let Some(s) = p.constant_value() {
                    *c = Coefficient::Scalar(s);
                }
            }
        }
        while self.coeffs.last().is_some_and(|c| c.is_zero()) {
            self.coeffs.pop();
        }
        if let [Coefficient::Nested(_)] = self.coeffs.as_slice() {
            if let Some(Coefficient::Nested(inner)) = self.coeffs.pop() {
                *self = inner;
            }
        }
    }

    /// Equality with tolerance.
    ///
    /// `eps == None` compares exactly when both sides are exact and within `DEFAULT_EPS` as soon
    /// as a floating coefficient is involved. Polynomials in different variables are only equal
    /// when both are constants.
    pub fn approx_eq(&self, other: &Polynomial, eps: Option<f64>) -> bool {
        if self.var != other.var && self.coeffs.len().max(other.coeffs.len()) > 1 {
            return false;
        }
        self.coeffs.len() == other.coeffs.len()
            && self
                .coeffs
                .iter()
                .zip(other.coeffs.iter())
                .all(|(a, b)| a.approx_eq(b, eps))
    }

    pub fn approx_eq_scalar(&self, s: &Scalar, eps: Option<f64>) -> bool {
        if self.coeffs.len() > 1 {
            return false;
        }
        match self.coeff(0, None) {
            Coefficient::Scalar(c) => c.approx_eq(s, eps),
            Coefficient::Nested(_) => false,
        }
    }
}

impl PartialEq for Polynomial {
    fn eq(&self, other: &Polynomial) -> bool {
        self.approx_eq(other, None)
    }
}

impl PartialEq<Scalar> for Polynomial {
    fn eq(&self, other: &Scalar) -> bool {
        self.approx_eq_scalar(other, None)
    }
}

impl PartialEq<i64> for Polynomial {
    fn eq(&self, other: &i64) -> bool {
        self.approx_eq_scalar(&Scalar::integer(*other), None)
    }
}

impl Default for Polynomial {
    fn default() -> Self {
        Polynomial::zero()
    }
}
