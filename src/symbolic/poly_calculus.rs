//! # Composition, derivatives and integrals
//!
//! All operations here are exact symbolic manipulations of the coefficient lists; definite
//! integrals are antiderivatives evaluated by composition, so bounds may be polynomials
//! themselves (this is what piecewise convolution relies on).
use crate::symbolic::poly_arithmetic::{PolyOperand, coeff_scale, polynomial_from_coeffs};
use crate::symbolic::polynomial::{Coefficient, Polynomial};
use crate::symbolic::scalar::Scalar;
use std::collections::BTreeMap;

/// Horner scheme over coefficients already converted to operands
fn horner(coeffs: Vec<PolyOperand>, arg: &PolyOperand, var: &str) -> Polynomial {
    let mut acc = Polynomial::zero_in(var);
    for c in coeffs.into_iter().rev() {
        acc.mul_in_place(arg.clone());
        acc.add_in_place(c);
    }
    acc
}

impl Polynomial {
    /// Composition `self(arg)`.
    ///
    /// A scalar argument evaluates the main variable, a polynomial argument substitutes it. The
    /// result is always a polynomial (a constant one when nothing is left).
    /// ```rust, ignore
    /// let p = Polynomial::parse("x^2+x-1")?;
    /// let q = Polynomial::parse("1-x")?;
    /// assert_eq!(p.compose(&q), Polynomial::parse("x^2-3x+1")?);
    /// ```
    pub fn compose(&self, arg: impl Into<PolyOperand>) -> Polynomial {
        let arg = match arg.into() {
            PolyOperand::Coefficients(cs) => {
                PolyOperand::Polynomial(polynomial_from_coeffs(&self.var, cs))
            }
            other => other,
        };
        let var = match &arg {
            PolyOperand::Polynomial(p) => p.var.clone(),
            _ => self.var.clone(),
        };
        if self.coeffs.is_empty() {
            return Polynomial::zero_in(&var);
        }
        let coeffs = self.coeffs.iter().map(PolyOperand::from).collect();
        horner(coeffs, &arg, &var)
    }

    /// Substitutes the variables found in `subs` and keeps all the others.
    ///
    /// Nested coefficients are substituted recursively before the main variable is handled, and
    /// the result is rebuilt with polynomial arithmetic so the nesting order stays valid even when
    /// substitutes introduce new variables.
    pub fn compose_map(&self, subs: &BTreeMap<String, PolyOperand>) -> Polynomial {
        let coeffs: Vec<PolyOperand> = self
            .coeffs
            .iter()
            .map(|c| match c {
                Coefficient::Nested(p) => PolyOperand::Polynomial(p.compose_map(subs)),
                Coefficient::Scalar(s) => PolyOperand::Scalar(s.clone()),
            })
            .collect();
        match subs.get(&self.var) {
            Some(arg) => {
                let var = match arg {
                    PolyOperand::Polynomial(p) => p.var.clone(),
                    _ => self.var.clone(),
                };
                horner(coeffs, arg, &var)
            }
            None => {
                let id = PolyOperand::Polynomial(Polynomial::identity(self.var.clone()));
                horner(coeffs, &id, &self.var)
            }
        }
    }

    pub fn derivative(&self) -> Polynomial {
        let var = self.var.clone();
        self.derivative_wrt(&var)
    }

    /// Partial derivative; zero for a variable the polynomial does not depend on.
    pub fn derivative_wrt(&self, var: &str) -> Polynomial {
        if var == self.var {
            if self.coeffs.len() <= 1 {
                return Polynomial::zero_in(&self.var);
            }
            let coeffs = self
                .coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(i, c)| coeff_scale(c, &Scalar::from(i)))
                .collect();
            return Polynomial::from_parts(self.var.clone(), coeffs);
        }
        if var > self.var.as_str() {
            return Polynomial::zero_in(var);
        }
        let coeffs = self
            .coeffs
            .iter()
            .map(|c| match c {
                Coefficient::Nested(p) => Coefficient::Nested(p.derivative_wrt(var)),
                Coefficient::Scalar(_) => Coefficient::zero(),
            })
            .collect();
        let mut d = Polynomial::from_parts(self.var.clone(), coeffs);
        if d.coeffs.len() <= 1 {
            d.var = var.to_string();
        }
        d
    }

    pub fn indefinite_integral(&self) -> Polynomial {
        let var = self.var.clone();
        self.indefinite_integral_wrt(&var)
    }

    /// Antiderivative with zero constant term; the `c_k/(k+1)` factors are exact rationals.
    pub fn indefinite_integral_wrt(&self, var: &str) -> Polynomial {
        if var == self.var {
            let mut coeffs = Vec::with_capacity(self.coeffs.len() + 1);
            coeffs.push(Coefficient::zero());
            for (i, c) in self.coeffs.iter().enumerate() {
                coeffs.push(coeff_scale(c, &Scalar::unit_fraction(i + 1)));
            }
            return Polynomial::from_parts(self.var.clone(), coeffs);
        }
        if var > self.var.as_str() {
            return Polynomial::from_parts(
                var.to_string(),
                vec![Coefficient::zero(), Coefficient::Nested(self.clone())],
            );
        }
        let coeffs = self
            .coeffs
            .iter()
            .map(|c| match c {
                Coefficient::Nested(p) => Coefficient::Nested(p.indefinite_integral_wrt(var)),
                Coefficient::Scalar(s) => Coefficient::Nested(Polynomial::from_parts(
                    var.to_string(),
                    vec![Coefficient::zero(), Coefficient::Scalar(s.clone())],
                )),
            })
            .collect();
        Polynomial::from_parts(self.var.clone(), coeffs)
    }

    /// `F(upper) - F(lower)` for the antiderivative `F` in the main variable.
    ///
    /// Bounds may be scalars or polynomials.
    pub fn definite_integral(
        &self,
        lower: impl Into<PolyOperand>,
        upper: impl Into<PolyOperand>,
    ) -> Polynomial {
        let antiderivative = self.indefinite_integral();
        antiderivative.compose(upper) - antiderivative.compose(lower)
    }

    /// definite integral with respect to any variable, other variables are kept
    pub fn definite_integral_wrt(
        &self,
        var: &str,
        lower: impl Into<PolyOperand>,
        upper: impl Into<PolyOperand>,
    ) -> Polynomial {
        let antiderivative = self.indefinite_integral_wrt(var);
        let at = |bound: PolyOperand| {
            let mut subs = BTreeMap::new();
            subs.insert(var.to_string(), bound);
            antiderivative.compose_map(&subs)
        };
        at(upper.into()) - at(lower.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(coeffs: Vec<i64>) -> Polynomial {
        Polynomial::from_vec(coeffs)
    }

    #[test]
    fn test_compose_with_coefficient_list_of_outer_variable() {
        let y = Polynomial::symbol("y").unwrap();
        let composed = p(vec![1, 0, 1]).compose(vec![Coefficient::Nested(y.clone())]);
        assert_eq!(composed, &y * &y + 1);
        assert_eq!(composed.var(), "y");
    }

    #[test]
    fn test_compose() {
        let sq = p(vec![0, 0, 1]);
        let shift = p(vec![-1, 1]);
        assert_eq!(sq.compose(&shift), p(vec![1, -2, 1]));
        assert_eq!(p(vec![0, 0, 0, 1]).compose(&shift), p(vec![-1, 3, -3, 1]));
        let p1 = p(vec![-1, 1, 1]);
        let p2 = p(vec![1, -1]);
        assert_eq!(p1.compose(0), p(vec![-1]));
        assert_eq!(p1.compose(&p2), p(vec![1, -3, 1]));
        assert_eq!(p1.compose(&p2).compose(&p2), p(vec![-1, 1, 1]));
        assert!(Polynomial::zero().compose(&shift).is_zero());
    }

    #[test]
    fn test_compose_map_substitutes_inner_variable() {
        let x = Polynomial::symbol("x").unwrap();
        let y = Polynomial::symbol("y").unwrap();
        let xy = &x * &y;
        let mut subs = BTreeMap::new();
        subs.insert("x".to_string(), PolyOperand::Scalar(Scalar::integer(3)));
        assert_eq!(xy.compose_map(&subs), &y * 3);
        // substituting an inner variable by an outer one
        let mut subs = BTreeMap::new();
        subs.insert("x".to_string(), PolyOperand::Polynomial(y.clone()));
        assert_eq!(xy.compose_map(&subs), y.pow(2));
        // untouched when no variable matches
        let mut subs = BTreeMap::new();
        subs.insert("z".to_string(), PolyOperand::Scalar(Scalar::one()));
        assert_eq!(xy.compose_map(&subs), xy);
    }

    #[test]
    fn test_derivative() {
        assert_eq!(p(vec![0, 0, 1]).derivative(), p(vec![0, 2]));
        assert!(p(vec![5]).derivative().is_zero());
        let x = Polynomial::symbol("x").unwrap();
        let y = Polynomial::symbol("y").unwrap();
        // d/dx (x^2 y + y) = 2xy
        let q = &(&x * &x) * &y + &y;
        assert_eq!(q.derivative_wrt("x"), &(&x * &y) * 2);
        assert_eq!(q.derivative_wrt("y"), &(&x * &x) + 1);
        assert!(q.derivative_wrt("z").is_zero());
        assert!(x.derivative_wrt("y").is_zero());
    }

    #[test]
    fn test_indefinite_integral() {
        let half = Scalar::ratio(1, 2).unwrap();
        assert_eq!(
            p(vec![0, 1]).indefinite_integral(),
            Polynomial::from_vec(vec![Scalar::zero(), Scalar::zero(), half.clone()])
        );
        assert_eq!(
            p(vec![1, 1]).indefinite_integral(),
            Polynomial::from_vec(vec![Scalar::zero(), Scalar::one(), half])
        );
        let x = Polynomial::symbol("x").unwrap();
        let y = Polynomial::symbol("y").unwrap();
        // variable above: multiply by it
        assert_eq!(x.indefinite_integral_wrt("y"), &x * &y);
        // variable below: integrate the coefficients
        assert_eq!(y.indefinite_integral_wrt("x"), &x * &y);
    }

    #[test]
    fn test_definite_integral() {
        let q = p(vec![0, 1]);
        assert_eq!(q.definite_integral(0, 1), Polynomial::constant(Scalar::ratio(1, 2).unwrap()));
        // symbolic upper bound: int_0^x t dt = x^2/2
        let x = Polynomial::symbol("x").unwrap();
        let expected = (&x * &x).scaled(&Scalar::ratio(1, 2).unwrap());
        assert_eq!(q.definite_integral(0, &x), expected);
        // int_0^1 xy dx = y/2
        let y = Polynomial::symbol("y").unwrap();
        assert_eq!(
            (&x * &y).definite_integral_wrt("x", 0, 1),
            y.scaled(&Scalar::ratio(1, 2).unwrap())
        );
    }

    #[test]
    fn test_float_coefficients_integrate_approximately() {
        let q = Polynomial::from_vec(vec![0.5, 1.5]);
        let v = q.definite_integral(0.0, 2.0).constant_value().unwrap();
        approx::assert_relative_eq!(v.to_f64(), 4.0, epsilon = 1e-12);
    }
}
