#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// exact (rational) and approximate (float) coefficients with kind-agnostic arithmetic
///
///# Example
/// ```
/// use RustedPolyPieces::symbolic::scalar::Scalar;
/// let third = Scalar::ratio(1, 3).unwrap();
/// assert_eq!((&third + &third).to_string(), "2/3");
/// assert!(!(&third + &Scalar::from(0.5)).is_exact());
/// ```
pub mod scalar;
///____________________________________________________________________________________________________________________________
/// # Nested polynomials
/// a module
/// 1) stores multivariate polynomials as univariate polynomials with polynomial coefficients
/// 2) keeps them normalized (no leading zeros, constant coefficients collapsed)
/// 3) answers degree/coefficient queries, evaluates and compares them
///# Example#
/// ```
/// use RustedPolyPieces::symbolic::polynomial::Polynomial;
/// use RustedPolyPieces::symbolic::scalar::Scalar;
/// let p = Polynomial::from_vec(vec![1, 2, 1]); // x^2 + 2x + 1
/// assert_eq!(p.degree(), 2);
/// assert_eq!(p.evaluate_scalar(&Scalar::integer(1)), Some(Scalar::integer(4)));
/// ```
pub mod polynomial;
///____________________________________________________________________________________________________________________________
/// addition, subtraction, multiplication, powers and long division of polynomials (also as std::ops)
///# Example#
/// ```
/// use RustedPolyPieces::symbolic::polynomial::Polynomial;
/// let p = Polynomial::parse("x^3-1").unwrap();
/// let (q, r) = p.divide(&Polynomial::parse("x-1").unwrap()).unwrap();
/// assert_eq!(q.to_string(), "x^2 + x + 1");
/// assert!(r.is_zero());
/// ```
pub mod poly_arithmetic;
///____________________________________________________________________________________________________________________________
/// composition, substitution, derivatives and integrals (indefinite and with symbolic bounds)
///# Example#
/// ```
/// use RustedPolyPieces::symbolic::polynomial::Polynomial;
/// let p = Polynomial::parse("x^2+x-1").unwrap();
/// let q = Polynomial::parse("1-x").unwrap();
/// assert_eq!(p.compose(&q).to_string(), "x^2 - 3x + 1");
/// assert_eq!(p.derivative().to_string(), "2x + 1");
/// ```
pub mod poly_calculus;
///____________________________________________________________________________________________________________________________
/// string rendering of polynomials with configurable operators, term order and precision
pub mod poly_format;
///____________________________________________________________________________________________________________________________
/// parse a string like "(x+y)^2 - 1/2x" into a polynomial
pub mod parse_expr;
///
#[cfg(test)]
mod polynomial_tests;
