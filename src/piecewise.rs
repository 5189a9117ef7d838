#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a polynomial restricted to a closed interval, and the convolution of two such pieces
///
///# Example
/// ```
/// use RustedPolyPieces::piecewise::poly_piece::PolynomialPiece;
/// use RustedPolyPieces::symbolic::polynomial::Polynomial;
/// let uniform = PolynomialPiece::new(Polynomial::constant(1), 0, 1).unwrap();
/// let triangle = uniform.convolve(&uniform).unwrap();
/// assert_eq!(triangle.pieces().len(), 2);
/// ```
pub mod poly_piece;
///____________________________________________________________________________________________________________________________
/// # Piecewise polynomial functions
/// a module
/// 1) keeps a sorted list of non-overlapping polynomial pieces (zero outside of them)
/// 2) evaluates, composes with affine maps, differentiates and integrates them
/// 3) convolves them exactly (pairwise or as a parallel reduction of many functions)
///# Example#
/// ```
/// use RustedPolyPieces::piecewise::PPoly::PiecewisePolynomialFunction;
/// use RustedPolyPieces::piecewise::poly_piece::PolynomialPiece;
/// use RustedPolyPieces::symbolic::polynomial::Polynomial;
/// let uniform = PiecewisePolynomialFunction::from_piece(
///     PolynomialPiece::new(Polynomial::constant(1), 0, 1).unwrap(),
/// );
/// let triangle = uniform.convolve(&uniform).unwrap();
/// assert_eq!(triangle.eval_f64(1.0), 1.0);
/// assert_eq!(triangle.integral().to_string(), "1");
/// ```
pub mod PPoly;
///____________________________________________________________________________________________________________________________
/// arithmetic of piecewise functions with scalars, polynomials and other piecewise functions
/// on the common refinement of their breakpoints
pub mod ppoly_arithmetic;
///
#[cfg(test)]
mod ppoly_tests;
