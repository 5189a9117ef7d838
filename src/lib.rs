// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
//! # RustedPolyPieces
//!
//! Exact computer algebra for nested multivariate polynomials and piecewise polynomial
//! functions.
//!
//! * [`symbolic`]: polynomials with rational or floating coefficients, parsing, formatting,
//!   arithmetic, long division, composition, derivatives and integrals
//! * [`piecewise`]: piecewise polynomial functions (densities) with exact symbolic convolution
//!
//! ```
//! use RustedPolyPieces::piecewise::PPoly::PiecewisePolynomialFunction;
//! use RustedPolyPieces::symbolic::polynomial::Polynomial;
//! // density of the sum of two uniform random variables on [0,1]
//! let uniform = PiecewisePolynomialFunction::from_pairs(vec![(Polynomial::constant(1), 0, 1)]).unwrap();
//! let triangle = uniform.convolve(&uniform).unwrap();
//! assert_eq!(triangle.pieces()[1].to_string(), "-x + 2, x in [1,2]");
//! ```
pub mod errors;
pub mod symbolic;
pub mod piecewise;
pub mod Utils;
