use crate::piecewise::PPoly::{Composed, PiecewisePolynomialFunction};
use crate::piecewise::poly_piece::PolynomialPiece;
use crate::symbolic::polynomial::Polynomial;
use crate::symbolic::scalar::Scalar;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
//___________________________________TESTS____________________________________

#[cfg(test)]
mod tests {
    use super::*;

    fn p(coeffs: Vec<i64>) -> Polynomial {
        Polynomial::from_vec(coeffs)
    }

    fn uniform() -> PiecewisePolynomialFunction {
        PiecewisePolynomialFunction::from_piece(PolynomialPiece::new(p(vec![1]), 0, 1).unwrap())
    }

    fn lines(f: &PiecewisePolynomialFunction) -> Vec<String> {
        f.pieces().iter().map(|pp| pp.to_string()).collect()
    }

    fn random_scalar(rng: &mut StdRng) -> Scalar {
        let n: i64 = rng.random_range(-6..=6);
        let d: i64 = rng.random_range(1..=3);
        Scalar::ratio(n, d).unwrap()
    }

    /// consecutive pieces of random exact polynomials of degree <= 2
    fn random_function(rng: &mut StdRng, max_pieces: usize) -> PiecewisePolynomialFunction {
        let n = rng.random_range(1..=max_pieces);
        let mut low = Scalar::integer(rng.random_range(-3..=3));
        let mut pairs = Vec::with_capacity(n);
        for _ in 0..n {
            let width = Scalar::ratio(rng.random_range(1..=4), 2).unwrap();
            let high = &low + &width;
            let degree = rng.random_range(0..=2);
            let coeffs: Vec<Scalar> = (0..=degree).map(|_| random_scalar(rng)).collect();
            pairs.push((Polynomial::from_vec(coeffs), low.clone(), high.clone()));
            low = high;
        }
        PiecewisePolynomialFunction::from_pairs(pairs).unwrap()
    }

    #[test]
    fn test_uniform_convolutions_give_b_splines() {
        let pdf0 = uniform();
        let pdf1 = pdf0.convolve(&pdf0).unwrap();
        assert_eq!(
            pdf1.to_string(),
            "f(x) =\n  x,      x in [0,1]\n  -x + 2, x in [1,2]\n  0, else"
        );
        let pdf2 = pdf1.convolve(&pdf0).unwrap();
        assert_eq!(
            lines(&pdf2),
            vec![
                "1/2x^2, x in [0,1]",
                "-x^2 + 3x - 3/2, x in [1,2]",
                "1/2x^2 - 3x + 9/2, x in [2,3]"
            ]
        );
        let values: Vec<String> = [0, 1, 2, 3].iter().map(|&x| pdf2.evaluate(x).to_string()).collect();
        assert_eq!(values.join(", "), "0, 1/2, 1/2, 0");
        assert_eq!(pdf2.evaluate(Scalar::ratio(3, 2).unwrap()), Scalar::ratio(3, 4).unwrap());
        assert_eq!(pdf2.definite_integral(0, 4), Scalar::one());
    }

    #[test]
    fn test_cubic_b_spline() {
        let pdf1 = uniform().convolve(&uniform()).unwrap();
        let pdf3 = pdf1.convolve(&pdf1).unwrap();
        assert_eq!(
            pdf3.to_string(),
            "f(x) =\n  \
             1/6x^3,                     x in [0,1]\n  \
             -1/2x^3 + 2x^2 - 2x + 2/3,  x in [1,2]\n  \
             1/2x^3 - 4x^2 + 10x - 22/3, x in [2,3]\n  \
             -1/6x^3 + 2x^2 - 8x + 32/3, x in [3,4]\n  \
             0, else"
        );
        assert_eq!(pdf3.definite_integral(0, 4), Scalar::one());
        assert!(pdf3.is_continuous());
    }

    #[test]
    fn test_ramp_convolution_through_functions() {
        let ramp = PiecewisePolynomialFunction::from_pairs(vec![(p(vec![0, 1]), 0, 1)]).unwrap();
        let conv = ramp.convolve(&ramp).unwrap();
        assert_eq!(
            conv.to_string(),
            "f(x) =\n  1/6x^3,            x in [0,1]\n  -1/6x^3 + x - 2/3, x in [1,2]\n  0, else"
        );
    }

    #[test]
    fn test_convolution_is_commutative() {
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..8 {
            let f = random_function(&mut rng, 3);
            let g = random_function(&mut rng, 2);
            let fg = f.convolve(&g).unwrap();
            let gf = g.convolve(&f).unwrap();
            for _ in 0..10 {
                let x = Scalar::ratio(rng.random_range(-30..=40), 4).unwrap();
                assert_eq!(fg.evaluate(x.clone()), gf.evaluate(x.clone()), "x = {}", x);
            }
        }
    }

    #[test]
    fn test_convolution_preserves_mass() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..8 {
            let f = random_function(&mut rng, 3);
            let g = random_function(&mut rng, 3);
            let conv = f.convolve(&g).unwrap();
            assert_eq!(conv.integral(), &f.integral() * &g.integral());
        }
    }

    #[test]
    fn test_float_convolution_is_close_to_exact() {
        let exact = uniform().convolve(&uniform()).unwrap();
        let approx_uniform = PiecewisePolynomialFunction::from_piece(
            PolynomialPiece::new(Polynomial::from_vec(vec![1.0]), 0.0, 1.0).unwrap(),
        );
        let approx = approx_uniform.convolve(&approx_uniform).unwrap();
        for x in [0.1, 0.5, 1.0, 1.3, 1.9] {
            approx::assert_relative_eq!(approx.eval_f64(x), exact.eval_f64(x), epsilon = 1e-12);
        }
        assert!(approx.is_continuous());
    }

    #[test]
    fn test_continuity_of_derived_functions() {
        let pdf1 = uniform().convolve(&uniform()).unwrap();
        let pdf2 = pdf1.convolve(&uniform()).unwrap();
        assert!(pdf1.is_continuous());
        assert!(pdf2.is_continuous());
        // pdf2 is continuously differentiable
        assert!(pdf2.derivative().is_continuous());
        assert!((&pdf1 + &pdf2).is_continuous());
        assert!((&pdf1 * &pdf2).is_continuous());
        assert!(!uniform().is_continuous());
        assert!(PiecewisePolynomialFunction::zero().is_continuous());
    }

    #[test]
    fn test_derivative_of_smooth_bump() {
        let square = p(vec![0, 0, 1]);
        let f = PiecewisePolynomialFunction::from_pairs(vec![
            (square.compose(&p(vec![2, 1])), -2, -1),
            (&p(vec![2]) - &square, -1, 1),
            (square.compose(&p(vec![-2, 1])), 1, 2),
        ])
        .unwrap();
        let d = f.derivative();
        assert!(d.is_continuous());
        let values: Vec<Scalar> = [-2, -1, 0, 1, 2].iter().map(|&x| d.evaluate(x)).collect();
        let expected: Vec<Scalar> = [0, 2, 0, -2, 0].iter().map(|&x| Scalar::integer(x)).collect();
        assert_eq!(values, expected);
        assert_eq!(d.integral(), Scalar::zero());
    }

    #[test]
    fn test_empty_function() {
        let zero = PiecewisePolynomialFunction::new(vec![]).unwrap();
        assert!(zero.is_zero());
        assert_eq!(zero.evaluate(3), Scalar::zero());
        assert_eq!(zero.integral(), Scalar::zero());
        assert_eq!(zero.to_string(), "f(x) = 0");
        assert!(zero.convolve(&uniform()).unwrap().is_zero());
    }

    #[test]
    fn test_composition_matches_evaluation() {
        let f = uniform();
        let shift = p(vec![-1, 1]);
        let Composed::Function(g) = f.compose(&shift).unwrap() else {
            panic!("expected a function");
        };
        for x in [-1.0, -0.5, 0.0, 0.5, 1.0, 1.5, 2.0] {
            let inner = shift.evaluate_scalar(&Scalar::from(x)).unwrap();
            assert_eq!(g.evaluate(x), f.evaluate(inner), "x = {}", x);
        }
    }

    #[test]
    fn test_arithmetic_renderings() {
        let f = PiecewisePolynomialFunction::from_pairs(vec![(p(vec![0, 1]), 0, 1)]).unwrap();
        let render = |g: PiecewisePolynomialFunction| g.to_string();
        assert_eq!(render(&f + 1i64), "f(x) =\n  x + 1, x in [0,1]\n  0, else");
        assert_eq!(render(&f + &f), "f(x) =\n  2x, x in [0,1]\n  0, else");
        assert_eq!(render(-&f), "f(x) =\n  -x, x in [0,1]\n  0, else");
        assert_eq!(render(&f - 1i64), "f(x) =\n  x - 1, x in [0,1]\n  0, else");
        assert_eq!(render(2i64 * f.clone() - &f), "f(x) =\n  x, x in [0,1]\n  0, else");
        assert_eq!(render(1i64 - f.clone()), "f(x) =\n  -x + 1, x in [0,1]\n  0, else");
        assert_eq!(render(&f * &f), "f(x) =\n  x^2, x in [0,1]\n  0, else");
        assert_eq!(render(f.try_div(2i64).unwrap()), "f(x) =\n  1/2x, x in [0,1]\n  0, else");
    }

    #[test]
    fn test_convolve_all_matches_left_fold() {
        let mut rng = StdRng::seed_from_u64(41);
        let functions: Vec<PiecewisePolynomialFunction> =
            (0..5).map(|_| random_function(&mut rng, 2)).collect();
        let tree = PiecewisePolynomialFunction::convolve_all(&functions).unwrap();
        let fold = PiecewisePolynomialFunction::convolve_all_sequential(&functions).unwrap();
        for _ in 0..20 {
            let x = Scalar::ratio(rng.random_range(-60..=60), 4).unwrap();
            assert_eq!(tree.evaluate(x.clone()), fold.evaluate(x.clone()), "x = {}", x);
        }
        let expected_mass = functions
            .iter()
            .fold(Scalar::one(), |acc, f| &acc * &f.integral());
        assert_eq!(tree.integral(), expected_mass);
        assert!(PiecewisePolynomialFunction::convolve_all(&[]).is_err());
        let single = PiecewisePolynomialFunction::convolve_all(&functions[..1]).unwrap();
        assert_eq!(single, functions[0]);
    }
}
