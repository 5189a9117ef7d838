use crate::errors::PolyError;
use crate::symbolic::poly_arithmetic::PolyOperand;
use crate::symbolic::polynomial::{Coefficient, Polynomial};
use crate::symbolic::scalar::Scalar;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
//___________________________________TESTS____________________________________

#[cfg(test)]
mod tests {
    use super::*;

    fn random_scalar(rng: &mut StdRng) -> Scalar {
        let n: i64 = rng.random_range(-9..=9);
        let d: i64 = rng.random_range(1..=4);
        Scalar::ratio(n, d).unwrap()
    }

    fn random_poly(rng: &mut StdRng, var: &str, max_degree: usize) -> Polynomial {
        let degree = rng.random_range(0..=max_degree);
        let coeffs: Vec<Scalar> = (0..=degree).map(|_| random_scalar(rng)).collect();
        Polynomial::with_var(coeffs, var).unwrap()
    }

    /// polynomial in y with random polynomial coefficients in x
    fn random_bivariate(rng: &mut StdRng) -> Polynomial {
        let y = Polynomial::symbol("y").unwrap();
        let mut p = Polynomial::zero();
        for k in 0..3 {
            p += random_poly(rng, "x", 2) * y.pow(k);
        }
        p
    }

    #[test]
    fn test_derivative_then_integral_drops_constant_term() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let p = random_poly(&mut rng, "x", 6);
            let round = p.derivative().indefinite_integral();
            assert!(round.coeff(0, None).is_zero());
            let c0 = p.coeff(0, None).as_scalar().cloned().unwrap_or_else(Scalar::zero);
            assert_eq!(round, &p - &c0, "p = {}", p);
        }
    }

    #[test]
    fn test_product_evaluates_as_product_of_values() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let p = random_poly(&mut rng, "x", 5);
            let q = random_poly(&mut rng, "x", 5);
            let pq = &p * &q;
            for _ in 0..5 {
                let x = random_scalar(&mut rng);
                let lhs = pq.evaluate_scalar(&x).unwrap();
                let rhs = &p.evaluate_scalar(&x).unwrap() * &q.evaluate_scalar(&x).unwrap();
                assert_eq!(lhs, rhs);
            }
        }
    }

    #[test]
    fn test_parse_format_round_trip() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let p = random_poly(&mut rng, "x", 5);
            let text = p.to_string();
            assert_eq!(Polynomial::parse(&text).unwrap(), p, "text = {}", text);
        }
        for _ in 0..30 {
            let p = random_bivariate(&mut rng);
            let text = p.to_string();
            assert_eq!(Polynomial::parse(&text).unwrap(), p, "text = {}", text);
        }
    }

    #[test]
    fn test_division_identity() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..30 {
            let p = random_poly(&mut rng, "x", 6);
            let mut d = random_poly(&mut rng, "x", 3);
            if d.is_zero() {
                d = Polynomial::from_vec(vec![1, 1]);
            }
            let (q, r) = p.divide(&d).unwrap();
            assert!(r.degree() < d.degree());
            assert_eq!(&(&q * &d) + &r, p);
        }
    }

    #[test]
    fn test_binomial_expansion() {
        let p = Polynomial::parse("(x+y)^3").unwrap();
        assert_eq!(p.to_string(), "y^3 + 3xy^2 + 3x^2y + x^3");
        assert_eq!(p.degree_in("x"), 3);
        assert_eq!(p.coeff(2, Some("x")), Coefficient::Nested(Polynomial::parse("3y").unwrap()));
        let q = Polynomial::parse("(x-1)^5").unwrap();
        assert_eq!(q.evaluate_scalar(&Scalar::one()), Some(Scalar::zero()));
        assert_eq!(q.derivative().evaluate_scalar(&Scalar::integer(3)), Some(Scalar::integer(80)));
    }

    #[test]
    fn test_substitution_is_consistent_with_evaluation() {
        let p = Polynomial::parse("x^2y + 3xy^2 - y + 2").unwrap();
        let mut subs = BTreeMap::new();
        subs.insert("x".to_string(), PolyOperand::Scalar(Scalar::integer(2)));
        subs.insert("y".to_string(), PolyOperand::Scalar(Scalar::ratio(1, 3).unwrap()));
        let v = p.compose_map(&subs);
        // 4/3 + 2/3 - 1/3 + 2
        assert_eq!(v, Polynomial::constant(Scalar::ratio(11, 3).unwrap()));
        // substituting y by a polynomial in x
        let mut subs = BTreeMap::new();
        subs.insert("y".to_string(), PolyOperand::Polynomial(Polynomial::parse("x+1").unwrap()));
        let in_x = p.compose_map(&subs);
        assert_eq!(in_x.all_var_names().len(), 1);
        assert_eq!(
            in_x.evaluate_scalar(&Scalar::integer(2)),
            Some(Scalar::integer(4 * 3 + 3 * 2 * 9 - 3 + 2))
        );
    }

    #[test]
    fn test_integral_with_polynomial_bounds() {
        // int_{x-1}^{x} t^2 dt = x^2 - x + 1/3
        let t2 = Polynomial::parse("x^2").unwrap();
        let lower = Polynomial::parse("x-1").unwrap();
        let upper = Polynomial::parse("x").unwrap();
        let v = t2.definite_integral(&lower, &upper);
        assert_eq!(v, Polynomial::parse("x^2 - x + 1/3").unwrap());
    }

    #[test]
    fn test_float_and_exact_mix() {
        let p = Polynomial::parse("0.5x + 1/2").unwrap();
        let v = p.evaluate_scalar(&Scalar::one()).unwrap();
        assert!(!v.is_exact());
        approx::assert_relative_eq!(v.to_f64(), 1.0);
        assert_eq!(p, Polynomial::parse("1/2x + 1/2").unwrap());
    }

    #[test]
    fn test_errors_are_typed() {
        let res = Polynomial::with_var(vec![1], "2x");
        assert!(matches!(res, Err(PolyError::Construction(_))));
        let x = Polynomial::symbol("x").unwrap();
        assert!(matches!(x.divide(&Polynomial::zero()), Err(PolyError::Domain(_))));
    }
}
