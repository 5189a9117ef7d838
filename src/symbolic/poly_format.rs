//! # Rendering polynomials as text
//!
//! `Display` renders with [`FormatOptions::default`]: descending powers, implicit multiplication,
//! `^` for powers and spaces around `+`/`-`, e.g. `x^2 - 1/2x + 3`. Nested coefficients are
//! parenthesized when they are sums: `(x + 1)y^2 - y`.
use crate::symbolic::polynomial::{Coefficient, Polynomial};
use crate::symbolic::scalar::Scalar;
use std::fmt;
use strum_macros::{Display, EnumString};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum TermOrder {
    Ascending,
    #[default]
    Descending,
}

/// Options of [`Polynomial::format`].
#[derive(Clone, Debug, PartialEq)]
pub struct FormatOptions {
    /// decimals shown for floating coefficients (6 when unset); display only
    pub coeff_prec: Option<usize>,
    pub op_mul: String,
    pub op_pow: String,
    pub term_order: TermOrder,
    pub term_sep: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            coeff_prec: None,
            op_mul: String::new(),
            op_pow: "^".to_string(),
            term_order: TermOrder::Descending,
            term_sep: " ".to_string(),
        }
    }
}

impl FormatOptions {
    pub fn with_precision(mut self, prec: usize) -> Self {
        self.coeff_prec = Some(prec);
        self
    }

    pub fn with_mul_op(mut self, op: &str) -> Self {
        self.op_mul = op.to_string();
        self
    }

    pub fn with_pow_op(mut self, op: &str) -> Self {
        self.op_pow = op.to_string();
        self
    }

    pub fn with_term_order(mut self, order: TermOrder) -> Self {
        self.term_order = order;
        self
    }

    pub fn with_term_sep(mut self, sep: &str) -> Self {
        self.term_sep = sep.to_string();
        self
    }
}

/// Shortest decimal form of a float with at most `prec` decimals.
///
/// With `signed_zero`, a nonzero value that rounds to zero shows as `0.` or `-0.`.
pub fn float_repr(c: f64, prec: Option<usize>, signed_zero: bool) -> String {
    let mut repr = format!("{:.*}", prec.unwrap_or(6), c);
    if repr.contains('.') {
        let trimmed = repr.trim_end_matches('0').trim_end_matches('.').len();
        repr.truncate(trimmed);
    }
    if repr == "-0" {
        repr = "0".to_string();
    }
    if signed_zero && c != 0.0 && repr == "0" {
        repr = if c > 0.0 { "0." } else { "-0." }.to_string();
    }
    repr
}

fn coeff_repr(c: &Coefficient, opts: &FormatOptions, signed_zero: bool) -> String {
    match c {
        Coefficient::Nested(p) => p.format(opts),
        Coefficient::Scalar(Scalar::Exact(r)) => r.to_string(),
        Coefficient::Scalar(Scalar::Approx(f)) => float_repr(*f, opts.coeff_prec, signed_zero),
    }
}

/// everything after the first character
fn tail(s: &str) -> &str {
    let mut chars = s.chars();
    chars.next();
    chars.as_str()
}

fn has_sum(s: &str) -> bool {
    s.contains('+') || s.contains('-')
}

impl Polynomial {
    pub fn format(&self, opts: &FormatOptions) -> String {
        let n = self.coeffs.len();
        let powers: Vec<usize> = match opts.term_order {
            TermOrder::Ascending => (0..n).collect(),
            TermOrder::Descending => (0..n).rev().collect(),
        };
        let highest = n.checked_sub(1);
        let mut out = String::new();
        for i in powers {
            let ci = &self.coeffs[i];
            let nested = matches!(ci, Coefficient::Nested(_));
            let mut repr = coeff_repr(ci, opts, Some(i) == highest);
            if repr == "0" {
                continue;
            }
            let mut coeff_shown = false;
            if !out.is_empty() {
                let extract_minus = repr.starts_with('-') && (!nested || !has_sum(tail(&repr)));
                if extract_minus {
                    repr = tail(&repr).to_string();
                }
                out.push_str(&opts.term_sep);
                out.push(if extract_minus { '-' } else { '+' });
                out.push_str(&opts.term_sep);
                if repr != "1" || i == 0 {
                    let parenthesize = nested
                        && !extract_minus
                        && has_sum(&repr)
                        && (i > 0 || repr.starts_with('-'));
                    if parenthesize {
                        out.push_str(&format!("({})", repr));
                    } else {
                        out.push_str(&repr);
                    }
                    coeff_shown = true;
                }
            } else if repr != "1" || i == 0 {
                if nested && (repr.contains('+') || tail(&repr).contains('-')) && i > 0 {
                    out = format!("({})", repr);
                    coeff_shown = true;
                } else if repr == "-1" && i > 0 {
                    out = "-".to_string();
                } else {
                    out = repr;
                    coeff_shown = true;
                }
            }
            if i > 0 {
                if coeff_shown {
                    out.push_str(&opts.op_mul);
                }
                out.push_str(&self.var);
                if i > 1 {
                    out.push_str(&format!("{}{}", opts.op_pow, i));
                }
            }
        }
        if out.is_empty() { "0".to_string() } else { out }
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.format(&FormatOptions::default()))
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", coeff_repr(self, &FormatOptions::default(), false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn p(coeffs: Vec<i64>) -> Polynomial {
        Polynomial::from_vec(coeffs)
    }

    #[test]
    fn test_float_repr() {
        assert_eq!(float_repr(1.0, None, false), "1");
        assert_eq!(float_repr(0.999, None, false), "0.999");
        assert_eq!(float_repr(0.999, Some(2), false), "1");
        assert_eq!(float_repr(-0.0000001, None, false), "0");
        assert_eq!(float_repr(0.0000001, None, true), "0.");
        assert_eq!(float_repr(-0.0000001, None, true), "-0.");
    }

    #[test]
    fn test_format_defaults() {
        assert_eq!(Polynomial::zero().to_string(), "0");
        assert_eq!(p(vec![-1]).to_string(), "-1");
        assert_eq!(p(vec![0, 1]).to_string(), "x");
        assert_eq!(p(vec![0, -1]).to_string(), "-x");
        assert_eq!(p(vec![0, 2]).to_string(), "2x");
        assert_eq!(p(vec![1, 2]).to_string(), "2x + 1");
        assert_eq!(p(vec![1, 0, 1]).to_string(), "x^2 + 1");
        assert_eq!(p(vec![-1, -1, -1]).to_string(), "-x^2 - x - 1");
        assert_eq!(p(vec![-1, 1]).to_string(), "x - 1");
        assert_eq!(Polynomial::from_vec(vec![1.0]).to_string(), "1");
        assert_eq!(Polynomial::from_vec(vec![0.0, -1.0]).to_string(), "-x");
        assert_eq!(Polynomial::with_var(vec![2, 0, -2], "y").unwrap().to_string(), "-2y^2 + 2");
        let half = Polynomial::from_vec(vec![Scalar::ratio(-1, 2).unwrap(), Scalar::one()]);
        assert_eq!(half.to_string(), "x - 1/2");
    }

    #[test]
    fn test_format_options() {
        let opts = FormatOptions::default().with_precision(3);
        assert_eq!(Polynomial::from_vec(vec![0.0001, 0.9999]).format(&opts), "x");
        let opts = FormatOptions::default().with_mul_op("*");
        assert_eq!(p(vec![2, 2, -1]).format(&opts), "-x^2 + 2*x + 2");
        let opts = FormatOptions::default().with_pow_op("**");
        assert_eq!(p(vec![2, 0, -1]).format(&opts), "-x**2 + 2");
        let opts = FormatOptions::default().with_term_order(TermOrder::Ascending);
        assert_eq!(p(vec![-1, 0, -1]).format(&opts), "-1 - x^2");
        let opts = FormatOptions::default().with_term_sep("");
        assert_eq!(p(vec![2, 0, -2]).format(&opts), "-2x^2+2");
    }

    #[test]
    fn test_format_nested() {
        let x = Polynomial::symbol("x").unwrap();
        let y = Polynomial::symbol("y").unwrap();
        assert_eq!((&x * &y * 2).to_string(), "2xy");
        assert_eq!((&x + &y).to_string(), "y + x");
        assert_eq!(((&x + &y) * (&x - &y)).to_string(), "-y^2 + x^2");
        assert_eq!((&x + &y).pow(2).to_string(), "y^2 + 2xy + x^2");
        assert_eq!((&(&x + 1) * &y.pow(2) - &y).to_string(), "(x + 1)y^2 - y");
    }

    #[test]
    fn test_term_order_from_text() {
        assert_eq!(TermOrder::from_str("ascending").unwrap(), TermOrder::Ascending);
        assert_eq!(TermOrder::Descending.to_string(), "descending");
        assert!(TermOrder::from_str("sideways").is_err());
    }
}
