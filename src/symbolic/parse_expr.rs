//! a module turns a String expression into a polynomial
//!# Example
//! ```
//! use RustedPolyPieces::symbolic::polynomial::Polynomial;
//! let p = Polynomial::parse("(x+y)^2").unwrap();
//! assert_eq!(p.to_string(), "y^2 + 2xy + x^2");
//! let q = Polynomial::parse("3x^2 - 1/4").unwrap();
//! assert_eq!(q.to_string(), "3x^2 - 1/4");
//! ```
//! Grammar (usual precedence, `^` and `**` are right associative):
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := unary (('*' | '/') unary | power)*      second form: implicit multiplication
//! unary      := ('-' | '+') unary | power
//! power      := atom (('^' | '**') unary)?
//! atom       := number | variable | '(' expression ')'
//! ```
//! Integer literals are exact, decimal literals (`0.25`) are floats, so `1/4` stays the exact
//! fraction. Implicit multiplication applies when a `(` or a letter follows a factor: `2xy`,
//! `(x+1)(x-1)`, `x (x+1)`. Without an explicit list, a variable is a letter followed by digits
//! (`x`, `y2`); with a list, the listed names are matched longest first so `xy` can be a name.
use crate::errors::{PolyError, PolyResult};
use crate::symbolic::polynomial::{DEFAULT_VAR, Polynomial};
use crate::symbolic::scalar::Scalar;
use log::debug;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit0, digit1, multispace0, satisfy},
    combinator::{all_consuming, map_res, opt, recognize},
    error::{Error, ErrorKind},
    sequence::{delimited, pair, preceded},
};
use num::BigInt;
use std::str::FromStr;

/// Parsed expression before it is turned into a polynomial.
#[derive(Clone, Debug, PartialEq)]
pub enum PolyExpr {
    Number(Scalar),
    Var(String),
    Neg(Box<PolyExpr>),
    Add(Box<PolyExpr>, Box<PolyExpr>),
    Sub(Box<PolyExpr>, Box<PolyExpr>),
    Mul(Box<PolyExpr>, Box<PolyExpr>),
    Div(Box<PolyExpr>, Box<PolyExpr>),
    Pow(Box<PolyExpr>, Box<PolyExpr>),
}

fn number(input: &str) -> IResult<&str, PolyExpr> {
    let literal = recognize(alt((
        recognize(pair(digit1, opt(pair(char('.'), digit0)))),
        recognize(pair(char('.'), digit1)),
    )));
    map_res(literal, |s: &str| -> Result<PolyExpr, String> {
        if s.contains('.') {
            let v = s.parse::<f64>().map_err(|e| e.to_string())?;
            Ok(PolyExpr::Number(Scalar::Approx(v)))
        } else {
            let v = s.parse::<BigInt>().map_err(|e| e.to_string())?;
            Ok(PolyExpr::Number(Scalar::from(v)))
        }
    })
    .parse(input)
}

fn additive_op(input: &str) -> IResult<&str, char> {
    preceded(multispace0, alt((char('+'), char('-')))).parse(input)
}

fn multiplicative_op(input: &str) -> IResult<&str, char> {
    preceded(multispace0, alt((char('*'), char('/')))).parse(input)
}

fn power_op(input: &str) -> IResult<&str, &str> {
    delimited(multispace0, alt((tag("**"), tag("^"))), multispace0).parse(input)
}

fn starts_factor(input: &str) -> bool {
    input
        .chars()
        .next()
        .is_some_and(|c| c == '(' || c.is_alphabetic())
}

struct ExprParser {
    /// explicit variable names, longest first
    vars: Option<Vec<String>>,
}

impl ExprParser {
    fn new(vars: Option<&[&str]>) -> Self {
        let vars = vars.map(|names| {
            let mut names: Vec<String> = names.iter().map(|n| n.trim().to_string()).collect();
            names.sort_by(|a, b| b.len().cmp(&a.len()));
            names
        });
        ExprParser { vars }
    }

    fn variable<'a>(&self, input: &'a str) -> IResult<&'a str, PolyExpr> {
        match &self.vars {
            Some(names) => names
                .iter()
                .filter(|n| !n.is_empty())
                .find_map(|n| {
                    input
                        .strip_prefix(n.as_str())
                        .map(|rest| (rest, PolyExpr::Var(n.clone())))
                })
                .ok_or_else(|| nom::Err::Error(Error::new(input, ErrorKind::Tag))),
            None => {
                let (rest, name) =
                    recognize(pair(satisfy(|c: char| c.is_alphabetic()), digit0)).parse(input)?;
                Ok((rest, PolyExpr::Var(name.to_string())))
            }
        }
    }

    fn parenthesized<'a>(&self, input: &'a str) -> IResult<&'a str, PolyExpr> {
        delimited(
            char('('),
            |i: &'a str| self.expression(i),
            preceded(multispace0, char(')')),
        )
        .parse(input)
    }

    fn atom<'a>(&self, input: &'a str) -> IResult<&'a str, PolyExpr> {
        let (input, _) = multispace0(input)?;
        alt((
            number,
            |i: &'a str| self.variable(i),
            |i: &'a str| self.parenthesized(i),
        ))
        .parse(input)
    }

    fn power<'a>(&self, input: &'a str) -> IResult<&'a str, PolyExpr> {
        let (input, base) = self.atom(input)?;
        let (input, exponent) = opt(preceded(power_op, |i: &'a str| self.unary(i))).parse(input)?;
        let expr = match exponent {
            Some(e) => PolyExpr::Pow(Box::new(base), Box::new(e)),
            None => base,
        };
        Ok((input, expr))
    }

    fn unary<'a>(&self, input: &'a str) -> IResult<&'a str, PolyExpr> {
        let (input, _) = multispace0(input)?;
        if let Some(rest) = input.strip_prefix('-') {
            let (rest, e) = self.unary(rest)?;
            return Ok((rest, PolyExpr::Neg(Box::new(e))));
        }
        if let Some(rest) = input.strip_prefix('+') {
            return self.unary(rest);
        }
        self.power(input)
    }

    fn term<'a>(&self, input: &'a str) -> IResult<&'a str, PolyExpr> {
        let (mut input, mut acc) = self.unary(input)?;
        loop {
            if let Ok((rest, op)) = multiplicative_op(input) {
                let (rest, rhs) = self.unary(rest)?;
                acc = match op {
                    '*' => PolyExpr::Mul(Box::new(acc), Box::new(rhs)),
                    _ => PolyExpr::Div(Box::new(acc), Box::new(rhs)),
                };
                input = rest;
                continue;
            }
            let (rest, _) = multispace0(input)?;
            if starts_factor(rest) {
                let (rest, rhs) = self.power(rest)?;
                acc = PolyExpr::Mul(Box::new(acc), Box::new(rhs));
                input = rest;
                continue;
            }
            return Ok((input, acc));
        }
    }

    fn expression<'a>(&self, input: &'a str) -> IResult<&'a str, PolyExpr> {
        let (mut input, mut acc) = self.term(input)?;
        while let Ok((rest, op)) = additive_op(input) {
            let (rest, rhs) = self.term(rest)?;
            acc = match op {
                '+' => PolyExpr::Add(Box::new(acc), Box::new(rhs)),
                _ => PolyExpr::Sub(Box::new(acc), Box::new(rhs)),
            };
            input = rest;
        }
        Ok((input, acc))
    }
}

/// Parses the whole input into an expression tree.
pub fn parse_expression_func<'a>(input: &'a str, vars: Option<&[&str]>) -> PolyResult<PolyExpr> {
    let parser = ExprParser::new(vars);
    let (_, expr) = all_consuming(delimited(
        multispace0,
        |i: &'a str| parser.expression(i),
        multispace0,
    ))
    .parse(input)
    .map_err(|e| PolyError::construction(format!("cannot parse '{}': {}", input, e)))?;
    Ok(expr)
}

impl PolyExpr {
    /// variable names in order of first appearance
    pub fn variables(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables(&self, names: &mut Vec<String>) {
        match self {
            PolyExpr::Number(_) => {}
            PolyExpr::Var(name) => {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
            PolyExpr::Neg(e) => e.collect_variables(names),
            PolyExpr::Add(a, b)
            | PolyExpr::Sub(a, b)
            | PolyExpr::Mul(a, b)
            | PolyExpr::Div(a, b)
            | PolyExpr::Pow(a, b) => {
                a.collect_variables(names);
                b.collect_variables(names);
            }
        }
    }

    pub fn to_polynomial(&self) -> PolyResult<Polynomial> {
        let p = match self {
            PolyExpr::Number(s) => Polynomial::constant(s.clone()),
            PolyExpr::Var(name) => Polynomial::symbol(name)?,
            PolyExpr::Neg(e) => -e.to_polynomial()?,
            PolyExpr::Add(a, b) => a.to_polynomial()? + b.to_polynomial()?,
            PolyExpr::Sub(a, b) => a.to_polynomial()? - b.to_polynomial()?,
            PolyExpr::Mul(a, b) => a.to_polynomial()? * b.to_polynomial()?,
            PolyExpr::Div(a, b) => {
                let divisor = b.to_polynomial()?;
                let c = divisor.constant_value().ok_or_else(|| {
                    PolyError::construction(format!(
                        "division by the non-constant '{}' is not a polynomial",
                        divisor
                    ))
                })?;
                a.to_polynomial()?.div_scalar(&c)?
            }
            PolyExpr::Pow(a, b) => {
                let exponent = b.to_polynomial()?;
                let n = exponent
                    .constant_value()
                    .and_then(|c| c.to_u32())
                    .ok_or_else(|| {
                        PolyError::construction(format!(
                            "exponent must be a non-negative integer, '{}' given",
                            exponent
                        ))
                    })?;
                a.to_polynomial()?.pow(n)
            }
        };
        Ok(p)
    }
}

impl Polynomial {
    /// Polynomial from an expression string, variables inferred from the text.
    ///
    /// # Errors
    /// `Construction` for unparseable text, division by a non-constant, or a non-integer
    /// exponent; `Domain` for a division by zero.
    pub fn parse(expr: &str) -> PolyResult<Polynomial> {
        Polynomial::parse_impl(expr, None)
    }

    /// Same as [`Polynomial::parse`] with an explicit list of variable names; multi-letter
    /// names such as `"xy"` are recognised. A constant result uses the first listed name.
    pub fn parse_with_vars(expr: &str, vars: &[&str]) -> PolyResult<Polynomial> {
        Polynomial::parse_impl(expr, Some(vars))
    }

    fn parse_impl(expr: &str, vars: Option<&[&str]>) -> PolyResult<Polynomial> {
        debug!("parsing polynomial expression '{}'", expr);
        let tree = parse_expression_func(expr, vars)?;
        let p = tree.to_polynomial()?;
        match p.constant_value() {
            Some(c) => {
                let var = match vars {
                    Some(names) => names.first().map(|n| n.to_string()),
                    None => tree.variables().into_iter().next(),
                }
                .unwrap_or_else(|| DEFAULT_VAR.to_string());
                Ok(Polynomial::with_var(vec![c], &var)?)
            }
            None => Ok(p),
        }
    }
}

impl FromStr for Polynomial {
    type Err = PolyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Polynomial::parse(s)
    }
}
