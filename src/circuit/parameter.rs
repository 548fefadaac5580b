//! Symbolic angle expressions for parameterized circuits.
//!
//! Feature maps encode classical data as gate angles. An expression refers
//! to input features by index (`Feature(k)` is the k-th entry of the bound
//! parameter vector), so evaluation against a sample is a direct lookup
//! rather than a name resolution.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A symbolic or concrete angle expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamExpr {
    /// A constant numeric value.
    Constant(f64),
    /// The constant π.
    Pi,
    /// The feature at the given index of the bound parameter vector.
    Feature(usize),
    /// Negation.
    Neg(Box<ParamExpr>),
    /// Addition.
    Add(Box<ParamExpr>, Box<ParamExpr>),
    /// Subtraction.
    Sub(Box<ParamExpr>, Box<ParamExpr>),
    /// Multiplication.
    Mul(Box<ParamExpr>, Box<ParamExpr>),
}

impl ParamExpr {
    pub fn constant(value: f64) -> Self {
        ParamExpr::Constant(value)
    }

    pub fn feature(index: usize) -> Self {
        ParamExpr::Feature(index)
    }

    /// `scale * expr`, the most common composite in feature maps.
    pub fn scaled(scale: f64, expr: ParamExpr) -> Self {
        ParamExpr::Mul(Box::new(ParamExpr::Constant(scale)), Box::new(expr))
    }

    /// `lhs * rhs`.
    pub fn product(lhs: ParamExpr, rhs: ParamExpr) -> Self {
        ParamExpr::Mul(Box::new(lhs), Box::new(rhs))
    }

    /// `π - Feature(index)`, the default data map for weight-2 Pauli blocks.
    pub fn pi_minus_feature(index: usize) -> Self {
        ParamExpr::Sub(Box::new(ParamExpr::Pi), Box::new(ParamExpr::Feature(index)))
    }

    /// True if the expression depends on any feature.
    pub fn is_symbolic(&self) -> bool {
        match self {
            ParamExpr::Feature(_) => true,
            ParamExpr::Constant(_) | ParamExpr::Pi => false,
            ParamExpr::Neg(e) => e.is_symbolic(),
            ParamExpr::Add(a, b) | ParamExpr::Sub(a, b) | ParamExpr::Mul(a, b) => {
                a.is_symbolic() || b.is_symbolic()
            }
        }
    }

    /// Largest feature index referenced, if any.
    pub fn max_feature(&self) -> Option<usize> {
        match self {
            ParamExpr::Feature(k) => Some(*k),
            ParamExpr::Constant(_) | ParamExpr::Pi => None,
            ParamExpr::Neg(e) => e.max_feature(),
            ParamExpr::Add(a, b) | ParamExpr::Sub(a, b) | ParamExpr::Mul(a, b) => {
                match (a.max_feature(), b.max_feature()) {
                    (Some(x), Some(y)) => Some(x.max(y)),
                    (x, y) => x.or(y),
                }
            }
        }
    }

    /// Evaluate against a bound parameter vector.
    ///
    /// Panics if a referenced feature index is out of range; `Circuit::bind`
    /// validates the vector length before evaluation.
    pub fn eval(&self, params: &[f64]) -> f64 {
        match self {
            ParamExpr::Constant(v) => *v,
            ParamExpr::Pi => PI,
            ParamExpr::Feature(k) => params[*k],
            ParamExpr::Neg(e) => -e.eval(params),
            ParamExpr::Add(a, b) => a.eval(params) + b.eval(params),
            ParamExpr::Sub(a, b) => a.eval(params) - b.eval(params),
            ParamExpr::Mul(a, b) => a.eval(params) * b.eval(params),
        }
    }

    /// Replace every feature reference with its bound value, returning a
    /// constant expression tree.
    pub fn bind(&self, params: &[f64]) -> ParamExpr {
        match self {
            ParamExpr::Feature(k) => ParamExpr::Constant(params[*k]),
            ParamExpr::Constant(_) | ParamExpr::Pi => self.clone(),
            ParamExpr::Neg(e) => ParamExpr::Neg(Box::new(e.bind(params))),
            ParamExpr::Add(a, b) => {
                ParamExpr::Add(Box::new(a.bind(params)), Box::new(b.bind(params)))
            }
            ParamExpr::Sub(a, b) => {
                ParamExpr::Sub(Box::new(a.bind(params)), Box::new(b.bind(params)))
            }
            ParamExpr::Mul(a, b) => {
                ParamExpr::Mul(Box::new(a.bind(params)), Box::new(b.bind(params)))
            }
        }
    }
}

impl fmt::Display for ParamExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamExpr::Constant(v) => write!(f, "{}", v),
            ParamExpr::Pi => write!(f, "pi"),
            ParamExpr::Feature(k) => write!(f, "x[{}]", k),
            ParamExpr::Neg(e) => write!(f, "-({})", e),
            ParamExpr::Add(a, b) => write!(f, "({} + {})", a, b),
            ParamExpr::Sub(a, b) => write!(f, "({} - {})", a, b),
            ParamExpr::Mul(a, b) => write!(f, "({} * {})", a, b),
        }
    }
}
