use std::fmt;
use std::mem;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::rc::Rc;

use num::rational::Ratio;
use num::{One, Zero};

/// Exact rational coefficients. The coefficients that occur in this derivation are tiny
/// (shape function values, averaging factors), so an `i64` ratio is more than sufficient.
pub type Rational = Ratio<i64>;

/// A named symbolic quantity.
///
/// The name is the LaTeX fragment that will be emitted verbatim for the symbol,
/// e.g. `u_{0}` or `\tilde{\nu}_\phi`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol {
    name: Rc<str>,
}

impl Symbol {
    pub fn new(name: impl Into<Rc<str>>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// An immutable symbolic expression.
///
/// Expressions are trees over exact rational constants, named symbols, n-ary sums and
/// products, integer powers and n-ary maxima. The `max` node is what lets the discrete
/// upwind operator be expressed in closed form.
///
/// Construction through the associated functions and the arithmetic operators performs
/// light normalization only: nested sums/products are flattened, rational constants are
/// folded and additive/multiplicative identities are eliminated. Full cancellation of
/// symbolic terms is the job of [`simplify`](crate::symbolic::simplify).
///
/// `Expr` implements [`Zero`], [`One`] and the closed arithmetic operators, so that it
/// can be used directly as the scalar type of `nalgebra` matrices. Element matrices in
/// this crate are ordinary `nalgebra` matrices with symbolic entries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Expr {
    Rational(Rational),
    Symbol(Symbol),
    Sum(Vec<Expr>),
    Product(Vec<Expr>),
    Pow(Box<Expr>, i32),
    Max(Vec<Expr>),
}

impl Expr {
    pub fn integer(value: i64) -> Self {
        Expr::Rational(Rational::from_integer(value))
    }

    /// An exact rational constant.
    ///
    /// # Panics
    ///
    /// Panics if `denom` is zero.
    pub fn rational(numer: i64, denom: i64) -> Self {
        Expr::Rational(Rational::new(numer, denom))
    }

    pub fn symbol(name: impl Into<Rc<str>>) -> Self {
        Expr::Symbol(Symbol::new(name))
    }

    /// The flattened sum of the given terms, with rational constants folded.
    pub fn sum(terms: Vec<Expr>) -> Self {
        let mut constant = Rational::zero();
        let mut rest = Vec::new();
        for term in terms {
            match term {
                Expr::Rational(r) => constant += r,
                Expr::Sum(inner) => {
                    for inner_term in inner {
                        match inner_term {
                            Expr::Rational(r) => constant += r,
                            other => rest.push(other),
                        }
                    }
                }
                other => rest.push(other),
            }
        }
        if !constant.is_zero() {
            rest.insert(0, Expr::Rational(constant));
        }
        match rest.len() {
            0 => Expr::zero(),
            1 => rest.pop().unwrap(),
            _ => Expr::Sum(rest),
        }
    }

    /// The flattened product of the given factors, with rational constants folded into
    /// a single leading coefficient. A zero coefficient annihilates the product.
    pub fn product(factors: Vec<Expr>) -> Self {
        let mut coefficient = Rational::one();
        let mut rest = Vec::new();
        for factor in factors {
            match factor {
                Expr::Rational(r) => coefficient *= r,
                Expr::Product(inner) => {
                    for inner_factor in inner {
                        match inner_factor {
                            Expr::Rational(r) => coefficient *= r,
                            other => rest.push(other),
                        }
                    }
                }
                other => rest.push(other),
            }
        }
        if coefficient.is_zero() {
            return Expr::zero();
        }
        if rest.is_empty() {
            return Expr::Rational(coefficient);
        }
        if !coefficient.is_one() {
            rest.insert(0, Expr::Rational(coefficient));
        }
        match rest.len() {
            1 => rest.pop().unwrap(),
            _ => Expr::Product(rest),
        }
    }

    /// An integer power of the given base. Rational bases are evaluated exactly and
    /// nested powers have their exponents combined.
    ///
    /// # Panics
    ///
    /// Panics if `base` is the rational zero and `exponent` is negative.
    pub fn pow(base: Expr, exponent: i32) -> Self {
        match exponent {
            0 => Expr::one(),
            1 => base,
            _ => match base {
                Expr::Rational(r) => Expr::Rational(rational_pow(r, exponent)),
                Expr::Pow(inner, n) => Expr::pow(*inner, n * exponent),
                other => Expr::Pow(Box::new(other), exponent),
            },
        }
    }

    /// The pointwise maximum of the given arguments. Nested maxima are flattened,
    /// rational arguments are folded and duplicates removed; the symbolic arguments are
    /// kept in a deterministic order.
    ///
    /// # Panics
    ///
    /// Panics if `args` is empty.
    pub fn max(args: Vec<Expr>) -> Self {
        assert!(!args.is_empty(), "max requires at least one argument");
        let mut constant: Option<Rational> = None;
        let mut rest: Vec<Expr> = Vec::new();
        let fold = |arg: Expr, constant: &mut Option<Rational>, rest: &mut Vec<Expr>| {
            match arg {
                Expr::Rational(r) => {
                    *constant = Some(match constant.take() {
                        Some(c) => c.max(r),
                        None => r,
                    })
                }
                other => {
                    if !rest.contains(&other) {
                        rest.push(other);
                    }
                }
            }
        };
        for arg in args {
            match arg {
                Expr::Max(inner) => {
                    for inner_arg in inner {
                        fold(inner_arg, &mut constant, &mut rest);
                    }
                }
                other => fold(other, &mut constant, &mut rest),
            }
        }
        rest.sort();
        if let Some(c) = constant {
            rest.insert(0, Expr::Rational(c));
        }
        match rest.len() {
            1 => rest.pop().unwrap(),
            _ => Expr::Max(rest),
        }
    }

    /// The multiplicative inverse, `self^{-1}`.
    pub fn recip(self) -> Self {
        Expr::pow(self, -1)
    }

    pub fn as_rational(&self) -> Option<Rational> {
        match self {
            Expr::Rational(r) => Some(*r),
            _ => None,
        }
    }
}

fn rational_pow(base: Rational, exponent: i32) -> Rational {
    let positive = if exponent < 0 {
        assert!(!base.is_zero(), "zero cannot be raised to a negative power");
        base.recip()
    } else {
        base
    };
    let mut result = Rational::one();
    for _ in 0..exponent.unsigned_abs() {
        result *= positive;
    }
    result
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::integer(value)
    }
}

impl From<Rational> for Expr {
    fn from(value: Rational) -> Self {
        Expr::Rational(value)
    }
}

impl Default for Expr {
    fn default() -> Self {
        Expr::zero()
    }
}

impl Zero for Expr {
    fn zero() -> Self {
        Expr::Rational(Rational::zero())
    }

    fn is_zero(&self) -> bool {
        matches!(self, Expr::Rational(r) if r.is_zero())
    }
}

impl One for Expr {
    fn one() -> Self {
        Expr::Rational(Rational::one())
    }

    fn is_one(&self) -> bool {
        matches!(self, Expr::Rational(r) if r.is_one())
    }
}

impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        Expr::sum(vec![self, rhs])
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        Expr::sum(vec![self, -rhs])
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        Expr::product(vec![self, rhs])
    }
}

impl Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Expr) -> Expr {
        Expr::product(vec![self, rhs.recip()])
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::product(vec![Expr::integer(-1), self])
    }
}

impl AddAssign for Expr {
    fn add_assign(&mut self, rhs: Expr) {
        *self = mem::take(self) + rhs;
    }
}

impl SubAssign for Expr {
    fn sub_assign(&mut self, rhs: Expr) {
        *self = mem::take(self) - rhs;
    }
}

impl MulAssign for Expr {
    fn mul_assign(&mut self, rhs: Expr) {
        *self = mem::take(self) * rhs;
    }
}

impl DivAssign for Expr {
    fn div_assign(&mut self, rhs: Expr) {
        *self = mem::take(self) / rhs;
    }
}
