use std::fmt;

use nalgebra::storage::RawStorage;
use nalgebra::{Dim, Matrix};

use crate::symbolic::{Expr, Rational};

/// Renders the expression as a LaTeX fragment.
///
/// Symbols are emitted verbatim (their names are LaTeX), rationals as integers or
/// `\frac{p}{q}`, products by juxtaposition and maxima as `\max\left(…\right)`.
pub fn latex(expr: &Expr) -> String {
    expr.to_string()
}

/// Renders the matrix as a LaTeX `bmatrix` environment.
pub fn latex_matrix<R, C, S>(matrix: &Matrix<Expr, R, C, S>) -> String
where
    R: Dim,
    C: Dim,
    S: RawStorage<Expr, R, C>,
{
    let mut out = String::from("\\begin{bmatrix}\n");
    for i in 0..matrix.nrows() {
        for j in 0..matrix.ncols() {
            if j > 0 {
                out.push_str(" & ");
            }
            out.push_str(&matrix[(i, j)].to_string());
        }
        out.push_str(if i + 1 < matrix.nrows() { " \\\\\n" } else { "\n" });
    }
    out.push_str("\\end{bmatrix}");
    out
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
enum Precedence {
    Sum,
    Product,
    Power,
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_expr(f, self, Precedence::Sum)
    }
}

fn write_expr(f: &mut fmt::Formatter<'_>, expr: &Expr, enclosing: Precedence) -> fmt::Result {
    match expr {
        Expr::Rational(r) => write_rational(f, r),
        Expr::Symbol(s) => write!(f, "{}", s.name()),
        Expr::Sum(terms) => {
            let parenthesize = enclosing > Precedence::Sum;
            if parenthesize {
                write!(f, "\\left(")?;
            }
            for (i, term) in terms.iter().enumerate() {
                match split_negative(term) {
                    Some(magnitude) => {
                        write!(f, "{}", if i == 0 { "-" } else { " - " })?;
                        write_expr(f, &magnitude, Precedence::Product)?;
                    }
                    None => {
                        if i > 0 {
                            write!(f, " + ")?;
                        }
                        write_expr(f, term, Precedence::Product)?;
                    }
                }
            }
            if parenthesize {
                write!(f, "\\right)")?;
            }
            Ok(())
        }
        Expr::Product(factors) => {
            let parenthesize = enclosing > Precedence::Product;
            if parenthesize {
                write!(f, "\\left(")?;
            }
            let mut first = true;
            for factor in factors {
                match factor {
                    // A rational factor can only be the leading coefficient.
                    Expr::Rational(r) if *r == -Rational::from_integer(1) => {
                        write!(f, "-")?;
                        continue;
                    }
                    Expr::Rational(r) => {
                        write_rational(f, r)?;
                        first = false;
                        continue;
                    }
                    _ => {}
                }
                if !first {
                    write!(f, " ")?;
                }
                write_expr(f, factor, Precedence::Product)?;
                first = false;
            }
            if parenthesize {
                write!(f, "\\right)")?;
            }
            Ok(())
        }
        Expr::Pow(base, exponent) => {
            write_expr(f, base, Precedence::Power)?;
            write!(f, "^{{{}}}", exponent)
        }
        Expr::Max(args) => {
            write!(f, "\\max\\left(")?;
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write_expr(f, arg, Precedence::Sum)?;
            }
            write!(f, "\\right)")
        }
    }
}

fn write_rational(f: &mut fmt::Formatter<'_>, r: &Rational) -> fmt::Result {
    if r.is_integer() {
        write!(f, "{}", r.numer())
    } else if r.numer() < &0 {
        write!(f, "-\\frac{{{}}}{{{}}}", -r.numer(), r.denom())
    } else {
        write!(f, "\\frac{{{}}}{{{}}}", r.numer(), r.denom())
    }
}

/// Splits off a leading negative sign: returns the term's magnitude if the term is a
/// negative rational or a product with a negative rational coefficient.
fn split_negative(term: &Expr) -> Option<Expr> {
    match term {
        Expr::Rational(r) if r < &Rational::from_integer(0) => Some(Expr::Rational(-*r)),
        Expr::Product(factors) => match factors.first() {
            Some(Expr::Rational(r)) if r < &Rational::from_integer(0) => {
                let mut magnitude = vec![Expr::Rational(-*r)];
                magnitude.extend(factors[1..].iter().cloned());
                Some(Expr::product(magnitude))
            }
            _ => None,
        },
        _ => None,
    }
}
