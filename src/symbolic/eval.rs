use eyre::bail;
use rustc_hash::FxHashMap;

use crate::symbolic::Expr;

impl Expr {
    /// Evaluates the expression numerically against the given symbol bindings.
    ///
    /// This exists for diagnostics and as a test oracle: symbolic identities in this
    /// crate are verified by sampling. Returns an error if the expression contains a
    /// symbol with no binding.
    pub fn eval(&self, bindings: &FxHashMap<&str, f64>) -> eyre::Result<f64> {
        match self {
            Expr::Rational(r) => Ok(*r.numer() as f64 / *r.denom() as f64),
            Expr::Symbol(s) => match bindings.get(s.name()) {
                Some(value) => Ok(*value),
                None => bail!("no binding for symbol `{}`", s.name()),
            },
            Expr::Sum(terms) => {
                let mut sum = 0.0;
                for term in terms {
                    sum += term.eval(bindings)?;
                }
                Ok(sum)
            }
            Expr::Product(factors) => {
                let mut product = 1.0;
                for factor in factors {
                    product *= factor.eval(bindings)?;
                }
                Ok(product)
            }
            Expr::Pow(base, exponent) => Ok(base.eval(bindings)?.powi(*exponent)),
            Expr::Max(args) => {
                let mut max = f64::NEG_INFINITY;
                for arg in args {
                    max = max.max(arg.eval(bindings)?);
                }
                Ok(max)
            }
        }
    }
}
