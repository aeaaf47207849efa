//! A minimal exact symbolic kernel, sized to what the element derivation needs.
//!
//! Expressions are trees over rational constants, named symbols, sums, products,
//! integer powers and maxima — there is deliberately no calculus and no equation
//! solving. The central design point is that [`Expr`] satisfies the scalar trait
//! bounds of `nalgebra`, so element matrices are ordinary `nalgebra` matrices with
//! symbolic entries and the weak-form assembly is written as matrix algebra.

mod eval;
mod expr;
mod latex;
mod simplify;

pub use expr::{Expr, Rational, Symbol};
pub use latex::{latex, latex_matrix};
pub use simplify::simplify;
