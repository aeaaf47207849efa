use num::{One, Zero};
use rustc_hash::FxHashMap;

use crate::symbolic::{Expr, Rational};

/// A monomial over atomic factors: a sorted list of `(atom, exponent)` pairs.
///
/// Atoms are expressions the polynomial expansion does not look into: symbols,
/// `max` nodes and negative powers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Monomial(Vec<(Expr, i32)>);

impl Monomial {
    fn unit() -> Self {
        Monomial(Vec::new())
    }

    fn atom(atom: Expr) -> Self {
        Monomial(vec![(atom, 1)])
    }

    /// Merges two sorted factor lists, adding exponents and dropping factors that
    /// cancel completely.
    fn mul(&self, other: &Monomial) -> Monomial {
        let mut factors = self.0.clone();
        factors.extend(other.0.iter().cloned());
        factors.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut merged: Vec<(Expr, i32)> = Vec::with_capacity(factors.len());
        for (atom, exponent) in factors {
            match merged.last_mut() {
                Some((last, e)) if *last == atom => *e += exponent,
                _ => merged.push((atom, exponent)),
            }
        }
        merged.retain(|(_, e)| *e != 0);
        Monomial(merged)
    }
}

type Poly = FxHashMap<Monomial, Rational>;

fn constant_poly(value: Rational) -> Poly {
    let mut poly = Poly::default();
    if !value.is_zero() {
        poly.insert(Monomial::unit(), value);
    }
    poly
}

fn atom_poly(atom: Expr) -> Poly {
    match atom {
        Expr::Rational(r) => constant_poly(r),
        other => {
            let mut poly = Poly::default();
            poly.insert(Monomial::atom(other), Rational::one());
            poly
        }
    }
}

fn add_assign_poly(lhs: &mut Poly, rhs: Poly) {
    for (monomial, coefficient) in rhs {
        *lhs.entry(monomial).or_insert_with(Rational::zero) += coefficient;
    }
    lhs.retain(|_, c| !c.is_zero());
}

fn mul_poly(lhs: &Poly, rhs: &Poly) -> Poly {
    let mut result = Poly::default();
    for (ml, cl) in lhs {
        for (mr, cr) in rhs {
            let monomial = ml.mul(mr);
            let entry = result.entry(monomial).or_insert_with(Rational::zero);
            *entry += cl * cr;
        }
    }
    result.retain(|_, c| !c.is_zero());
    result
}

/// Expands the expression into a polynomial over atomic factors.
fn expand(expr: &Expr) -> Poly {
    match expr {
        Expr::Rational(r) => constant_poly(*r),
        Expr::Symbol(_) => atom_poly(expr.clone()),
        Expr::Sum(terms) => {
            let mut poly = Poly::default();
            for term in terms {
                add_assign_poly(&mut poly, expand(term));
            }
            poly
        }
        Expr::Product(factors) => {
            let mut poly = constant_poly(Rational::one());
            for factor in factors {
                poly = mul_poly(&poly, &expand(factor));
            }
            poly
        }
        Expr::Pow(base, exponent) => {
            if *exponent > 0 {
                let base_poly = expand(base);
                let mut poly = base_poly.clone();
                for _ in 1..*exponent {
                    poly = mul_poly(&poly, &base_poly);
                }
                poly
            } else {
                // Negative powers are opaque; simplify the base and keep the power as
                // an atom so that e.g. two occurrences of |u|^{-2} compare equal.
                atom_poly(Expr::pow(simplify(base), *exponent))
            }
        }
        Expr::Max(args) => atom_poly(Expr::max(args.iter().map(simplify).collect())),
    }
}

/// Rewrites the expression into an expanded polynomial normal form: a sum of monomials
/// over atomic factors with rational coefficients, emitted in a deterministic order.
///
/// Telescoping symbolic sums cancel exactly under this rewrite, which is what makes the
/// row-sum diagnostics collapse to closed form. Arguments of `max` nodes and bases of
/// negative powers are simplified recursively but otherwise left opaque.
pub fn simplify(expr: &Expr) -> Expr {
    let mut terms: Vec<(Monomial, Rational)> = expand(expr).into_iter().collect();
    terms.sort_by(|(ma, _), (mb, _)| ma.cmp(mb));
    let terms = terms
        .into_iter()
        .map(|(monomial, coefficient)| {
            let mut factors = Vec::with_capacity(monomial.0.len() + 1);
            factors.push(Expr::Rational(coefficient));
            for (atom, exponent) in monomial.0 {
                factors.push(Expr::pow(atom, exponent));
            }
            Expr::product(factors)
        })
        .collect();
    Expr::sum(terms)
}

impl Expr {
    /// See [`simplify`].
    pub fn simplified(&self) -> Expr {
        simplify(self)
    }
}
