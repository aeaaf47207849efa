//! Building blocks for the symbolic weak form.

use nalgebra::allocator::Allocator;
use nalgebra::{DefaultAllocator, DimName, OMatrix, OVector, U1};

use crate::symbolic::Expr;

/// A vector of fresh symbols `base_{0}, …, base_{D-1}`.
pub fn vector_symbol<D>(base: &str) -> OVector<Expr, D>
where
    D: DimName,
    DefaultAllocator: Allocator<Expr, D>,
{
    OVector::from_fn(|i, _| Expr::symbol(format!("{}_{{{}}}", base, i)))
}

/// The convection operator: the projection of a vector field onto the shape function
/// gradients,
/// $c_b = \sum_i u_i \frac{\partial N^b}{\partial x_i}$,
/// i.e. the row vector $u^T G$ for the gradient matrix $G$ whose columns are the node
/// gradients.
pub fn convection_operator<D, N>(
    vector: &OVector<Expr, D>,
    gradients: &OMatrix<Expr, D, N>,
) -> OMatrix<Expr, U1, N>
where
    D: DimName,
    N: DimName,
    DefaultAllocator: Allocator<Expr, D>
        + Allocator<Expr, U1, D>
        + Allocator<Expr, D, N>
        + Allocator<Expr, U1, N>,
{
    vector.transpose() * gradients
}
