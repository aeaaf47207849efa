//! Diagnostics and derived operators for symbolic element matrices.
//!
//! These are the inspection tools applied after assembly: the symmetric/antisymmetric
//! decomposition, the discrete algebraic-upwind diffusion operator, the
//! streamline/crosswind split of the diffusion bilinear form, and simplified row-sum
//! diagnostics.

use itertools::iproduct;
use nalgebra::allocator::Allocator;
use nalgebra::{DefaultAllocator, DimName, OMatrix, OVector, U1};
use num::Zero;

use crate::symbolic::Expr;

/// The symmetric part $\frac{1}{2}(A + A^T)$, simplified entrywise.
pub fn symmetric_part<D>(matrix: &OMatrix<Expr, D, D>) -> OMatrix<Expr, D, D>
where
    D: DimName,
    DefaultAllocator: Allocator<Expr, D, D>,
{
    ((matrix + matrix.transpose()) * Expr::rational(1, 2)).map(|e| e.simplified())
}

/// The antisymmetric part $\frac{1}{2}(A - A^T)$, simplified entrywise.
pub fn antisymmetric_part<D>(matrix: &OMatrix<Expr, D, D>) -> OMatrix<Expr, D, D>
where
    D: DimName,
    DefaultAllocator: Allocator<Expr, D, D>,
{
    ((matrix - matrix.transpose()) * Expr::rational(1, 2)).map(|e| e.simplified())
}

/// The discrete algebraic-upwind diffusion operator of Kuzmin–Turek type for the given
/// transport matrix $K$:
///
/// $$ d_{ab} = \max(0, -K_{ab}, -K_{ba}) \quad (a \neq b), \qquad
///    d_{aa} = -\sum_{b \neq a} d_{ab}. $$
///
/// The operator is symmetric with zero row sums by construction, and $K + D$ has
/// non-negative off-diagonal entries.
pub fn discrete_upwind_operator<D>(matrix: &OMatrix<Expr, D, D>) -> OMatrix<Expr, D, D>
where
    D: DimName,
    DefaultAllocator: Allocator<Expr, D, D>,
{
    let n = D::dim();
    let mut d = OMatrix::<Expr, D, D>::zeros();
    for (a, b) in iproduct!(0..n, 0..n) {
        if a == b {
            continue;
        }
        let k_ab = (-matrix[(a, b)].clone()).simplified();
        let k_ba = (-matrix[(b, a)].clone()).simplified();
        d[(a, b)] = Expr::max(vec![Expr::zero(), k_ab, k_ba]);
    }
    for a in 0..n {
        let mut off_diagonal_sum = Expr::zero();
        for b in 0..n {
            if b != a {
                off_diagonal_sum += d[(a, b)].clone();
            }
        }
        d[(a, a)] = -off_diagonal_sum;
    }
    d
}

/// The streamline diffusion matrix $S = G^T P\, G$ with the streamline projector
/// $P = \frac{u u^T}{|u|^2}$: the part of the diffusion bilinear form acting along the
/// convective velocity.
pub fn streamline_diffusion_matrix<D, N>(
    velocity: &OVector<Expr, D>,
    gradients: &OMatrix<Expr, D, N>,
) -> OMatrix<Expr, N, N>
where
    D: DimName,
    N: DimName,
    DefaultAllocator: Allocator<Expr, D>
        + Allocator<Expr, U1, D>
        + Allocator<Expr, D, D>
        + Allocator<Expr, D, N>
        + Allocator<Expr, N, D>
        + Allocator<Expr, N, N>,
{
    let speed_squared = velocity
        .iter()
        .map(|u| u.clone() * u.clone())
        .fold(Expr::zero(), |acc, term| acc + term);
    let projector = (velocity * velocity.transpose()) * speed_squared.recip();
    (gradients.transpose() * projector * gradients).map(|e| e.simplified())
}

/// The crosswind diffusion matrix $X = G^T (I - P) G$: the complement of the
/// streamline part, so that $S + X = G^T G$.
pub fn crosswind_diffusion_matrix<D, N>(
    velocity: &OVector<Expr, D>,
    gradients: &OMatrix<Expr, D, N>,
) -> OMatrix<Expr, N, N>
where
    D: DimName,
    N: DimName,
    DefaultAllocator: Allocator<Expr, D>
        + Allocator<Expr, U1, D>
        + Allocator<Expr, D, D>
        + Allocator<Expr, D, N>
        + Allocator<Expr, N, D>
        + Allocator<Expr, N, N>,
{
    let full = gradients.transpose() * gradients;
    (full - streamline_diffusion_matrix(velocity, gradients)).map(|e| e.simplified())
}

/// Per-row symbolic sums, simplified. For a convection matrix the row sums vanish by
/// partition of unity; for the discrete upwind operator they vanish by construction.
pub fn matrix_row_sums<R, C>(matrix: &OMatrix<Expr, R, C>) -> OVector<Expr, R>
where
    R: DimName,
    C: DimName,
    DefaultAllocator: Allocator<Expr, R, C> + Allocator<Expr, R>,
{
    OVector::from_fn(|a, _| {
        matrix
            .row(a)
            .iter()
            .cloned()
            .fold(Expr::zero(), |acc, entry| acc + entry)
            .simplified()
    })
}
