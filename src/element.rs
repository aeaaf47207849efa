//! Symbolic geometry data for the 2D 3-node (linear triangle) element.
//!
//! Everything here is expressed at the Gauss-point level. For a linear triangle the
//! Jacobian is constant over the element, so the Cartesian shape function derivatives
//! can be written through a single symbol $|J|^{-1}$ without committing to a specific
//! element shape.

use eyre::eyre;
use nalgebra::{Matrix2x3, RowVector3, Vector2};
use num::Zero;

use crate::symbolic::Expr;

/// The symbol $|J|^{-1}$ carrying the (constant) inverse Jacobian determinant factor
/// of the shape function derivatives.
pub fn inverse_jacobian_determinant() -> Expr {
    Expr::symbol(r"|J|^{-1}")
}

/// Per-Gauss-point shape function values and Cartesian derivatives for the
/// constant-Jacobian 2D 3-node triangle.
///
/// The one-point (centroid) rule on a linear triangle makes the symbolic data
/// identical at every Gauss point: each shape function evaluates to the exact rational
/// $\frac{1}{3}$, and the gradient matrix stores one column per node,
/// $\nabla N^{1} = (|J|^{-1}, 0)$, $\nabla N^{2} = (0, |J|^{-1})$,
/// $\nabla N^{3} = (-|J|^{-1}, -|J|^{-1})$.
#[derive(Debug, Clone, PartialEq)]
pub struct Tri3ElementGeometry {
    shape_functions: Vec<RowVector3<Expr>>,
    shape_function_gradients: Vec<Matrix2x3<Expr>>,
    coordinate_symbols: Vector2<Expr>,
}

impl Tri3ElementGeometry {
    pub fn with_gauss_points(num_gauss_points: usize) -> Self {
        let third = Expr::rational(1, 3);
        let shape_functions = RowVector3::new(third.clone(), third.clone(), third);

        let j = inverse_jacobian_determinant();
        #[rustfmt::skip]
        let gradients = Matrix2x3::new(
            j.clone(),    Expr::zero(), -j.clone(),
            Expr::zero(), j.clone(),    -j,
        );

        Self {
            shape_functions: vec![shape_functions; num_gauss_points],
            shape_function_gradients: vec![gradients; num_gauss_points],
            coordinate_symbols: Vector2::new(Expr::symbol("x_{0}"), Expr::symbol("x_{1}")),
        }
    }

    pub fn num_nodes(&self) -> usize {
        3
    }

    pub fn num_gauss_points(&self) -> usize {
        self.shape_functions.len()
    }

    /// Shape function values at the given Gauss point, as a row vector with one entry
    /// per node.
    pub fn shape_functions(&self, gauss_point: usize) -> eyre::Result<&RowVector3<Expr>> {
        self.shape_functions
            .get(gauss_point)
            .ok_or_else(|| self.gauss_point_error(gauss_point))
    }

    /// Cartesian shape function derivatives at the given Gauss point. Column `a` is the
    /// gradient of shape function `a`.
    pub fn shape_function_gradients(&self, gauss_point: usize) -> eyre::Result<&Matrix2x3<Expr>> {
        self.shape_function_gradients
            .get(gauss_point)
            .ok_or_else(|| self.gauss_point_error(gauss_point))
    }

    /// The spatial coordinate symbols $x_{0}, x_{1}$.
    pub fn coordinate_symbols(&self) -> &Vector2<Expr> {
        &self.coordinate_symbols
    }

    fn gauss_point_error(&self, gauss_point: usize) -> eyre::Report {
        eyre!(
            "Gauss point index {} out of bounds (element has {} Gauss points)",
            gauss_point,
            self.num_gauss_points()
        )
    }
}
