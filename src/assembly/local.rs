//! Element matrices of the stabilized steady convection-diffusion-reaction weak form.
//!
//! All quantities are per Gauss point and symbolic. With $N$ the row vector of shape
//! function values, $G$ the gradient matrix (one column per node) and
//! $c = u^T G$ the convection operator, the LHS matrix assembled here is
//!
//! $$ A = N^T c + \tilde{\nu}_\phi G^T G + \tilde{s}_\phi N^T N
//!        + \tau w^T w, \qquad w = c + \tilde{s}_\phi N, $$
//!
//! i.e. Galerkin convection, diffusion and reaction terms plus SUPG stabilization with
//! the reaction-augmented test operator $w$.

use log::debug;
use nalgebra::{Matrix2x3, Matrix3, RowVector3, Vector2, U2};

use crate::assembly::operators::{convection_operator, vector_symbol};
use crate::element::Tri3ElementGeometry;
use crate::symbolic::Expr;

/// The symbolic Gauss point quantities of the steady CDR operator: convective velocity
/// $u$, effective viscosity $\tilde{\nu}_\phi$, effective reaction coefficient
/// $\tilde{s}_\phi$ and the SUPG stabilization parameter $\tau$.
#[derive(Debug, Clone, PartialEq)]
pub struct SteadyCdrOperator {
    pub velocity: Vector2<Expr>,
    pub viscosity: Expr,
    pub reaction: Expr,
    pub tau: Expr,
}

impl SteadyCdrOperator {
    /// An operator whose coefficients are all fresh symbols, for fully symbolic
    /// derivations.
    pub fn with_symbolic_coefficients() -> Self {
        Self {
            velocity: vector_symbol::<U2>("u"),
            viscosity: Expr::symbol(r"\tilde{\nu}_\phi"),
            reaction: Expr::symbol(r"\tilde{s}_\phi"),
            tau: Expr::symbol(r"\tau"),
        }
    }
}

/// The Galerkin convection matrix $A^c = N^T c$, $A^c_{ab} = N^a\, (u \cdot \nabla N^b)$.
pub fn assemble_element_convection_matrix(
    operator: &SteadyCdrOperator,
    shape_functions: &RowVector3<Expr>,
    gradients: &Matrix2x3<Expr>,
) -> Matrix3<Expr> {
    let c = convection_operator(&operator.velocity, gradients);
    shape_functions.transpose() * c
}

/// The diffusion matrix $A^d = \tilde{\nu}_\phi G^T G$,
/// $A^d_{ab} = \tilde{\nu}_\phi \nabla N^a \cdot \nabla N^b$.
pub fn assemble_element_diffusion_matrix(
    operator: &SteadyCdrOperator,
    gradients: &Matrix2x3<Expr>,
) -> Matrix3<Expr> {
    (gradients.transpose() * gradients) * operator.viscosity.clone()
}

/// The reaction matrix $A^s = \tilde{s}_\phi N^T N$,
/// $A^s_{ab} = \tilde{s}_\phi N^a N^b$.
pub fn assemble_element_reaction_matrix(
    operator: &SteadyCdrOperator,
    shape_functions: &RowVector3<Expr>,
) -> Matrix3<Expr> {
    (shape_functions.transpose() * shape_functions) * operator.reaction.clone()
}

/// The SUPG stabilization matrix $A^\tau = \tau\, w^T w$ with the reaction-augmented
/// test operator $w = c + \tilde{s}_\phi N$.
///
/// This is the sum of the streamline stabilization term $\tau w_a c_b$ and the
/// stabilized reaction term $\tau w_a \tilde{s}_\phi N^b$.
pub fn assemble_element_supg_matrix(
    operator: &SteadyCdrOperator,
    shape_functions: &RowVector3<Expr>,
    gradients: &Matrix2x3<Expr>,
) -> Matrix3<Expr> {
    let c = convection_operator(&operator.velocity, gradients);
    let w = c + shape_functions * operator.reaction.clone();
    (w.transpose() * &w) * operator.tau.clone()
}

/// The full LHS matrix of the stabilized steady CDR weak form at the given Gauss
/// point: convection + diffusion + reaction + SUPG stabilization.
pub fn assemble_element_cdr_matrix(
    operator: &SteadyCdrOperator,
    geometry: &Tri3ElementGeometry,
    gauss_point: usize,
) -> eyre::Result<Matrix3<Expr>> {
    let n = geometry.shape_functions(gauss_point)?;
    let g = geometry.shape_function_gradients(gauss_point)?;
    debug!(
        "assembling stabilized steady CDR element matrix at Gauss point {}",
        gauss_point
    );
    Ok(assemble_element_convection_matrix(operator, n, g)
        + assemble_element_diffusion_matrix(operator, g)
        + assemble_element_reaction_matrix(operator, n)
        + assemble_element_supg_matrix(operator, n, g))
}
