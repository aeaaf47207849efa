use matrixcompare::assert_matrix_eq;
use num::Zero;
use proptest::prelude::*;

use symfel::assembly::local::{
    assemble_element_cdr_matrix, assemble_element_convection_matrix,
    assemble_element_diffusion_matrix, assemble_element_reaction_matrix,
    assemble_element_supg_matrix, SteadyCdrOperator,
};
use symfel::assembly::operators::convection_operator;
use symfel::element::Tri3ElementGeometry;
use symfel::nalgebra::Matrix3;
use symfel::symbolic::Expr;

use crate::{cdr_bindings, eval_matrix3};

fn assert_symbolically_equal(lhs: &Matrix3<Expr>, rhs: &Matrix3<Expr>) {
    for a in 0..3 {
        for b in 0..3 {
            let difference = (lhs[(a, b)].clone() - rhs[(a, b)].clone()).simplified();
            assert!(
                difference.is_zero(),
                "entries ({}, {}) differ by {}",
                a,
                b,
                difference
            );
        }
    }
}

fn sum_expr(iter: impl Iterator<Item = Expr>) -> Expr {
    iter.fold(Expr::zero(), |acc, entry| acc + entry)
}

/// Reference element matrix written exactly as the scalar double loop of the weak
/// formulation, with no matrix algebra. The assembly routines must agree with this.
fn reference_cdr_matrix(
    operator: &SteadyCdrOperator,
    geometry: &Tri3ElementGeometry,
) -> Matrix3<Expr> {
    let n = geometry.shape_functions(0).unwrap();
    let g = geometry.shape_function_gradients(0).unwrap();
    let c = convection_operator(&operator.velocity, g);

    Matrix3::from_fn(|a, b| {
        let mut grad_a_dot_grad_b = Expr::zero();
        for i in 0..2 {
            grad_a_dot_grad_b += g[(i, a)].clone() * g[(i, b)].clone();
        }

        let mut entry = Expr::zero();
        // Galerkin terms of the steady CDR weak form.
        entry += n[a].clone() * c[b].clone();
        entry += operator.viscosity.clone() * grad_a_dot_grad_b;
        entry += operator.reaction.clone() * n[a].clone() * n[b].clone();
        // SUPG stabilization, convective and reactive parts separately.
        let test_operator = c[a].clone() + operator.reaction.clone() * n[a].clone();
        entry += operator.tau.clone() * test_operator.clone() * c[b].clone();
        entry += operator.tau.clone() * test_operator * operator.reaction.clone() * n[b].clone();
        entry
    })
}

#[test]
fn element_cdr_matrix_matches_scalar_reference_formulation() {
    let geometry = Tri3ElementGeometry::with_gauss_points(1);
    let operator = SteadyCdrOperator::with_symbolic_coefficients();
    let assembled = assemble_element_cdr_matrix(&operator, &geometry, 0).unwrap();
    let reference = reference_cdr_matrix(&operator, &geometry);
    assert_symbolically_equal(&assembled, &reference);
}

#[test]
fn element_cdr_matrix_is_the_sum_of_its_terms() {
    let geometry = Tri3ElementGeometry::with_gauss_points(1);
    let operator = SteadyCdrOperator::with_symbolic_coefficients();
    let n = geometry.shape_functions(0).unwrap();
    let g = geometry.shape_function_gradients(0).unwrap();

    let total = assemble_element_cdr_matrix(&operator, &geometry, 0).unwrap();
    let sum = assemble_element_convection_matrix(&operator, n, g)
        + assemble_element_diffusion_matrix(&operator, g)
        + assemble_element_reaction_matrix(&operator, n)
        + assemble_element_supg_matrix(&operator, n, g);
    assert_symbolically_equal(&total, &sum);
}

#[test]
fn diffusion_matrix_has_known_closed_form() {
    let geometry = Tri3ElementGeometry::with_gauss_points(1);
    let operator = SteadyCdrOperator::with_symbolic_coefficients();
    let g = geometry.shape_function_gradients(0).unwrap();
    let diffusion = assemble_element_diffusion_matrix(&operator, g);

    // For the constant-Jacobian triangle,
    // G^T G = |J|^{-2} [[1, 0, -1], [0, 1, -1], [-1, -1, 2]].
    let j2 = Expr::pow(symfel::element::inverse_jacobian_determinant(), 2);
    let nu = operator.viscosity.clone();
    let entry = |value: i64| nu.clone() * Expr::integer(value) * j2.clone();
    #[rustfmt::skip]
    let expected = Matrix3::new(
        entry(1),  entry(0),  entry(-1),
        entry(0),  entry(1),  entry(-1),
        entry(-1), entry(-1), entry(2),
    );
    assert_symbolically_equal(&diffusion, &expected);
}

#[test]
fn reaction_matrix_is_uniform_over_nodes() {
    let geometry = Tri3ElementGeometry::with_gauss_points(1);
    let operator = SteadyCdrOperator::with_symbolic_coefficients();
    let n = geometry.shape_functions(0).unwrap();
    let reaction = assemble_element_reaction_matrix(&operator, n);

    // N^a N^b = 1/9 for every pair at the centroid Gauss point.
    let expected = Matrix3::from_element(Expr::rational(1, 9) * operator.reaction.clone());
    assert_symbolically_equal(&reaction, &expected);
}

#[test]
fn convection_matrix_row_sums_vanish() {
    let geometry = Tri3ElementGeometry::with_gauss_points(1);
    let operator = SteadyCdrOperator::with_symbolic_coefficients();
    let n = geometry.shape_functions(0).unwrap();
    let g = geometry.shape_function_gradients(0).unwrap();
    let convection = assemble_element_convection_matrix(&operator, n, g);

    for a in 0..3 {
        let row_sum = sum_expr(convection.row(a).iter().cloned());
        assert!(row_sum.simplified().is_zero());
    }
}

#[test]
fn lhs_row_sums_have_known_closed_form() {
    // Per row a: the convection and diffusion contributions cancel by partition of
    // unity, leaving s/3 from the reaction term and tau * s * w_a from SUPG.
    let geometry = Tri3ElementGeometry::with_gauss_points(1);
    let operator = SteadyCdrOperator::with_symbolic_coefficients();
    let g = geometry.shape_function_gradients(0).unwrap();
    let c = convection_operator(&operator.velocity, g);
    let lhs = assemble_element_cdr_matrix(&operator, &geometry, 0).unwrap();

    let s = operator.reaction.clone();
    let tau = operator.tau.clone();
    for a in 0..3 {
        let row_sum = sum_expr(lhs.row(a).iter().cloned());
        let w_a = c[a].clone() + s.clone() * Expr::rational(1, 3);
        let expected = s.clone() * Expr::rational(1, 3) + tau.clone() * s.clone() * w_a;
        assert!((row_sum - expected).simplified().is_zero());
    }
}

#[test]
fn assembly_at_invalid_gauss_point_fails() {
    let geometry = Tri3ElementGeometry::with_gauss_points(1);
    let operator = SteadyCdrOperator::with_symbolic_coefficients();
    assert!(assemble_element_cdr_matrix(&operator, &geometry, 1).is_err());
}

proptest! {
    #[test]
    fn assembled_matrix_evaluates_consistently_with_reference(
        u0 in -5.0..5.0f64,
        u1 in -5.0..5.0f64,
        viscosity in 0.01..10.0f64,
        reaction in 0.01..10.0f64,
        tau in 0.01..10.0f64,
        inv_det_j in 0.1..10.0f64,
    ) {
        let geometry = Tri3ElementGeometry::with_gauss_points(1);
        let operator = SteadyCdrOperator::with_symbolic_coefficients();
        let bindings = cdr_bindings(u0, u1, viscosity, reaction, tau, inv_det_j);

        let assembled = assemble_element_cdr_matrix(&operator, &geometry, 0).unwrap();
        let simplified = assembled.map(|e| e.simplified());

        let assembled = eval_matrix3(&assembled, &bindings);
        let simplified = eval_matrix3(&simplified, &bindings);
        let reference = eval_matrix3(&reference_cdr_matrix(&operator, &geometry), &bindings);

        assert_matrix_eq!(assembled, reference, comp = abs, tol = 1e-9);
        assert_matrix_eq!(simplified, reference, comp = abs, tol = 1e-9);
    }
}
