//! One-shot derivation of the stabilized steady CDR element matrices for the 2D
//! 3-node triangle, printed as LaTeX.

use log::info;

use symfel::assembly::local::{
    assemble_element_cdr_matrix, assemble_element_convection_matrix, SteadyCdrOperator,
};
use symfel::assembly::operators::convection_operator;
use symfel::element::Tri3ElementGeometry;
use symfel::nalgebra::Matrix3;
use symfel::postprocess::{
    antisymmetric_part, crosswind_diffusion_matrix, discrete_upwind_operator, matrix_row_sums,
    streamline_diffusion_matrix, symmetric_part,
};
use symfel::symbolic::{latex, latex_matrix, Expr};

fn main() -> eyre::Result<()> {
    env_logger::init();

    let geometry = Tri3ElementGeometry::with_gauss_points(1);
    let operator = SteadyCdrOperator::with_symbolic_coefficients();
    let gauss_point = 0;
    let n = geometry.shape_functions(gauss_point)?;
    let g = geometry.shape_function_gradients(gauss_point)?;

    info!("deriving stabilized steady CDR element matrices for the 2D 3-node triangle");

    section("Element geometry (constant Jacobian, centroid Gauss point)");
    println!("N = {}", latex_matrix(n));
    println!("G = {}", latex_matrix(g));
    println!(
        "u \\cdot \\nabla N = {}",
        latex_matrix(&convection_operator(&operator.velocity, g))
    );

    let lhs = assemble_element_cdr_matrix(&operator, &geometry, gauss_point)?;

    section("Steady CDR element LHS matrix (Galerkin + SUPG)");
    print_entries("A", &lhs.map(|e| e.simplified()));

    section("Row sums of the LHS matrix");
    print_row_sums(&lhs);

    section("Symmetric part of the LHS matrix");
    print_entries("A^{sym}", &symmetric_part(&lhs));

    section("Antisymmetric part of the LHS matrix");
    print_entries("A^{skew}", &antisymmetric_part(&lhs));

    let convection = assemble_element_convection_matrix(&operator, n, g);
    let upwind = discrete_upwind_operator(&convection);

    section("Discrete upwind diffusion operator of the convection matrix");
    print_entries("D", &upwind);

    section("Row sums of the discrete upwind operator");
    print_row_sums(&upwind);

    let streamline = streamline_diffusion_matrix(&operator.velocity, g);
    let crosswind = crosswind_diffusion_matrix(&operator.velocity, g);

    section("Streamline diffusion matrix");
    print_entries("S", &streamline);
    print_row_sums(&streamline);

    section("Crosswind diffusion matrix");
    print_entries("X", &crosswind);
    print_row_sums(&crosswind);

    Ok(())
}

fn section(title: &str) {
    println!();
    println!("% ==== {} ====", title);
}

fn print_entries(name: &str, matrix: &Matrix3<Expr>) {
    for a in 0..3 {
        for b in 0..3 {
            println!("{}_{{{}{}}} = {}", name, a + 1, b + 1, latex(&matrix[(a, b)]));
        }
    }
}

fn print_row_sums(matrix: &Matrix3<Expr>) {
    for (a, row_sum) in matrix_row_sums(matrix).iter().enumerate() {
        println!("\\sum_b \\text{{row }} {}: {}", a + 1, latex(row_sum));
    }
}
