//! Symbolic derivation of stabilized convection-diffusion-reaction element matrices.
//!
//! This crate derives, in closed form, the element-level matrices of a SUPG-stabilized
//! steady convection-diffusion-reaction (CDR) finite element formulation on 2D 3-node
//! (linear triangle, constant Jacobian) elements, together with a family of derived
//! operators and diagnostics:
//!
//! - symmetric/antisymmetric decomposition of the LHS matrix,
//! - the discrete algebraic-upwind diffusion operator (Kuzmin–Turek),
//! - streamline/crosswind diffusion matrices,
//! - simplified row-sum diagnostics.
//!
//! Everything is exact and symbolic: element matrices are `nalgebra` matrices whose
//! scalar type is the expression type [`symbolic::Expr`], and every derived quantity
//! can be rendered as LaTeX for inspection and transcription into a finite element
//! code. There is no numeric quadrature, no mesh and no solver here; the crate is a
//! one-shot derivation tool.

pub mod assembly;
pub mod element;
pub mod postprocess;
pub mod symbolic;

pub extern crate nalgebra;
