//! Symbolic assembly of element-level weak form quantities.
//!
//! [`operators`] provides the building blocks (symbol vectors and the convection
//! operator), [`local`] the per-term element matrices of the stabilized steady
//! convection-diffusion-reaction formulation.

pub mod local;
pub mod operators;
