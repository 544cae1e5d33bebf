//! Model representation and validation.
//!
//! This module holds the inputs of an evaluation: the structural
//! [`ModelParameters`], the [`PolicyShock`] applied to them and the slider
//! [`ShockBounds`], plus [`ModelDescription`] which assembles all of them from
//! a parsed model file.

mod description;
mod params;
mod shock;
mod validate;

pub use description::ModelDescription;
pub use params::{ModelParameters, Parameter, ParameterOverrides};
pub use shock::{PolicyShock, ShockBounds, ShockPolicy};
pub use validate::{validate_dashboard, validate_goods_market, validate_model};
