use crate::minimize::MinimizerError;
use ndarray::prelude::*;

pub mod bounds;
pub mod constraint;
pub mod objective;
pub mod penalty;
pub mod problem;
pub mod simplex;
mod trace;

pub use self::bounds::Bounds;
pub use self::constraint::{
    create_box_constraints, Constraint, LinearConstraint, QuadraticConstraint,
};
pub use self::objective::{MultiDimFn, ObjFn, TryMultiDimFn};
pub use self::penalty::{Evaluation, PenaltyFunction, PenaltyType};
pub use self::problem::Problem;
pub use self::simplex::{
    minimize_with_rng, simplex_method, SimplexMethod, SimplexOptions, SimplexResult,
};

/// A vertex of the simplex
#[derive(Debug, Clone)]
pub(crate) struct Vertex {
    pub(crate) point: Array1<f64>,
    pub(crate) eval: Evaluation,
}

impl Vertex {
    pub(crate) fn new(point: Array1<f64>, pf: &PenaltyFunction) -> Result<Self, MinimizerError> {
        let eval = pf.evaluate(&point)?;
        Ok(Vertex { point, eval })
    }
}
