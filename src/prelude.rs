//! simplexkit prelude.
//!
//! This module contains the most used types, traits and functions that you
//! can import easily as a group.
//!
//! ```
//! use simplexkit::prelude::*;
//!
//! ```

#[doc(no_inline)]
pub use crate::error::{EvalError, MinimizerError};

#[doc(no_inline)]
pub use crate::minimize::{Minimizer, SolverOutput};

#[doc(no_inline)]
pub use crate::minimize::f64::{
    create_box_constraints, minimize_with_rng, simplex_method, Bounds, Constraint,
    LinearConstraint, MultiDimFn, ObjFn, PenaltyFunction, PenaltyType, Problem,
    QuadraticConstraint, SimplexMethod, SimplexOptions, SimplexResult, TryMultiDimFn,
};
