//! Penalty-constrained Nelder-Mead simplex search.
//!
//! [`minimize::f64::simplex_method`] minimises `f(x)` subject to `g_i(x) ≤ 0`
//! without derivatives, folding the constraints into a quadratic penalty and
//! recording the best point of every iteration. Results map onto
//! [`minimize::SolverOutput`] so the method can be compared with other
//! solvers on a common evaluation budget.
pub mod error;
pub mod minimize;
pub mod prelude;
