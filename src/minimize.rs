pub use crate::error::MinimizerError;
use crate::minimize::f64::Problem;
use ndarray::prelude::*;

pub mod f64;

/// Result shape shared by every solver compared on a problem.
///
/// One row per logical iteration (or sample) of the solver; the rows are the
/// best point found so far, so `f_best_so_far` never increases.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOutput {
    pub f_best_so_far: Array1<f64>,
    pub g_best_so_far: Array2<f64>,
    pub x_best_so_far: Array2<f64>,
    pub n_evals: usize,
}

impl SolverOutput {
    pub fn len(&self) -> usize {
        self.f_best_so_far.len()
    }

    pub fn is_empty(&self) -> bool {
        self.f_best_so_far.is_empty()
    }

    /// Final best objective value and its point.
    pub fn best(&self) -> Option<(f64, ArrayView1<'_, f64>)> {
        self.len()
            .checked_sub(1)
            .map(|last| (self.f_best_so_far[last], self.x_best_so_far.row(last)))
    }

    /// `true` when every constraint at the final best point satisfies `g ≤ tol`.
    pub fn is_feasible(&self, tol: f64) -> bool {
        self.len()
            .checked_sub(1)
            .map(|last| self.g_best_so_far.row(last).iter().all(|&g| g <= tol))
            .unwrap_or(false)
    }
}

/// A solver that can be compared with its peers on the same problem.
pub trait Minimizer {
    fn name(&self) -> &str;

    /// Solve `problem` within `budget`. What the budget counts is up to the
    /// solver (iterations, samples or evaluations); `n_evals` always reports
    /// the evaluations actually spent.
    fn solve(&mut self, problem: &Problem, budget: usize) -> Result<SolverOutput, MinimizerError>;
}
