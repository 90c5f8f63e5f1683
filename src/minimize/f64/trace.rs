use crate::minimize::f64::Evaluation;
use ndarray::prelude::*;

/// Iteration-indexed record of the best vertex and the best point seen so far.
///
/// Rows are written once per iteration, in order. The best-so-far rows only
/// move to a new point when its raw objective is strictly lower; constraint
/// values play no part in the comparison.
#[derive(Debug, Clone)]
pub(crate) struct IterationTrace {
    its: usize,
    pub(crate) f_store: Array1<f64>,
    pub(crate) g_store: Array2<f64>,
    pub(crate) x_store: Array2<f64>,
    pub(crate) f_best_so_far: Array1<f64>,
    pub(crate) g_best_so_far: Array2<f64>,
    pub(crate) x_best_so_far: Array2<f64>,
    pub(crate) samples_at_iteration: Array1<usize>,
}

impl IterationTrace {
    pub(crate) fn new(max_iter: usize, n: usize, n_constraints: usize) -> Self {
        Self {
            its: 0,
            f_store: Array1::zeros(max_iter),
            g_store: Array2::zeros((max_iter, n_constraints)),
            x_store: Array2::zeros((max_iter, n)),
            f_best_so_far: Array1::zeros(max_iter),
            g_best_so_far: Array2::zeros((max_iter, n_constraints)),
            x_best_so_far: Array2::zeros((max_iter, n)),
            samples_at_iteration: Array1::zeros(max_iter),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.its
    }

    /// Append the state of the current best vertex.
    pub(crate) fn record(&mut self, point: &Array1<f64>, eval: &Evaluation, fn_evals: usize) {
        let its = self.its;
        debug_assert!(its < self.f_store.len(), "more iterations recorded than allocated");
        self.f_store[its] = eval.objective;
        self.g_store.row_mut(its).assign(&eval.constraints);
        self.x_store.row_mut(its).assign(point);

        if its == 0 || eval.objective < self.f_best_so_far[its - 1] {
            self.f_best_so_far[its] = eval.objective;
            self.g_best_so_far.row_mut(its).assign(&eval.constraints);
            self.x_best_so_far.row_mut(its).assign(point);
        } else {
            let (prev, mut next) = self
                .g_best_so_far
                .multi_slice_mut((s![its - 1, ..], s![its, ..]));
            next.assign(&prev);
            let (prev, mut next) = self
                .x_best_so_far
                .multi_slice_mut((s![its - 1, ..], s![its, ..]));
            next.assign(&prev);
            self.f_best_so_far[its] = self.f_best_so_far[its - 1];
        }

        self.samples_at_iteration[its] = fn_evals;
        self.its += 1;
    }
}
