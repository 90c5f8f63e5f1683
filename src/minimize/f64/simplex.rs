use crate::{
    error::MinimizerError,
    minimize::{
        f64::{
            trace::IterationTrace, Bounds, Constraint, ObjFn, PenaltyFunction, PenaltyType,
            Problem, Vertex,
        },
        Minimizer, SolverOutput,
    },
};
use log::{debug, trace};
use ndarray::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::cmp::Ordering;

// Nelder-Mead coefficients
const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct SimplexOptions {
    pub penalty: PenaltyType,
    /// Penalty coefficient μ
    pub mu: f64,
    /// Initial simplex standard deviation as a fraction of each bound width
    pub spread_fraction: f64,
    /// Seed for the generator owned by [`SimplexMethod`]; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SimplexOptions {
    fn default() -> Self {
        Self {
            penalty: PenaltyType::L2,
            mu: 100.0,
            spread_fraction: 0.1,
            seed: None,
        }
    }
}

impl SimplexOptions {
    pub fn with_penalty(mut self, penalty: PenaltyType) -> Self {
        self.penalty = penalty;
        self
    }

    pub fn with_mu(mut self, mu: f64) -> Self {
        self.mu = mu;
        self
    }

    pub fn with_spread_fraction(mut self, fraction: f64) -> Self {
        self.spread_fraction = fraction;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn validate(&self) -> Result<(), MinimizerError> {
        if !self.spread_fraction.is_finite() || self.spread_fraction < 0.0 {
            return Err(MinimizerError::InvalidParameters(format!(
                "spread fraction must be finite and non-negative, got {}",
                self.spread_fraction
            )));
        }
        Ok(())
    }
}

/// Result of a penalty simplex run.
///
/// Every trace has one row per iteration. `*_store` follow the best vertex of
/// the simplex at that iteration; `*_best_so_far` follow the lowest raw
/// objective seen up to that iteration.
#[derive(Debug, Clone)]
pub struct SimplexResult {
    /// Augmented objective evaluations, including the initial simplex
    pub fn_evals: usize,
    pub iters: usize,
    pub f_store: Array1<f64>,
    pub g_store: Array2<f64>,
    pub x_store: Array2<f64>,
    pub f_best_so_far: Array1<f64>,
    pub g_best_so_far: Array2<f64>,
    pub x_best_so_far: Array2<f64>,
    /// Evaluations already spent when each iteration was recorded
    pub samples_at_iteration: Array1<usize>,
}

impl SimplexResult {
    pub fn fmin(&self) -> Option<f64> {
        self.iters
            .checked_sub(1)
            .map(|last| self.f_best_so_far[last])
    }

    pub fn xmin(&self) -> Option<Array1<f64>> {
        self.iters
            .checked_sub(1)
            .map(|last| self.x_best_so_far.row(last).to_owned())
    }

    pub fn gmin(&self) -> Option<Array1<f64>> {
        self.iters
            .checked_sub(1)
            .map(|last| self.g_best_so_far.row(last).to_owned())
    }
}

impl From<SimplexResult> for SolverOutput {
    fn from(res: SimplexResult) -> Self {
        SolverOutput {
            f_best_so_far: res.f_best_so_far,
            g_best_so_far: res.g_best_so_far,
            x_best_so_far: res.x_best_so_far,
            n_evals: res.fn_evals,
        }
    }
}

/// Counts every evaluation of the augmented objective.
struct Evaluator<'a> {
    pf: &'a PenaltyFunction,
    fn_evals: usize,
}

impl<'a> Evaluator<'a> {
    fn new(pf: &'a PenaltyFunction) -> Self {
        Self { pf, fn_evals: 0 }
    }

    fn vertex(&mut self, point: Array1<f64>) -> Result<Vertex, MinimizerError> {
        self.fn_evals += 1;
        Vertex::new(point, self.pf)
    }
}

/// Ascending order with every NaN last, whatever its sign.
fn rank_cmp(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// `centroid + coeff * (target - centroid)`
fn step(centroid: &Array1<f64>, target: &Array1<f64>, coeff: f64) -> Array1<f64> {
    centroid + &((target - centroid) * coeff)
}

/// Mean of the vertices listed in `ranks`, summed in rank order.
fn calculate_centroid(simplex: &[Vertex], ranks: &[usize]) -> Array1<f64> {
    let n = simplex[0].point.len();
    let mut centroid = Array1::<f64>::zeros(n);
    for &i in ranks {
        centroid += &simplex[i].point;
    }
    centroid / ranks.len() as f64
}

/// Draw `n + 1` vertices around `x0`, coordinate `j` from `N(x0[j], spread[j])`.
pub(crate) fn initial_simplex<R>(
    x0: &Array1<f64>,
    spread: &Array1<f64>,
    rng: &mut R,
) -> Result<Array2<f64>, MinimizerError>
where
    R: Rng + ?Sized,
{
    let n = x0.len();
    let normals = x0
        .iter()
        .zip(spread.iter())
        .map(|(&mean, &std_dev)| {
            if !std_dev.is_finite() || std_dev < 0.0 {
                return Err(MinimizerError::InvalidParameters(format!(
                    "initial simplex spread must be finite and non-negative, got {}",
                    std_dev
                )));
            }
            Normal::new(mean, std_dev).map_err(|e| {
                MinimizerError::InvalidParameters(format!("initial simplex spread: {}", e))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut nodes = Array2::zeros((n + 1, n));
    for mut row in nodes.rows_mut() {
        for (xj, normal) in row.iter_mut().zip(normals.iter()) {
            *xj = normal.sample(rng);
        }
    }
    Ok(nodes)
}

fn run_simplex(
    pf: &PenaltyFunction,
    nodes: Array2<f64>,
    max_iter: usize,
) -> Result<SimplexResult, MinimizerError> {
    let n = nodes.ncols();
    let mut evaluator = Evaluator::new(pf);
    let mut simplex = nodes
        .rows()
        .into_iter()
        .map(|row| evaluator.vertex(row.to_owned()))
        .collect::<Result<Vec<_>, _>>()?;

    let mut history = IterationTrace::new(max_iter, n, pf.n_constraints());

    for its in 0..max_iter {
        // Rank vertices from best to worst; ties keep storage order
        let mut order: Vec<usize> = (0..=n).collect();
        order.sort_by(|&a, &b| rank_cmp(simplex[a].eval.augmented, simplex[b].eval.augmented));
        let (b, l, w) = (order[0], order[n - 1], order[n]);
        let f_best = simplex[b].eval.augmented;
        let f_lousy = simplex[l].eval.augmented;
        let f_worst = simplex[w].eval.augmented;

        history.record(&simplex[b].point, &simplex[b].eval, evaluator.fn_evals);

        let centroid = calculate_centroid(&simplex, &order[..n]);

        let reflected = evaluator.vertex(step(&centroid, &simplex[w].point, -REFLECTION))?;
        let f_r = reflected.eval.augmented;

        if f_best <= f_r && f_r < f_lousy {
            trace!("iteration {}: reflection accepted, f = {}", its, f_r);
            simplex[w] = reflected;
        } else if f_r < f_best {
            let expanded = evaluator.vertex(step(&centroid, &reflected.point, EXPANSION))?;
            if expanded.eval.augmented < f_r {
                trace!(
                    "iteration {}: expansion accepted, f = {}",
                    its,
                    expanded.eval.augmented
                );
                simplex[w] = expanded;
            } else {
                trace!("iteration {}: expansion rejected, f = {}", its, f_r);
                simplex[w] = reflected;
            }
        } else {
            let contracted = evaluator.vertex(step(&centroid, &simplex[w].point, CONTRACTION))?;
            if contracted.eval.augmented < f_worst {
                trace!(
                    "iteration {}: contraction accepted, f = {}",
                    its,
                    contracted.eval.augmented
                );
                simplex[w] = contracted;
            } else {
                // No shrink step: the simplex stays as it is
                trace!("iteration {}: contraction rejected", its);
            }
        }
    }

    let iters = history.len();
    let res = SimplexResult {
        fn_evals: evaluator.fn_evals,
        iters,
        f_store: history.f_store,
        g_store: history.g_store,
        x_store: history.x_store,
        f_best_so_far: history.f_best_so_far,
        g_best_so_far: history.g_best_so_far,
        x_best_so_far: history.x_best_so_far,
        samples_at_iteration: history.samples_at_iteration,
    };
    debug!(
        "simplex finished: iters = {}, fn_evals = {}, fmin = {:?}",
        res.iters,
        res.fn_evals,
        res.fmin()
    );
    Ok(res)
}

fn penalty_function(
    problem: &Problem,
    options: &SimplexOptions,
) -> Result<PenaltyFunction, MinimizerError> {
    options.validate()?;
    PenaltyFunction::new(
        problem.boxed_objective(),
        problem.boxed_constraints(),
        options.penalty,
        options.mu,
    )
}

/// Run the penalty simplex method on `problem`, sampling the initial simplex from `rng`.
pub fn minimize_with_rng<R>(
    problem: &Problem,
    max_iter: usize,
    options: &SimplexOptions,
    rng: &mut R,
) -> Result<SimplexResult, MinimizerError>
where
    R: Rng + ?Sized,
{
    let pf = penalty_function(problem, options)?;
    debug!(
        "simplex: n = {}, constraints = {}, max_iter = {}, penalty = {} (mu = {})",
        problem.dimension(),
        problem.n_constraints(),
        max_iter,
        pf.penalty_type(),
        pf.mu()
    );
    let spread = problem.bounds().spread(options.spread_fraction);
    let nodes = initial_simplex(problem.x0(), &spread, rng)?;
    run_simplex(&pf, nodes, max_iter)
}

/// Penalty simplex method for `min f(x)  s.t.  g_i(x) ≤ 0`.
///
/// The initial simplex has `n + 1` vertices drawn from a normal distribution
/// centred on `x0` with a standard deviation of a tenth of each bound width.
/// Each of the `max_iter` iterations then reflects the worst vertex through
/// the centroid of the others and either accepts the reflection, tries an
/// expansion, or tries an inside contraction. There is no shrink step: a
/// failed contraction leaves the simplex unchanged.
///
/// # Arguments
/// * `f` - The function to minimize
/// * `x0` - Initial guess
/// * `bounds` - Variable bounds, only used to size the initial simplex
/// * `max_iter` - Number of iterations; there is no other stopping condition
/// * `constraints` - Constraint functions of the form `g(x) ≤ 0`
/// * `rng` - Source of randomness for the initial simplex
///
/// # Returns
/// * `SimplexResult` with the evaluation count and the per-iteration traces
pub fn simplex_method<F, R>(
    f: F,
    x0: Array1<f64>,
    bounds: Bounds,
    max_iter: usize,
    constraints: Vec<Box<dyn Constraint>>,
    rng: &mut R,
) -> Result<SimplexResult, MinimizerError>
where
    F: ObjFn + 'static,
    R: Rng + ?Sized,
{
    let problem = Problem::new(f, x0, bounds, constraints)?;
    minimize_with_rng(&problem, max_iter, &SimplexOptions::default(), rng)
}

/// Penalty simplex solver with its own random generator.
///
/// Successive calls draw fresh initial simplices from the same generator, so
/// repeated trials differ while a seeded solver reproduces the whole sequence.
#[derive(Debug, Clone)]
pub struct SimplexMethod {
    options: SimplexOptions,
    rng: ChaCha8Rng,
}

impl SimplexMethod {
    pub fn new(options: SimplexOptions) -> Self {
        let rng = match options.seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self { options, rng }
    }

    pub fn options(&self) -> &SimplexOptions {
        &self.options
    }

    pub fn minimize(
        &mut self,
        problem: &Problem,
        max_iter: usize,
    ) -> Result<SimplexResult, MinimizerError> {
        minimize_with_rng(problem, max_iter, &self.options, &mut self.rng)
    }

    /// Run from an explicit `(n + 1) x n` simplex instead of a sampled one.
    pub fn minimize_from_simplex(
        &mut self,
        problem: &Problem,
        simplex: Array2<f64>,
        max_iter: usize,
    ) -> Result<SimplexResult, MinimizerError> {
        let n = problem.dimension();
        if simplex.nrows() != n + 1 || simplex.ncols() != n {
            return Err(MinimizerError::InvalidInitialSimplex {
                expected_rows: n + 1,
                expected_cols: n,
                rows: simplex.nrows(),
                cols: simplex.ncols(),
            });
        }
        let pf = penalty_function(problem, &self.options)?;
        run_simplex(&pf, simplex, max_iter)
    }
}

impl Default for SimplexMethod {
    fn default() -> Self {
        Self::new(SimplexOptions::default())
    }
}

impl Minimizer for SimplexMethod {
    fn name(&self) -> &str {
        "simplex"
    }

    /// The budget is the number of simplex iterations.
    fn solve(&mut self, problem: &Problem, budget: usize) -> Result<SolverOutput, MinimizerError> {
        self.minimize(problem, budget).map(SolverOutput::from)
    }
}
