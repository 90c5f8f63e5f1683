use crate::{
    error::MinimizerError,
    minimize::f64::{Constraint, ObjFn},
};
use ndarray::prelude::*;
use simple_error::{bail, SimpleError};
use std::{fmt, str::FromStr};

/// Shape of the penalty applied to a violated constraint `g(x) > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PenaltyType {
    /// `μ · max(0, g)`
    L1,
    /// `μ · max(0, g)²`
    #[default]
    L2,
}

impl PenaltyType {
    pub fn apply(&self, violation: f64) -> f64 {
        match self {
            PenaltyType::L1 => violation,
            PenaltyType::L2 => violation * violation,
        }
    }
}

impl FromStr for PenaltyType {
    type Err = SimpleError;

    fn from_str(val: &str) -> Result<Self, Self::Err> {
        match val.to_lowercase().as_str() {
            "l1" => Ok(PenaltyType::L1),
            "l2" => Ok(PenaltyType::L2),
            _ => bail!("unknown penalty type: {}", val),
        }
    }
}

impl fmt::Display for PenaltyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PenaltyType::L1 => write!(f, "l1"),
            PenaltyType::L2 => write!(f, "l2"),
        }
    }
}

/// Everything learned from one evaluation of the augmented objective.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub augmented: f64,
    pub objective: f64,
    pub constraints: Array1<f64>,
}

/// Penalty-augmented objective for `min f(x)  s.t.  g_i(x) ≤ 0`.
///
/// `augmented(x) = f(x) + μ Σ p(max(0, g_i(x)))` where `p` is set by
/// [`PenaltyType`]. Satisfied constraints contribute nothing.
#[derive(Clone)]
pub struct PenaltyFunction {
    f: Box<dyn ObjFn>,
    g: Vec<Box<dyn Constraint>>,
    penalty: PenaltyType,
    mu: f64,
}

impl PenaltyFunction {
    pub fn new(
        f: Box<dyn ObjFn>,
        g: Vec<Box<dyn Constraint>>,
        penalty: PenaltyType,
        mu: f64,
    ) -> Result<Self, MinimizerError> {
        if !mu.is_finite() || mu < 0.0 {
            return Err(MinimizerError::InvalidParameters(format!(
                "penalty coefficient must be finite and non-negative, got {}",
                mu
            )));
        }
        Ok(Self { f, g, penalty, mu })
    }

    pub fn n_constraints(&self) -> usize {
        self.g.len()
    }

    pub fn penalty_type(&self) -> PenaltyType {
        self.penalty
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Raw objective `f(x)`, without any penalty.
    pub fn objective(&self, x: &Array1<f64>) -> Result<f64, MinimizerError> {
        self.f
            .call(x)
            .map_err(|source| MinimizerError::FunctionEvaluation { source })
    }

    /// Signed constraint values `g_i(x)`.
    pub fn constraints(&self, x: &Array1<f64>) -> Result<Array1<f64>, MinimizerError> {
        self.g
            .iter()
            .enumerate()
            .map(|(index, g)| {
                g.evaluate(x)
                    .map_err(|source| MinimizerError::ConstraintEvaluation { index, source })
            })
            .collect()
    }

    /// Penalty term for a vector of constraint values.
    pub fn penalty(&self, g: &Array1<f64>) -> f64 {
        self.mu
            * g.iter()
                .map(|&gi| self.penalty.apply(gi.max(0.0)))
                .sum::<f64>()
    }

    pub fn augmented(&self, x: &Array1<f64>) -> Result<f64, MinimizerError> {
        Ok(self.evaluate(x)?.augmented)
    }

    /// Evaluate `f` and every `g_i` once and combine them.
    pub fn evaluate(&self, x: &Array1<f64>) -> Result<Evaluation, MinimizerError> {
        let objective = self.objective(x)?;
        let constraints = self.constraints(x)?;
        let augmented = objective + self.penalty(&constraints);
        Ok(Evaluation {
            augmented,
            objective,
            constraints,
        })
    }
}

impl fmt::Debug for PenaltyFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PenaltyFunction")
            .field("n_constraints", &self.g.len())
            .field("penalty", &self.penalty)
            .field("mu", &self.mu)
            .finish()
    }
}
