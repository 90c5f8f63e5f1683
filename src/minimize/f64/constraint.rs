use crate::{
    error::EvalError,
    minimize::f64::{Bounds, MultiDimFn, TryMultiDimFn},
};
use dyn_clone::DynClone;
use ndarray::prelude::*;
use std::fmt;

/// Inequality constraint `g(x) ≤ 0`.
///
/// `evaluate` returns the signed value of `g`; positive means violated.
pub trait Constraint: DynClone {
    fn evaluate(&self, x: &Array1<f64>) -> Result<f64, EvalError>;

    /// Input length the constraint expects, when it is known up front.
    fn dimension(&self) -> Option<usize> {
        None
    }
}
dyn_clone::clone_trait_object!(Constraint);

impl<F> Constraint for MultiDimFn<F>
where
    F: Fn(&Array1<f64>) -> f64 + Clone,
{
    fn evaluate(&self, x: &Array1<f64>) -> Result<f64, EvalError> {
        Ok((self.f)(x))
    }

    fn dimension(&self) -> Option<usize> {
        self.dim
    }
}

impl<F> Constraint for TryMultiDimFn<F>
where
    F: Fn(&Array1<f64>) -> Result<f64, EvalError> + Clone,
{
    fn evaluate(&self, x: &Array1<f64>) -> Result<f64, EvalError> {
        (self.f)(x)
    }

    fn dimension(&self) -> Option<usize> {
        self.dim
    }
}

/// Linear constraint: a^T x + b ≤ 0
#[derive(Clone)]
pub struct LinearConstraint {
    pub a: Array1<f64>,
    pub b: f64,
}

impl LinearConstraint {
    pub fn new(a: Array1<f64>, b: f64) -> Self {
        Self { a, b }
    }
}

impl Constraint for LinearConstraint {
    fn evaluate(&self, x: &Array1<f64>) -> Result<f64, EvalError> {
        Ok(self.a.dot(x) + self.b)
    }

    fn dimension(&self) -> Option<usize> {
        Some(self.a.len())
    }
}

impl fmt::Debug for LinearConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LinearConstraint( {:?}^T * x + {:?} ≤ 0)", self.a, self.b)
    }
}

/// Quadratic constraint: x^T Q x + a^T x + b ≤ 0
#[derive(Clone)]
pub struct QuadraticConstraint {
    pub q: Array2<f64>,
    pub a: Array1<f64>,
    pub b: f64,
}

impl QuadraticConstraint {
    pub fn new(q: Array2<f64>, a: Array1<f64>, b: f64) -> Self {
        Self { q, a, b }
    }
}

impl Constraint for QuadraticConstraint {
    fn evaluate(&self, x: &Array1<f64>) -> Result<f64, EvalError> {
        if self.q.nrows() != x.len() || self.q.ncols() != x.len() || self.a.len() != x.len() {
            return Err(format!(
                "quadratic constraint of size {} evaluated at a point of length {}",
                self.a.len(),
                x.len()
            )
            .into());
        }
        Ok(x.dot(&self.q.dot(x)) + self.a.dot(x) + self.b)
    }

    fn dimension(&self) -> Option<usize> {
        Some(self.a.len())
    }
}

impl fmt::Debug for QuadraticConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "QuadraticConstraint( x^T * {:?} * x + {:?}^T * x + {:?} ≤ 0)",
            self.q, self.a, self.b
        )
    }
}

/// Create box constraints: l ≤ x ≤ u
pub fn create_box_constraints(bounds: &Bounds) -> Vec<Box<dyn Constraint>> {
    let n = bounds.len();
    let mut constraints = Vec::with_capacity(2 * n);

    for (i, (&l, &u)) in bounds.lower().iter().zip(bounds.upper().iter()).enumerate() {
        // x_i ≥ l becomes -x_i + l ≤ 0
        let mut a = Array1::zeros(n);
        a[i] = -1.0;
        constraints.push(Box::new(LinearConstraint::new(a, l)) as Box<dyn Constraint>);

        // x_i ≤ u becomes x_i - u ≤ 0
        let mut a = Array1::zeros(n);
        a[i] = 1.0;
        constraints.push(Box::new(LinearConstraint::new(a, -u)) as Box<dyn Constraint>);
    }

    constraints
}
