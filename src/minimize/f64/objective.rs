use crate::error::EvalError;
use dyn_clone::DynClone;
use ndarray::prelude::*;

// Define a trait for the objective function
pub trait ObjFn: DynClone {
    fn call(&self, x: &Array1<f64>) -> Result<f64, EvalError>;

    /// Input length the function expects, when it is known up front.
    fn dimension(&self) -> Option<usize> {
        None
    }
}
dyn_clone::clone_trait_object!(ObjFn);

// Wrapper for multi-dimensional functions that cannot fail
#[derive(Clone)]
pub struct MultiDimFn<F>
where
    F: Fn(&Array1<f64>) -> f64 + Clone,
{
    pub(crate) f: F,
    pub(crate) dim: Option<usize>,
}

// Convenience constructors
impl<F> MultiDimFn<F>
where
    F: Fn(&Array1<f64>) -> f64 + Clone,
{
    pub fn new(f: F) -> Self {
        MultiDimFn { f, dim: None }
    }

    /// Declare the expected input length so problems can reject mismatches early.
    pub fn with_dimension(mut self, dim: usize) -> Self {
        self.dim = Some(dim);
        self
    }
}

impl<F> ObjFn for MultiDimFn<F>
where
    F: Fn(&Array1<f64>) -> f64 + Clone,
{
    fn call(&self, x: &Array1<f64>) -> Result<f64, EvalError> {
        Ok((self.f)(x))
    }

    fn dimension(&self) -> Option<usize> {
        self.dim
    }
}

// Wrapper for multi-dimensional functions that report their own failures
#[derive(Clone)]
pub struct TryMultiDimFn<F>
where
    F: Fn(&Array1<f64>) -> Result<f64, EvalError> + Clone,
{
    pub(crate) f: F,
    pub(crate) dim: Option<usize>,
}

impl<F> TryMultiDimFn<F>
where
    F: Fn(&Array1<f64>) -> Result<f64, EvalError> + Clone,
{
    pub fn new(f: F) -> Self {
        TryMultiDimFn { f, dim: None }
    }

    pub fn with_dimension(mut self, dim: usize) -> Self {
        self.dim = Some(dim);
        self
    }
}

impl<F> ObjFn for TryMultiDimFn<F>
where
    F: Fn(&Array1<f64>) -> Result<f64, EvalError> + Clone,
{
    fn call(&self, x: &Array1<f64>) -> Result<f64, EvalError> {
        (self.f)(x)
    }

    fn dimension(&self) -> Option<usize> {
        self.dim
    }
}
