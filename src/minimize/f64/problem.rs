use crate::{
    error::MinimizerError,
    minimize::f64::{Bounds, Constraint, ObjFn},
};
use ndarray::prelude::*;

/// A constrained minimisation problem `min f(x)  s.t.  g_i(x) ≤ 0`.
///
/// All dimensions are checked here, before any function is evaluated.
#[derive(Clone)]
pub struct Problem {
    objective: Box<dyn ObjFn>,
    constraints: Vec<Box<dyn Constraint>>,
    x0: Array1<f64>,
    bounds: Bounds,
}

impl Problem {
    pub fn new<F>(
        objective: F,
        x0: Array1<f64>,
        bounds: Bounds,
        constraints: Vec<Box<dyn Constraint>>,
    ) -> Result<Self, MinimizerError>
    where
        F: ObjFn + 'static,
    {
        Self::new_boxed(Box::new(objective), x0, bounds, constraints)
    }

    pub fn new_boxed(
        objective: Box<dyn ObjFn>,
        x0: Array1<f64>,
        bounds: Bounds,
        constraints: Vec<Box<dyn Constraint>>,
    ) -> Result<Self, MinimizerError> {
        let n = x0.len();
        if n == 0 {
            return Err(MinimizerError::InvalidDimension);
        }
        if bounds.len() != n {
            return Err(MinimizerError::mismatch("bounds", n, bounds.len()));
        }
        if let Some(dim) = objective.dimension() {
            if dim != n {
                return Err(MinimizerError::mismatch("objective", n, dim));
            }
        }
        for (i, g) in constraints.iter().enumerate() {
            if let Some(dim) = g.dimension() {
                if dim != n {
                    return Err(MinimizerError::mismatch(format!("constraint {}", i), n, dim));
                }
            }
        }

        Ok(Self {
            objective,
            constraints,
            x0,
            bounds,
        })
    }

    pub fn dimension(&self) -> usize {
        self.x0.len()
    }

    pub fn n_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn x0(&self) -> &Array1<f64> {
        &self.x0
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn objective(&self) -> &dyn ObjFn {
        self.objective.as_ref()
    }

    pub fn constraints(&self) -> &[Box<dyn Constraint>] {
        &self.constraints
    }

    pub(crate) fn boxed_objective(&self) -> Box<dyn ObjFn> {
        self.objective.clone()
    }

    pub(crate) fn boxed_constraints(&self) -> Vec<Box<dyn Constraint>> {
        self.constraints.clone()
    }
}

#[cfg(test)]
mod minimize_f64_problem_tests {
    use super::*;
    use crate::minimize::f64::{LinearConstraint, MultiDimFn};
    use std::{cell::Cell, rc::Rc};

    fn bounds2() -> Bounds {
        Bounds::from_pairs(&[[-1.0, 1.0], [-1.0, 1.0]]).unwrap()
    }

    #[test]
    fn test_valid_problem() {
        let f = MultiDimFn::new(|x: &Array1<f64>| x[0] * x[1]).with_dimension(2);
        let g = LinearConstraint::new(array![1.0, -1.0], 0.0);
        let problem = Problem::new(f, array![0.5, 0.5], bounds2(), vec![Box::new(g)]).unwrap();
        assert_eq!(problem.dimension(), 2);
        assert_eq!(problem.n_constraints(), 1);
        assert_eq!(problem.objective().call(&array![2.0, 3.0]).unwrap(), 6.0);
        assert_eq!(problem.constraints()[0].evaluate(&array![2.0, 3.0]).unwrap(), -1.0);
    }

    #[test]
    fn test_mismatch_fails_before_evaluation() {
        let calls = Rc::new(Cell::new(0usize));
        let counter = calls.clone();
        let f = MultiDimFn::new(move |x: &Array1<f64>| {
            counter.set(counter.get() + 1);
            x[0]
        });

        let three = Bounds::from_pairs(&[[-1.0, 1.0]; 3]).unwrap();
        match Problem::new(f.clone(), array![0.0, 0.0], three, vec![]) {
            Err(MinimizerError::DimensionMismatch { expected, got, .. }) => {
                assert_eq!((expected, got), (2, 3));
            }
            _ => panic!("bounds mismatch not detected"),
        }

        let g = LinearConstraint::new(array![1.0, 1.0, 1.0], 0.0);
        match Problem::new(f.clone(), array![0.0, 0.0], bounds2(), vec![Box::new(g)]) {
            Err(MinimizerError::DimensionMismatch { what, .. }) => assert_eq!(what, "constraint 0"),
            _ => panic!("constraint mismatch not detected"),
        }

        let wide = f.clone().with_dimension(4);
        assert!(Problem::new(wide, array![0.0, 0.0], bounds2(), vec![]).is_err());
        assert!(matches!(
            Problem::new(f, array![], bounds2(), vec![]),
            Err(MinimizerError::InvalidDimension)
        ));

        assert_eq!(calls.get(), 0);
    }
}
