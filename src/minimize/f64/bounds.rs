use crate::error::MinimizerError;
use ndarray::prelude::*;
use std::fmt;

/// Per-dimension `[lower, upper]` box.
///
/// The simplex method only uses the box to size its initial spread; points
/// outside it are still explored. Use [`create_box_constraints`] to penalise
/// leaving the box.
///
/// [`create_box_constraints`]: crate::minimize::f64::create_box_constraints
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: Array1<f64>,
    upper: Array1<f64>,
}

impl Bounds {
    pub fn new(lower: Array1<f64>, upper: Array1<f64>) -> Result<Self, MinimizerError> {
        if lower.len() != upper.len() {
            return Err(MinimizerError::mismatch(
                "upper bounds",
                lower.len(),
                upper.len(),
            ));
        }
        if lower.is_empty() {
            return Err(MinimizerError::InvalidDimension);
        }
        for (index, (&l, &u)) in lower.iter().zip(upper.iter()).enumerate() {
            if !l.is_finite() || !u.is_finite() || l > u {
                return Err(MinimizerError::InvalidBounds {
                    index,
                    lower: l,
                    upper: u,
                });
            }
        }
        Ok(Self { lower, upper })
    }

    /// Build from `[[x1l, x1u], [x2l, x2u], ...]` pairs.
    pub fn from_pairs(pairs: &[[f64; 2]]) -> Result<Self, MinimizerError> {
        let lower = pairs.iter().map(|p| p[0]).collect::<Array1<f64>>();
        let upper = pairs.iter().map(|p| p[1]).collect::<Array1<f64>>();
        Self::new(lower, upper)
    }

    pub fn len(&self) -> usize {
        self.lower.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    pub fn lower(&self) -> &Array1<f64> {
        &self.lower
    }

    pub fn upper(&self) -> &Array1<f64> {
        &self.upper
    }

    pub fn width(&self) -> Array1<f64> {
        &self.upper - &self.lower
    }

    /// Standard deviation of the initial simplex along each dimension.
    pub fn spread(&self, fraction: f64) -> Array1<f64> {
        self.width() * fraction
    }

    pub fn contains(&self, x: &Array1<f64>) -> bool {
        x.len() == self.len()
            && x
                .iter()
                .zip(self.lower.iter().zip(self.upper.iter()))
                .all(|(&xi, (&l, &u))| l <= xi && xi <= u)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (l, u)) in self.lower.iter().zip(self.upper.iter()).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[{}, {}]", l, u)?;
        }
        write!(f, "]")
    }
}
