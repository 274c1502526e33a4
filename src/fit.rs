//! Least-squares polynomial fitting for trend overlays.

use nalgebra::{DMatrix, DVector};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FitError {
    #[error("cannot fit a polynomial to an empty series")]
    Empty,
    #[error("x and y lengths differ ({x} vs {y})")]
    LengthMismatch { x: usize, y: usize },
    #[error("series contains non-finite values")]
    NonFinite,
    #[error("least-squares solve failed: {0}")]
    Solve(&'static str),
}

/// Polynomial with coefficients ordered from the highest degree down.
#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    pub fn new(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
    }

    pub fn eval_all(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.eval(x)).collect()
    }
}

/// Fit a degree-`degree` polynomial to `(xs, ys)` by least squares.
///
/// Vandermonde columns are scaled to unit norm before an SVD solve, which
/// keeps degree-12 fits over percentage coordinates well conditioned.
/// Underdetermined inputs yield the minimum-norm solution.
pub fn polyfit(xs: &[f64], ys: &[f64], degree: usize) -> Result<Polynomial, FitError> {
    if xs.len() != ys.len() {
        return Err(FitError::LengthMismatch {
            x: xs.len(),
            y: ys.len(),
        });
    }
    if xs.is_empty() {
        return Err(FitError::Empty);
    }
    if xs.iter().chain(ys).any(|v| !v.is_finite()) {
        return Err(FitError::NonFinite);
    }

    let n = xs.len();
    let cols = degree + 1;
    let mut vander = DMatrix::from_fn(n, cols, |row, col| xs[row].powi((degree - col) as i32));

    let mut scale = vec![1.0; cols];
    for (col, s) in scale.iter_mut().enumerate() {
        let norm = vander.column(col).norm();
        if norm > 0.0 {
            *s = norm;
            vander.column_mut(col).unscale_mut(norm);
        }
    }

    let rhs = DVector::from_column_slice(ys);
    let eps = n.max(cols) as f64 * f64::EPSILON;
    let solution = vander.svd(true, true).solve(&rhs, eps).map_err(FitError::Solve)?;

    let coefficients = solution
        .iter()
        .zip(&scale)
        .map(|(c, s)| c / s)
        .collect();
    Ok(Polynomial::new(coefficients))
}

/// Fit and evaluate at the sample positions, as drawn on the trend plot.
pub fn fitted_curve(xs: &[f64], ys: &[f64], degree: usize) -> Result<Vec<f64>, FitError> {
    Ok(polyfit(xs, ys, degree)?.eval_all(xs))
}
