//! Range checks for user-supplied clustering parameters.
//!
//! The numeric core accepts any `k >= 1`; the command-line front ends are
//! stricter and require `1 < k < n`, `1 < max_iter < 1000` and a finite,
//! non-negative `eps`.

use crate::error::KMeansError;

/// Exclusive upper bound for `max_iter`
pub const MAX_ITER_LIMIT: usize = 1000;

/// Parameters of a single clustering run as given on the command line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterParams {
    pub k: usize,
    pub max_iter: usize,
    pub eps: f64,
}

impl ClusterParams {
    pub fn new(k: usize, max_iter: usize, eps: f64) -> Self {
        Self { k, max_iter, eps }
    }

    /// Check the parameters against a dataset of `n_points` rows.
    pub fn validate(&self, n_points: usize) -> Result<(), KMeansError> {
        validate_k(self.k, n_points)?;
        validate_max_iter(self.max_iter)?;
        validate_eps(self.eps)
    }
}

pub fn validate_k(k: usize, n_points: usize) -> Result<(), KMeansError> {
    if k <= 1 || k >= n_points {
        return Err(KMeansError::InvalidK(format!(
            "k must satisfy 1 < k < {}, got {}",
            n_points, k
        )));
    }
    Ok(())
}

pub fn validate_max_iter(max_iter: usize) -> Result<(), KMeansError> {
    if max_iter <= 1 || max_iter >= MAX_ITER_LIMIT {
        return Err(KMeansError::InvalidMaxIter(format!(
            "max_iter must satisfy 1 < max_iter < {}, got {}",
            MAX_ITER_LIMIT, max_iter
        )));
    }
    Ok(())
}

pub fn validate_eps(eps: f64) -> Result<(), KMeansError> {
    if !eps.is_finite() || eps < 0.0 {
        return Err(KMeansError::InvalidEps(format!(
            "eps must be a finite non-negative number, got {}",
            eps
        )));
    }
    Ok(())
}

/// Parse an integer argument that may be written as a float with no
/// fractional part (`"3"` and `"3.0"` are both accepted).
pub fn parse_count(raw: &str) -> Option<usize> {
    if let Ok(value) = raw.trim().parse::<usize>() {
        return Some(value);
    }

    let value: f64 = raw.trim().parse().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
        Some(value as usize)
    } else {
        None
    }
}
