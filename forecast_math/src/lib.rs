//! # Forecast Math
//!
//! Numeric building blocks for seasonal time series models.
//! This crate provides lag polynomials, differencing, small dense linear
//! algebra, ordinary least squares, a derivative-free optimiser and the
//! reparameterisation used to keep ARMA polynomials stationary.

use thiserror::Error;

pub mod descriptive;
pub mod differencing;
pub mod linalg;
pub mod optimization;
pub mod polynomial;
pub mod regression;
pub mod transforms;

/// Errors that can occur in numeric routines
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),

    #[error("Matrix is singular or not positive definite")]
    SingularMatrix,
}

/// Result type for numeric operations
pub type Result<T> = std::result::Result<T, MathError>;
