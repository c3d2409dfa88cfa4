//! Small dense linear algebra on row-major `Vec<Vec<f64>>` matrices
//!
//! The models in this workspace never need more than a few dozen rows, so
//! plain nested vectors are used instead of a BLAS-backed matrix type.

use crate::{MathError, Result};

/// Row-major dense matrix
pub type Matrix = Vec<Vec<f64>>;

/// Pivots smaller than this are treated as zero
const PIVOT_EPSILON: f64 = 1e-12;

/// Create a `rows x cols` matrix of zeros
pub fn zeros(rows: usize, cols: usize) -> Matrix {
    vec![vec![0.0; cols]; rows]
}

/// Create an `n x n` identity matrix
pub fn identity(n: usize) -> Matrix {
    let mut m = zeros(n, n);
    for (i, row) in m.iter_mut().enumerate() {
        row[i] = 1.0;
    }
    m
}

/// Matrix product `a * b`
pub fn matmul(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    let inner = b.len();
    if a.iter().any(|row| row.len() != inner) {
        return Err(MathError::InvalidInput(format!(
            "Cannot multiply matrices: left has {} columns, right has {} rows",
            a.first().map_or(0, |row| row.len()),
            inner
        )));
    }
    let cols = b.first().map_or(0, |row| row.len());

    let mut out = zeros(a.len(), cols);
    for (i, row) in a.iter().enumerate() {
        for (k, &a_ik) in row.iter().enumerate() {
            if a_ik == 0.0 {
                continue;
            }
            for (j, &b_kj) in b[k].iter().enumerate() {
                out[i][j] += a_ik * b_kj;
            }
        }
    }
    Ok(out)
}

/// Matrix transpose
pub fn transpose(a: &Matrix) -> Matrix {
    let cols = a.first().map_or(0, |row| row.len());
    (0..cols)
        .map(|j| a.iter().map(|row| row[j]).collect())
        .collect()
}

/// Outer product `u v'`
pub fn outer(u: &[f64], v: &[f64]) -> Matrix {
    u.iter()
        .map(|&ui| v.iter().map(|&vj| ui * vj).collect())
        .collect()
}

/// Matrix-vector product `a * x`
pub fn mat_vec(a: &Matrix, x: &[f64]) -> Vec<f64> {
    a.iter()
        .map(|row| row.iter().zip(x).map(|(a_ij, x_j)| a_ij * x_j).sum())
        .collect()
}

/// Dot product of two equally long slices
pub fn dot(u: &[f64], v: &[f64]) -> f64 {
    u.iter().zip(v).map(|(a, b)| a * b).sum()
}

/// Invert a square matrix by Gauss-Jordan elimination with partial pivoting
pub fn invert(a: &Matrix) -> Result<Matrix> {
    let n = a.len();
    if a.iter().any(|row| row.len() != n) {
        return Err(MathError::InvalidInput(
            "Only square matrices can be inverted".to_string(),
        ));
    }

    let mut work = a.clone();
    let mut inverse = identity(n);

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&i, &j| {
                work[i][col]
                    .abs()
                    .partial_cmp(&work[j][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(col);

        let scale = work
            .iter()
            .map(|row| row.iter().fold(0.0_f64, |m, v| m.max(v.abs())))
            .fold(0.0_f64, f64::max)
            .max(1.0);
        if !work[pivot_row][col].is_finite() || work[pivot_row][col].abs() < PIVOT_EPSILON * scale
        {
            return Err(MathError::SingularMatrix);
        }

        work.swap(col, pivot_row);
        inverse.swap(col, pivot_row);

        let pivot = work[col][col];
        for j in 0..n {
            work[col][j] /= pivot;
            inverse[col][j] /= pivot;
        }

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = work[row][col];
            if factor == 0.0 {
                continue;
            }
            for j in 0..n {
                work[row][j] -= factor * work[col][j];
                inverse[row][j] -= factor * inverse[col][j];
            }
        }
    }

    Ok(inverse)
}

/// Solve `a x = b` for a square matrix `a`
pub fn solve(a: &Matrix, b: &[f64]) -> Result<Vec<f64>> {
    if a.len() != b.len() {
        return Err(MathError::InvalidInput(format!(
            "Right-hand side has length {}, expected {}",
            b.len(),
            a.len()
        )));
    }
    let inverse = invert(a)?;
    Ok(mat_vec(&inverse, b))
}

/// Solve the discrete Lyapunov equation `P = T P T' + Q` by doubling
///
/// Converges when every eigenvalue of `T` lies strictly inside the unit
/// circle; otherwise a `CalculationError` is returned after `max_iter`
/// doublings.
pub fn solve_discrete_lyapunov(t: &Matrix, q: &Matrix, max_iter: usize) -> Result<Matrix> {
    let n = t.len();
    if q.len() != n || t.iter().chain(q.iter()).any(|row| row.len() != n) {
        return Err(MathError::InvalidInput(
            "Lyapunov equation needs square matrices of equal size".to_string(),
        ));
    }

    let mut a = t.clone();
    let mut p = q.clone();

    for _ in 0..max_iter {
        // P_{k+1} = P_k + A_k P_k A_k'
        let apa = matmul(&matmul(&a, &p)?, &transpose(&a))?;
        let mut change = 0.0_f64;
        let mut size = 0.0_f64;
        for i in 0..n {
            for j in 0..n {
                p[i][j] += apa[i][j];
                change = change.max(apa[i][j].abs());
                size = size.max(p[i][j].abs());
            }
        }

        if !size.is_finite() {
            break;
        }
        if change <= 1e-13 * size.max(1.0) {
            return Ok(symmetrize(p));
        }

        a = matmul(&a, &a)?;
    }

    Err(MathError::CalculationError(
        "Lyapunov iteration did not converge; transition is not stable".to_string(),
    ))
}

/// Average a square matrix with its transpose
pub fn symmetrize(mut a: Matrix) -> Matrix {
    let n = a.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let avg = 0.5 * (a[i][j] + a[j][i]);
            a[i][j] = avg;
            a[j][i] = avg;
        }
    }
    a
}
