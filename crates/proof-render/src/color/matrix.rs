//! 3×3 matrices for tristimulus transforms.

use super::ColorError;

/// Pivots smaller than this are treated as zero.
const PIVOT_EPSILON: f64 = 1e-12;

/// Row-major 3×3 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3(pub [[f64; 3]; 3]);

impl Mat3 {
    pub const IDENTITY: Mat3 = Mat3([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    /// `self · v`
    #[inline]
    pub fn mul_vec(&self, v: [f64; 3]) -> [f64; 3] {
        let m = &self.0;
        [
            m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
            m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
            m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
        ]
    }

    /// `self · other`
    pub fn multiply(&self, other: &Mat3) -> Mat3 {
        let mut out = [[0.0; 3]; 3];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.0[r][k] * other.0[k][c]).sum();
            }
        }
        Mat3(out)
    }

    /// Inverse by Gauss-Jordan elimination with partial pivoting.
    pub fn inverse(&self) -> Result<Mat3, ColorError> {
        let mut a = self.0;
        let mut inv = Mat3::IDENTITY.0;

        for col in 0..3 {
            let pivot_row = (col..3)
                .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
                .unwrap_or(col);
            if a[pivot_row][col].abs() < PIVOT_EPSILON {
                return Err(ColorError::SingularMatrix);
            }
            a.swap(col, pivot_row);
            inv.swap(col, pivot_row);

            let pivot = a[col][col];
            for k in 0..3 {
                a[col][k] /= pivot;
                inv[col][k] /= pivot;
            }
            for row in 0..3 {
                if row == col {
                    continue;
                }
                let factor = a[row][col];
                if factor == 0.0 {
                    continue;
                }
                for k in 0..3 {
                    a[row][k] -= factor * a[col][k];
                    inv[row][k] -= factor * inv[col][k];
                }
            }
        }
        Ok(Mat3(inv))
    }

    /// Solve `self · x = b` by Gaussian elimination with partial pivoting
    /// and back substitution.
    pub fn solve(&self, b: [f64; 3]) -> Result<[f64; 3], ColorError> {
        let mut a = self.0;
        let mut b = b;

        for col in 0..3 {
            let pivot_row = (col..3)
                .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
                .unwrap_or(col);
            if a[pivot_row][col].abs() < PIVOT_EPSILON {
                return Err(ColorError::SingularMatrix);
            }
            a.swap(col, pivot_row);
            b.swap(col, pivot_row);
            for row in col + 1..3 {
                let factor = a[row][col] / a[col][col];
                for k in col..3 {
                    a[row][k] -= factor * a[col][k];
                }
                b[row] -= factor * b[col];
            }
        }

        let mut x = [0.0; 3];
        for row in (0..3).rev() {
            let tail: f64 = (row + 1..3).map(|k| a[row][k] * x[k]).sum();
            x[row] = (b[row] - tail) / a[row][row];
        }
        Ok(x)
    }
}
