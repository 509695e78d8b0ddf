//! Gaussian elimination over the lifted field.

use crate::errors::{LuovError, Result};
use crate::field::Gf2m;
use crate::matrix::Matrix;

/// Solves the square system `A·x = b`.
///
/// Forward elimination with row-swap pivoting, then back-substitution. A
/// column without a nonzero candidate pivot means the system is singular;
/// that is an expected, frequent outcome for the signing loop and is
/// reported as `Ok(None)` rather than an error.
///
/// # Errors
/// `DimensionMismatch` when `A` is not square or `b` has the wrong length.
pub fn solve(gf: &Gf2m, a: &Matrix, b: &[u8]) -> Result<Option<Vec<u8>>> {
    let n = b.len();
    if a.rows() != n || a.cols() != n {
        return Err(LuovError::DimensionMismatch {
            op: "solve",
            lhs: (a.rows(), a.cols()),
            rhs: (n, 1),
        });
    }

    let mut m = a.clone();
    let mut rhs = b.to_vec();

    for col in 0..n {
        let Some(pivot) = (col..n).find(|&r| m.get(r, col) != 0) else {
            return Ok(None);
        };
        if pivot != col {
            m.swap_rows(pivot, col);
            rhs.swap(pivot, col);
        }

        let inv = gf.inverse(m.get(col, col))?;
        for j in col..n {
            m.set(col, j, gf.mult(inv, m.get(col, j)));
        }
        rhs[col] = gf.mult(inv, rhs[col]);

        for r in col + 1..n {
            let factor = m.get(r, col);
            if factor == 0 {
                continue;
            }
            for j in col..n {
                m.set(r, j, m.get(r, j) ^ gf.mult(factor, m.get(col, j)));
            }
            rhs[r] ^= gf.mult(factor, rhs[col]);
        }
    }

    // back-substitution; every pivot is normalized to 1
    let mut x = vec![0u8; n];
    for i in (0..n).rev() {
        let mut acc = rhs[i];
        for j in i + 1..n {
            acc ^= gf.mult(m.get(i, j), x[j]);
        }
        x[i] = acc;
    }
    Ok(Some(x))
}

/// Inverts a square matrix by eliminating `[A | I]` and extracting the
/// right half.
///
/// # Errors
/// `NotInvertible` when a pivot column has no nonzero candidate;
/// `DimensionMismatch` when `A` is not square.
pub fn invert(gf: &Gf2m, a: &Matrix) -> Result<Matrix> {
    let n = a.rows();
    if a.cols() != n {
        return Err(LuovError::DimensionMismatch {
            op: "invert",
            lhs: (n, a.cols()),
            rhs: (n, n),
        });
    }

    let mut work = a.concat_cols(&Matrix::identity(n))?;

    // zeros under the diagonal, unit pivots
    for col in 0..n {
        let Some(pivot) = (col..n).find(|&r| work.get(r, col) != 0) else {
            return Err(LuovError::NotInvertible);
        };
        work.swap_rows(pivot, col);

        let inv = gf.inverse(work.get(col, col))?;
        for j in col..2 * n {
            work.set(col, j, gf.mult(inv, work.get(col, j)));
        }
        for r in col + 1..n {
            let factor = work.get(r, col);
            if factor == 0 {
                continue;
            }
            for j in col..2 * n {
                work.set(r, j, work.get(r, j) ^ gf.mult(factor, work.get(col, j)));
            }
        }
    }

    // zeros above the diagonal
    for col in (1..n).rev() {
        for r in 0..col {
            let factor = work.get(r, col);
            if factor == 0 {
                continue;
            }
            for j in col..2 * n {
                work.set(r, j, work.get(r, j) ^ gf.mult(factor, work.get(col, j)));
            }
        }
    }

    let mut out = Matrix::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            out.set(i, j, work.get(i, j + n));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::LUOV_7_57_197;

    fn gf() -> Gf2m {
        Gf2m::new(&LUOV_7_57_197).unwrap()
    }

    #[test]
    fn solves_a_regular_system() {
        let gf = gf();
        // x0 + x1 = 3, x0 = 1  =>  x1 = 2
        let a = Matrix::from_raw(2, 2, vec![1, 1, 1, 0]);
        let x = solve(&gf, &a, &[3, 1]).unwrap().unwrap();
        assert_eq!(x, vec![1, 2]);
    }

    #[test]
    fn solution_satisfies_the_system() {
        let gf = gf();
        let a = Matrix::from_raw(3, 3, vec![7, 2, 0x41, 1, 0x30, 5, 0x22, 9, 3]);
        let b = [0x19, 0x5c, 0x71];
        let x = solve(&gf, &a, &b).unwrap().unwrap();
        let ax = a.mul(&gf, &Matrix::column(&x)).unwrap();
        assert_eq!(ax, Matrix::column(&b));
    }

    #[test]
    fn singular_system_reports_no_solution() {
        let gf = gf();
        let a = Matrix::from_raw(2, 2, vec![1, 1, 1, 1]);
        assert_eq!(solve(&gf, &a, &[1, 2]).unwrap(), None);
    }

    #[test]
    fn rejects_non_square_input() {
        let gf = gf();
        let a = Matrix::zeros(2, 3);
        assert!(solve(&gf, &a, &[0, 0]).is_err());
        assert!(invert(&gf, &a).is_err());
    }

    #[test]
    fn inverse_times_original_is_identity() {
        let gf = gf();
        let a = Matrix::from_raw(3, 3, vec![2, 3, 1, 0, 5, 4, 1, 0, 6]);
        let inv = invert(&gf, &a).unwrap();
        assert_eq!(a.mul(&gf, &inv).unwrap(), Matrix::identity(3));
        assert_eq!(inv.mul(&gf, &a).unwrap(), Matrix::identity(3));
    }

    #[test]
    fn singular_matrix_is_not_invertible() {
        let gf = gf();
        let a = Matrix::from_raw(2, 2, vec![4, 4, 4, 4]);
        assert_eq!(invert(&gf, &a), Err(LuovError::NotInvertible));
    }
}
