//! Assembly and evaluation of the public quadratic map.
//!
//! Row `k` of Q1 interleaves, per vinegar index `i`, the packed triangle row
//! `Pk1[i][i..v]` with the m-entry vinegar-oil row `Pk2[i][..]`. The block
//! extractors below must skip each other's entries exactly; the pair
//! enumeration in [`evaluate`] walks the same layout column by column.

use crate::errors::Result;
use crate::expand::PublicMapParts;
use crate::field::Gf2m;
use crate::matrix::Matrix;
use crate::params::Params;

/// Extracts the v×v upper-triangular vinegar-vinegar block of polynomial `k`.
pub(crate) fn vinegar_block(params: &Params, q1: &Matrix, k: usize) -> Matrix {
    let (v, m) = (params.vinegar, params.oil);
    let mut pk1 = Matrix::zeros(v, v);
    let mut col = 0;
    for i in 0..v {
        for j in i..v {
            pk1.set(i, j, q1.get(k, col));
            col += 1;
        }
        col += m; // vinegar-oil entries belong to oil_block
    }
    pk1
}

/// Extracts the v×m vinegar-oil block of polynomial `k`.
pub(crate) fn oil_block(params: &Params, q1: &Matrix, k: usize) -> Matrix {
    let (v, m) = (params.vinegar, params.oil);
    let mut pk2 = Matrix::zeros(v, m);
    let mut col = 0;
    for i in 0..v {
        col += v - i; // skip the packed triangle row
        for j in 0..m {
            pk2.set(i, j, q1.get(k, col));
            col += 1;
        }
    }
    pk2
}

/// Derives the oil-oil coefficient matrix Q2 from Q1 and the transform.
///
/// For each polynomial, `Pk3 = Tᵗ·Pk1·T ⊕ Tᵗ·Pk2`; row `k` of Q2 packs the
/// diagonal of Pk3 followed by the symmetrized off-diagonal pairs
/// `Pk3[i][j] ⊕ Pk3[j][i]`; in characteristic 2 this collapses the
/// bilinear form into one canonical upper-triangular coefficient per pair.
pub(crate) fn find_q2(gf: &Gf2m, params: &Params, q1: &Matrix, t: &Matrix) -> Result<Matrix> {
    let m = params.oil;
    let tt = t.transpose();
    let mut q2 = Matrix::zeros(m, params.q2_cols());
    for k in 0..m {
        let pk1 = vinegar_block(params, q1, k);
        let pk2 = oil_block(params, q1, k);
        let pk3 = tt.mul(gf, &pk1)?.mul(gf, t)?.add(&tt.mul(gf, &pk2)?)?;
        let mut col = 0;
        for i in 0..m {
            q2.set(k, col, pk3.get(i, i));
            col += 1;
            for j in i + 1..m {
                q2.set(k, col, pk3.get(i, j) ^ pk3.get(j, i));
                col += 1;
            }
        }
    }
    Ok(q2)
}

/// Evaluates the public map at a signature vector:
/// `P(s) = C ⊕ L·s ⊕ Σ_{i≤j} Q[col(i,j)]·s_i·s_j` with `Q = [Q1 | Q2]` and
/// pairs enumerated in row-major upper-triangular order over all n
/// variables, matching Q1's column layout.
pub(crate) fn evaluate(
    gf: &Gf2m, params: &Params, parts: &PublicMapParts, q2: &Matrix, s: &Matrix,
) -> Result<Matrix> {
    let n = params.n();
    let m = params.oil;
    let q = parts.q1.concat_cols(q2)?;
    let mut e = parts.c.add(&parts.l.mul(gf, s)?)?;
    let mut col = 0;
    for i in 0..n {
        for j in i..n {
            let sij = gf.mult(s.get(i, 0), s.get(j, 0));
            if sij != 0 {
                for k in 0..m {
                    e.set(k, 0, e.get(k, 0) ^ gf.mult(q.get(k, col), sij));
                }
            }
            col += 1;
        }
    }
    Ok(e)
}

/// Evaluates the secret quadratic forms directly at `[v ; o]`, without the
/// public Q2. Each form is `[[Pk1, Pk1·T ⊕ Pk2], [Tᵗ·Pk1, 0]]`; serves as an
/// independent oracle for the public-map construction.
#[cfg(test)]
pub(crate) fn eval_secret_map(
    gf: &Gf2m, params: &Params, q1: &Matrix, t: &Matrix, vinegar: &Matrix, oil: &Matrix,
) -> Result<Matrix> {
    let m = params.oil;
    let tt = t.transpose();
    let vars = vinegar.concat_rows(oil)?;
    let vars_t = vars.transpose();
    let mut e = Matrix::zeros(m, 1);
    for k in 0..m {
        let pk1 = vinegar_block(params, q1, k);
        let pk2 = oil_block(params, q1, k);
        let upper = pk1.concat_cols(&pk1.mul(gf, t)?.add(&pk2)?)?;
        let lower = tt.mul(gf, &pk1)?.concat_cols(&Matrix::zeros(m, m))?;
        let qk = upper.concat_rows(&lower)?;
        let value = vars_t.mul(gf, &qk)?.mul(gf, &vars)?;
        e.set(k, 0, value.get(0, 0));
    }
    Ok(e)
}
