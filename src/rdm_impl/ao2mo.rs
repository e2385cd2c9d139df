//! AO to MO integral transformations
//!
//! Chemist-notation four-index transform
//!
//! ```text
//! (pq|rs) = Σ_μνλσ C1_μp C2_νq C3_λr C4_σs (μν|λσ)
//! ```
//!
//! carried out as four O(N^5) quarter transforms, plus the one-electron
//! similarity transform and the chemist/physicist index reorderings.

use color_eyre::eyre::{bail, Result};
use nalgebra::DMatrix;
use ndarray::{Array4, ArrayView4};
use rayon::prelude::*;

/// One-electron operator in the MO basis: `cᵀ h c`.
pub fn one_electron_mo(h: &DMatrix<f64>, c: &DMatrix<f64>) -> DMatrix<f64> {
    c.transpose() * h * c
}

/// Contract the leading tensor index with a coefficient matrix:
/// `out[p,j,k,l] = Σ_μ c[μ,p] t[μ,j,k,l]`, parallel over p.
fn contract_leading(t: ArrayView4<f64>, c: &DMatrix<f64>) -> Result<Array4<f64>> {
    let (n0, n1, n2, n3) = t.dim();
    if c.nrows() != n0 {
        bail!(
            "coefficient matrix has {} rows, leading tensor axis has {}",
            c.nrows(),
            n0
        );
    }
    let ncols = c.ncols();
    let block_len = n1 * n2 * n3;

    let blocks: Vec<Vec<f64>> = (0..ncols)
        .into_par_iter()
        .map(|p| {
            let mut block = vec![0.0; block_len];
            for mu in 0..n0 {
                let coeff = c[(mu, p)];
                if coeff == 0.0 {
                    continue;
                }
                for j in 0..n1 {
                    for k in 0..n2 {
                        for l in 0..n3 {
                            block[(j * n2 + k) * n3 + l] += coeff * t[[mu, j, k, l]];
                        }
                    }
                }
            }
            block
        })
        .collect();

    let mut data = Vec::with_capacity(ncols * block_len);
    for block in blocks {
        data.extend_from_slice(&block);
    }
    Ok(Array4::from_shape_vec((ncols, n1, n2, n3), data)?)
}

/// Four-index transform with independent coefficient sets per index,
/// the mixed-spin generalization needed for the UHF blocks.
pub fn four_index_general(
    eri: &Array4<f64>,
    coeffs: (&DMatrix<f64>, &DMatrix<f64>, &DMatrix<f64>, &DMatrix<f64>),
) -> Result<Array4<f64>> {
    let (c1, c2, c3, c4) = coeffs;
    // Each stage transforms the current leading AO index, then rotates the
    // axes so the next AO index leads; four rotations restore (p,q,r,s).
    let stage = contract_leading(eri.view(), c1)?;
    let stage = contract_leading(stage.view().permuted_axes([1, 2, 3, 0]), c2)?;
    let stage = contract_leading(stage.view().permuted_axes([1, 2, 3, 0]), c3)?;
    let stage = contract_leading(stage.view().permuted_axes([1, 2, 3, 0]), c4)?;
    Ok(stage.view().permuted_axes([1, 2, 3, 0]).to_owned())
}

/// Four-index transform with a single coefficient set (spin-restricted).
pub fn four_index_mo(eri: &Array4<f64>, c: &DMatrix<f64>) -> Result<Array4<f64>> {
    four_index_general(eri, (c, c, c, c))
}

/// Reorder a chemist-notation tensor into the physicist (operator-ordering)
/// convention: `out[p,q,r,s] = (ps|qr)`.
pub fn chemist_to_physicist(eri: &Array4<f64>) -> Result<Array4<f64>> {
    let n = square_extent(eri)?;
    let mut out = Array4::<f64>::zeros((n, n, n, n));
    for p in 0..n {
        for q in 0..n {
            for r in 0..n {
                for s in 0..n {
                    out[[p, q, r, s]] = eri[[p, s, q, r]];
                }
            }
        }
    }
    Ok(out)
}

/// Inverse of [`chemist_to_physicist`].
pub fn physicist_to_chemist(eri: &Array4<f64>) -> Result<Array4<f64>> {
    let n = square_extent(eri)?;
    let mut out = Array4::<f64>::zeros((n, n, n, n));
    for p in 0..n {
        for q in 0..n {
            for r in 0..n {
                for s in 0..n {
                    out[[p, q, r, s]] = eri[[p, r, s, q]];
                }
            }
        }
    }
    Ok(out)
}

fn square_extent(eri: &Array4<f64>) -> Result<usize> {
    let (n0, n1, n2, n3) = eri.dim();
    if n0 != n1 || n0 != n2 || n0 != n3 {
        bail!(
            "index reordering needs equal extents, tensor has {:?}",
            eri.dim()
        );
    }
    Ok(n0)
}
