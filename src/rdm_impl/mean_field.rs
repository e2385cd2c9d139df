//! Mean-field data contract and checkpoint loading
//!
//! A `MeanField` is the read-only result of a converged SCF calculation in
//! an external quantum-chemistry package, shipped to this tool as a JSON
//! checkpoint: MO coefficients, orbital energies, the AO core Hamiltonian,
//! AO electron-repulsion integrals and the electron/spin bookkeeping.

use std::fmt;
use std::fs;
use std::path::Path;

use color_eyre::eyre::{bail, Result, WrapErr};
use nalgebra::DMatrix;
use ndarray::Array4;
use serde::{Deserialize, Serialize};

/// Spin restriction of the mean-field solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpinRestriction {
    /// Closed-shell restricted (RHF).
    Restricted,
    /// Restricted open-shell (ROHF).
    RestrictedOpen,
    /// Unrestricted (UHF), independent alpha and beta orbitals.
    Unrestricted,
}

impl fmt::Display for SpinRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SpinRestriction::Restricted => "restricted (RHF)",
            SpinRestriction::RestrictedOpen => "restricted open-shell (ROHF)",
            SpinRestriction::Unrestricted => "unrestricted (UHF)",
        };
        f.write_str(text)
    }
}

/// AO electron-repulsion integrals, chemist notation (μν|λσ).
///
/// Checkpoints may carry the dense four-index tensor directly or the
/// pair-packed form exploiting (μν|λσ) = (νμ|λσ) = (μν|σλ), an
/// `npair x npair` matrix with `npair = n(n+1)/2`. `to_dense` is the
/// unfolding operation restoring the full tensor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EriStorage {
    Dense(Array4<f64>),
    PairPacked(DMatrix<f64>),
}

impl EriStorage {
    /// Unfold to the dense four-index tensor over `norb` orbitals.
    pub fn to_dense(&self, norb: usize) -> Result<Array4<f64>> {
        match self {
            EriStorage::Dense(eri) => {
                let expected = (norb, norb, norb, norb);
                if eri.dim() != expected {
                    bail!(
                        "dense ERI tensor has shape {:?}, expected {:?}",
                        eri.dim(),
                        expected
                    );
                }
                Ok(eri.clone())
            }
            EriStorage::PairPacked(packed) => {
                let npair = norb * (norb + 1) / 2;
                if packed.nrows() != npair || packed.ncols() != npair {
                    bail!(
                        "pair-packed ERI matrix is {}x{}, expected {}x{}",
                        packed.nrows(),
                        packed.ncols(),
                        npair,
                        npair
                    );
                }
                let pair = |p: usize, q: usize| {
                    if p >= q {
                        p * (p + 1) / 2 + q
                    } else {
                        q * (q + 1) / 2 + p
                    }
                };
                let mut dense = Array4::<f64>::zeros((norb, norb, norb, norb));
                for p in 0..norb {
                    for q in 0..norb {
                        for r in 0..norb {
                            for s in 0..norb {
                                dense[[p, q, r, s]] = packed[(pair(p, q), pair(r, s))];
                            }
                        }
                    }
                }
                Ok(dense)
            }
        }
    }
}

/// Converged mean-field solution, read-only to this tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeanField {
    pub restriction: SpinRestriction,
    /// MO coefficients, AO x MO. The only set for R/RO, alpha for U.
    pub mo_coeff: DMatrix<f64>,
    /// Beta MO coefficients; present exactly for unrestricted solutions.
    #[serde(default)]
    pub mo_coeff_beta: Option<DMatrix<f64>>,
    pub mo_energy: Vec<f64>,
    #[serde(default)]
    pub mo_energy_beta: Option<Vec<f64>>,
    /// AO core Hamiltonian.
    pub hcore: DMatrix<f64>,
    pub eri: EriStorage,
    /// (alpha, beta) electron counts.
    pub nelec: (usize, usize),
    /// Twice the total spin projection, 2S (not the multiplicity).
    pub spin: usize,
}

impl MeanField {
    /// Load and validate a checkpoint file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("unable to read checkpoint file: {}", path.display()))?;
        let mean_field: MeanField = serde_json::from_str(&text)
            .wrap_err_with(|| format!("failed to parse checkpoint file: {}", path.display()))?;
        mean_field.validate()?;
        Ok(mean_field)
    }

    /// Number of atomic orbitals.
    pub fn nao(&self) -> usize {
        self.mo_coeff.nrows()
    }

    /// Number of molecular orbitals.
    pub fn norb(&self) -> usize {
        self.mo_coeff.ncols()
    }

    pub fn multiplicity(&self) -> usize {
        self.spin + 1
    }

    /// The beta coefficient set; an error for spin-restricted solutions.
    pub fn beta_coeff(&self) -> Result<&DMatrix<f64>> {
        match &self.mo_coeff_beta {
            Some(beta) => Ok(beta),
            None => bail!("checkpoint carries no beta MO coefficients"),
        }
    }

    /// The AO ERI tensor in dense four-index form.
    pub fn eri_dense(&self) -> Result<Array4<f64>> {
        self.eri.to_dense(self.nao())
    }

    /// Dimensional consistency checks across all blocks.
    pub fn validate(&self) -> Result<()> {
        let nao = self.nao();
        if self.hcore.nrows() != nao || self.hcore.ncols() != nao {
            bail!(
                "core Hamiltonian is {}x{}, expected {}x{}",
                self.hcore.nrows(),
                self.hcore.ncols(),
                nao,
                nao
            );
        }
        if self.mo_energy.len() != self.norb() {
            bail!(
                "{} orbital energies for {} molecular orbitals",
                self.mo_energy.len(),
                self.norb()
            );
        }
        match self.restriction {
            SpinRestriction::Unrestricted => {
                let beta = self.beta_coeff()?;
                if beta.shape() != self.mo_coeff.shape() {
                    bail!(
                        "beta MO coefficients are {}x{}, alpha are {}x{}",
                        beta.nrows(),
                        beta.ncols(),
                        self.mo_coeff.nrows(),
                        self.mo_coeff.ncols()
                    );
                }
            }
            SpinRestriction::Restricted | SpinRestriction::RestrictedOpen => {
                if self.mo_coeff_beta.is_some() {
                    bail!(
                        "checkpoint declares a {} solution but carries beta coefficients",
                        self.restriction
                    );
                }
            }
        }
        if self.restriction == SpinRestriction::Restricted && self.spin != 0 {
            bail!("restricted solution with nonzero spin 2S = {}", self.spin);
        }
        // Exercised through eri_dense, but a malformed block should fail at
        // load time rather than mid-conversion.
        self.eri.to_dense(nao).map(|_| ())
    }
}
