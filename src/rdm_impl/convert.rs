//! Mean-field to 2-RDM input converters
//!
//! Each converter guards on the declared spin restriction, transforms the
//! integrals to the MO basis and returns the assembled solver inputs. The
//! hand-off to an external variational 2-RDM solver is a documented gap:
//! callers receive the inputs and decide what to do with them.

use std::fmt;
use std::str::FromStr;

use color_eyre::eyre::{bail, eyre, Result};
use nalgebra::DMatrix;
use ndarray::Array4;
use tracing::info;

use super::ao2mo::{chemist_to_physicist, four_index_general, four_index_mo, one_electron_mo};
use super::mean_field::{MeanField, SpinRestriction};

/// N-representability constraint hierarchy requested from the downstream
/// solver. Validated by convention only; no semantics are enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdmConstraint {
    D,
    DQ,
    DG,
    DQG,
    DQGT,
}

impl FromStr for RdmConstraint {
    type Err = color_eyre::eyre::Report;

    fn from_str(text: &str) -> Result<Self> {
        match text.to_uppercase().as_str() {
            "D" => Ok(RdmConstraint::D),
            "DQ" => Ok(RdmConstraint::DQ),
            "DG" => Ok(RdmConstraint::DG),
            "DQG" => Ok(RdmConstraint::DQG),
            "DQGT" => Ok(RdmConstraint::DQGT),
            other => Err(eyre!(
                "unknown RDM constraint hierarchy '{}' (expected D, DQ, DG, DQG or DQGT)",
                other
            )),
        }
    }
}

impl fmt::Display for RdmConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RdmConstraint::D => "D",
            RdmConstraint::DQ => "DQ",
            RdmConstraint::DG => "DG",
            RdmConstraint::DQG => "DQG",
            RdmConstraint::DQGT => "DQGT",
        };
        f.write_str(text)
    }
}

/// Index convention of the assembled two-electron blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOrdering {
    /// (pq|rs) as produced by the transform.
    Chemist,
    /// Operator ordering h[p,q,r,s] = (ps|qr).
    Physicist,
}

/// Solver inputs for a spin-restricted (RHF/ROHF) solution.
#[derive(Debug, Clone)]
pub struct RestrictedRdmInputs {
    pub constraints: RdmConstraint,
    /// Core Hamiltonian in the MO basis, (norb, norb).
    pub h1: DMatrix<f64>,
    /// Two-electron integrals in the MO basis, chemist notation,
    /// (norb, norb, norb, norb).
    pub eri: Array4<f64>,
    pub norb: usize,
    pub nelec: (usize, usize),
    pub spin: usize,
    pub multiplicity: usize,
}

/// Solver inputs for an unrestricted (UHF) solution.
#[derive(Debug, Clone)]
pub struct UnrestrictedRdmInputs {
    pub constraints: RdmConstraint,
    pub ordering: IndexOrdering,
    pub h1a: DMatrix<f64>,
    pub h1b: DMatrix<f64>,
    pub eri_aa: Array4<f64>,
    pub eri_ab: Array4<f64>,
    pub eri_bb: Array4<f64>,
    pub norb: usize,
    pub nelec: (usize, usize),
    pub spin: usize,
    pub multiplicity: usize,
}

/// Convert a closed-shell restricted solution.
pub fn restricted_to_rdm(
    mean_field: &MeanField,
    constraints: RdmConstraint,
) -> Result<RestrictedRdmInputs> {
    if mean_field.restriction != SpinRestriction::Restricted {
        bail!(
            "expected a restricted (RHF) mean field, found a {} solution",
            mean_field.restriction
        );
    }
    build_restricted_inputs(mean_field, constraints)
}

/// Convert a restricted open-shell solution.
///
/// The integrals are identical to the restricted case; the open-shell spin
/// and multiplicity ride along for the downstream occupation bookkeeping.
pub fn restricted_open_to_rdm(
    mean_field: &MeanField,
    constraints: RdmConstraint,
) -> Result<RestrictedRdmInputs> {
    if mean_field.restriction != SpinRestriction::RestrictedOpen {
        bail!(
            "expected a restricted open-shell (ROHF) mean field, found a {} solution",
            mean_field.restriction
        );
    }
    let inputs = build_restricted_inputs(mean_field, constraints)?;
    info!(
        "  Open shell: 2S = {}, multiplicity = {}",
        inputs.spin, inputs.multiplicity
    );
    Ok(inputs)
}

fn build_restricted_inputs(
    mean_field: &MeanField,
    constraints: RdmConstraint,
) -> Result<RestrictedRdmInputs> {
    let norb = mean_field.norb();
    let ao_eri = mean_field.eri_dense()?;
    let eri = four_index_mo(&ao_eri, &mean_field.mo_coeff)?;
    let h1 = one_electron_mo(&mean_field.hcore, &mean_field.mo_coeff);

    info!("  Two-electron tensor shape: {:?}", eri.dim());
    info!("  Number of molecular orbitals: {}", norb);
    info!("  One-electron tensor shape: ({}, {})", h1.nrows(), h1.ncols());
    info!(
        "  Electrons: {} alpha, {} beta",
        mean_field.nelec.0, mean_field.nelec.1
    );

    Ok(RestrictedRdmInputs {
        constraints,
        h1,
        eri,
        norb,
        nelec: mean_field.nelec,
        spin: mean_field.spin,
        multiplicity: mean_field.multiplicity(),
    })
}

/// Convert an unrestricted solution: one core Hamiltonian per spin and the
/// three two-electron blocks (aa, ab, bb) from mixed-coefficient transforms.
pub fn unrestricted_to_rdm(
    mean_field: &MeanField,
    constraints: RdmConstraint,
    ordering: IndexOrdering,
) -> Result<UnrestrictedRdmInputs> {
    if mean_field.restriction != SpinRestriction::Unrestricted {
        bail!(
            "expected an unrestricted (UHF) mean field, found a {} solution",
            mean_field.restriction
        );
    }

    let norb = mean_field.norb();
    let mo_a = &mean_field.mo_coeff;
    let mo_b = mean_field.beta_coeff()?;
    let ao_eri = mean_field.eri_dense()?;

    let h1a = one_electron_mo(&mean_field.hcore, mo_a);
    let h1b = one_electron_mo(&mean_field.hcore, mo_b);

    let mut eri_aa = four_index_general(&ao_eri, (mo_a, mo_a, mo_a, mo_a))?;
    let mut eri_ab = four_index_general(&ao_eri, (mo_a, mo_a, mo_b, mo_b))?;
    let mut eri_bb = four_index_general(&ao_eri, (mo_b, mo_b, mo_b, mo_b))?;

    if ordering == IndexOrdering::Physicist {
        eri_aa = chemist_to_physicist(&eri_aa)?;
        eri_ab = chemist_to_physicist(&eri_ab)?;
        eri_bb = chemist_to_physicist(&eri_bb)?;
    }

    info!("  Spin blocks (aa, ab, bb), each of shape {:?}", eri_aa.dim());
    info!("  Index ordering: {:?}", ordering);
    info!(
        "  Electrons: {} alpha, {} beta; 2S = {}, multiplicity = {}",
        mean_field.nelec.0,
        mean_field.nelec.1,
        mean_field.spin,
        mean_field.multiplicity()
    );

    Ok(UnrestrictedRdmInputs {
        constraints,
        ordering,
        h1a,
        h1b,
        eri_aa,
        eri_ab,
        eri_bb,
        norb,
        nelec: mean_field.nelec,
        spin: mean_field.spin,
        multiplicity: mean_field.multiplicity(),
    })
}
