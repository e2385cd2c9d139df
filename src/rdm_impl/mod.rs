//! Mean-field to 2-RDM integral preparation
//!
//! Converts converged mean-field checkpoints (RHF, ROHF, UHF) into one- and
//! two-electron integral tensors in the molecular-orbital basis, oriented
//! for a downstream variational 2-RDM solver. The SCF solution itself and
//! the 2-RDM optimization are both external; this module only owns the
//! basis transformation and bookkeeping in between.

mod ao2mo;
mod convert;
mod mean_field;

pub use ao2mo::{
    chemist_to_physicist, four_index_general, four_index_mo, one_electron_mo, physicist_to_chemist,
};
pub use convert::{
    restricted_open_to_rdm, restricted_to_rdm, unrestricted_to_rdm, IndexOrdering, RdmConstraint,
    RestrictedRdmInputs, UnrestrictedRdmInputs,
};
pub use mean_field::{EriStorage, MeanField, SpinRestriction};
