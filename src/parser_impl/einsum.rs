//! Einsum-style emission of contracted tensor terms
//!
//! Each permutation operator `P(x,y)` is expanded into an unpermuted and a
//! sign-flipped swapped variant, so a term with two permutation operators
//! emits four accumulation lines.

use color_eyre::eyre::Result;

use super::parser::{index_space, TensorFactor, TensorTerm};

impl TensorTerm {
    /// Render this term as einsum accumulation lines against the named
    /// target tensor with the given free (output) indices.
    pub fn einsum_strings(&self, update_val: &str, output_variables: &[char]) -> Result<Vec<String>> {
        self.validate(output_variables)?;

        // Each entry is a signed subset of the permutation swaps to apply.
        let mut variants: Vec<(f64, Vec<(char, char)>)> = vec![(1.0, Vec::new())];
        for &swap in &self.permutations {
            let mut next = Vec::with_capacity(variants.len() * 2);
            for (sign, swaps) in variants {
                next.push((sign, swaps.clone()));
                let mut swapped = swaps;
                swapped.push(swap);
                next.push((-sign, swapped));
            }
            variants = next;
        }

        let output: String = output_variables.iter().collect();
        let mut lines = Vec::with_capacity(variants.len());
        for (sign, swaps) in &variants {
            let mut subscripts = Vec::with_capacity(self.factors.len());
            let mut operands = Vec::with_capacity(self.factors.len());
            for factor in &self.factors {
                let relabeled: String = factor
                    .indices
                    .iter()
                    .map(|&index| apply_swaps(index, swaps))
                    .collect();
                subscripts.push(relabeled);
                operands.push(operand_name(factor)?);
            }
            lines.push(format!(
                "{} += {:+.14} * einsum('{}->{}', {})",
                update_val,
                sign * self.coefficient,
                subscripts.join(","),
                output,
                operands.join(", ")
            ));
        }
        Ok(lines)
    }
}

fn apply_swaps(index: char, swaps: &[(char, char)]) -> char {
    let mut current = index;
    for &(x, y) in swaps {
        if current == x {
            current = y;
        } else if current == y {
            current = x;
        }
    }
    current
}

/// Operand spelling for one factor. Amplitudes are bare tensors; integral,
/// Fock and Kronecker factors carry occupied/virtual slice labels derived
/// from their unpermuted indices (permutations swap like-space labels only).
fn operand_name(factor: &TensorFactor) -> Result<String> {
    match factor.name.as_str() {
        "t1" | "t2" | "l1" | "l2" => Ok(factor.name.clone()),
        name => {
            let display = if name == "d" { "kd" } else { name };
            let slices: Vec<String> = factor
                .indices
                .iter()
                .map(|&index| index_space(index).map(|space| space.slice_label().to_string()))
                .collect::<Result<Vec<String>>>()?;
            Ok(format!("{}[{}]", display, slices.join(", ")))
        }
    }
}
