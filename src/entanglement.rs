//! Entanglement topologies for two-qubit interaction layers.
//!
//! Pattern semantics follow the TwoLocal conventions documented at
//! <https://docs.quantum.ibm.com/api/qiskit/qiskit.circuit.library.TwoLocal>.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Named scheme for choosing which qubit pairs interact in an entangling
/// layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entanglement {
    Full,
    Linear,
    ReverseLinear,
    Pairwise,
    Circular,
    /// Shifted-circular-alternating: the circular pattern rotated by the
    /// repetition index, with pair order swapped on odd repetitions.
    Sca,
}

impl FromStr for Entanglement {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Entanglement::Full),
            "linear" => Ok(Entanglement::Linear),
            "reverse_linear" => Ok(Entanglement::ReverseLinear),
            "pairwise" => Ok(Entanglement::Pairwise),
            "circular" => Ok(Entanglement::Circular),
            "sca" => Ok(Entanglement::Sca),
            other => Err(ModelError::InvalidConfiguration(format!(
                "unknown entanglement pattern {}",
                other
            ))),
        }
    }
}

/// Build the ordered qubit-pair sequence for an entanglement topology.
///
/// Every call with identical arguments produces an identical sequence, so
/// circuit construction is reproducible. `rep` is the repetition index of
/// the enclosing feature-map layer and only affects the `Sca` pattern;
/// other topologies ignore it.
///
/// Panics if `num_qubits` is 0.
pub fn entanglement_pattern(
    num_qubits: usize,
    entanglement: Entanglement,
    rep: usize,
) -> Vec<(usize, usize)> {
    assert!(num_qubits >= 1, "entanglement_pattern requires at least one qubit");

    match entanglement {
        Entanglement::Full => {
            let mut pattern = Vec::with_capacity(num_qubits * (num_qubits - 1) / 2);
            for i in 0..num_qubits {
                for j in (i + 1)..num_qubits {
                    pattern.push((i, j));
                }
            }
            pattern
        }

        Entanglement::Linear => (0..num_qubits.saturating_sub(1)).map(|i| (i, i + 1)).collect(),

        Entanglement::ReverseLinear => {
            (1..num_qubits).rev().map(|i| (i, i - 1)).collect()
        }

        Entanglement::Pairwise => {
            let even = (0..num_qubits.saturating_sub(1)).step_by(2).map(|i| (i, i + 1));
            let odd = (1..num_qubits.saturating_sub(1)).step_by(2).map(|i| (i, i + 1));
            even.chain(odd).collect()
        }

        Entanglement::Circular => {
            let mut pattern = Vec::with_capacity(num_qubits);
            pattern.push((num_qubits - 1, 0));
            pattern.extend(entanglement_pattern(num_qubits, Entanglement::Linear, 0));
            pattern
        }

        Entanglement::Sca => {
            // Built by explicit composition: materialize the circular list,
            // then rotate left by rep and swap pair order on odd reps.
            let circ = entanglement_pattern(num_qubits, Entanglement::Circular, 0);
            let shift = rep % num_qubits;
            let mut pattern = Vec::with_capacity(num_qubits);
            for i in 0..num_qubits {
                let (a, b) = circ[(i + num_qubits - shift) % num_qubits];
                if rep % 2 == 1 {
                    pattern.push((b, a));
                } else {
                    pattern.push((a, b));
                }
            }
            pattern
        }
    }
}
