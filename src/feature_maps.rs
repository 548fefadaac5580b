//! Quantum feature-map constructors.
//!
//! Each constructor is a deterministic function from a feature count and a
//! configuration to a parameterized `Circuit` encoding one sample per
//! binding vector. The circuits are descriptions only; fidelity evaluation
//! happens in an external engine (see `kernel::fidelity`).
//!
//! References
//! ----------
//! [1] Havlicek et al. "Supervised learning with quantum-enhanced feature
//!     spaces". Nature 567, 209-212 (2019).
//! [2] Bremner, Jozsa, Shepherd. "Classical simulation of commuting quantum
//!     computations implies collapse of the polynomial hierarchy". Proc. R.
//!     Soc. A 467, 459-472 (2010).
//! [3] Mitarai et al. "Quantum circuit learning". Phys. Rev. A 98, 032309
//!     (2018).
//! [4] Farhi, Goldstone, Gutmann. "A quantum approximate optimization
//!     algorithm" (2014).
//! [5] Perez-Salinas et al. "Data re-uploading for a universal quantum
//!     classifier". Quantum 4, 226 (2020).

use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::circuit::{Circuit, ParamExpr};
use crate::entanglement::{entanglement_pattern, Entanglement};
use crate::error::ModelError;

/// Hyper-parameters shared by the feature-map constructors. Fields a given
/// map does not use are ignored by it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureMapConfig {
    /// Number of repetitions of the encoding block.
    pub reps: usize,
    /// Pauli strings for the Pauli feature map.
    pub paulis: Vec<String>,
    /// Entanglement topology for maps with two-qubit layers.
    pub entanglement: Entanglement,
    /// Qubits per feature for the polynomial map.
    pub qubits_per_feature: usize,
    /// Seed for the random map.
    pub seed: Option<u64>,
}

impl Default for FeatureMapConfig {
    fn default() -> Self {
        FeatureMapConfig {
            reps: 1,
            paulis: vec!["Z".to_string(), "ZZ".to_string()],
            entanglement: Entanglement::Linear,
            qubits_per_feature: 2,
            seed: None,
        }
    }
}

/// The feature maps this crate can construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureMapType {
    Pauli,
    Z,
    Zz,
    Iqp,
    Polynomial,
    QaoaInspired,
    Random,
    DataReuploading,
}

impl FromStr for FeatureMapType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pauli" => Ok(FeatureMapType::Pauli),
            "z" => Ok(FeatureMapType::Z),
            "zz" => Ok(FeatureMapType::Zz),
            "iqp" => Ok(FeatureMapType::Iqp),
            "polynomial" => Ok(FeatureMapType::Polynomial),
            "qaoa" | "qaoa_inspired" => Ok(FeatureMapType::QaoaInspired),
            "random" => Ok(FeatureMapType::Random),
            "data_reuploading" => Ok(FeatureMapType::DataReuploading),
            other => Err(ModelError::InvalidConfiguration(format!(
                "unknown feature map type: {}",
                other
            ))),
        }
    }
}

/// Build a feature map by type tag, pulling hyper-parameters from `config`.
pub fn build_feature_map(
    map_type: FeatureMapType,
    num_features: usize,
    config: &FeatureMapConfig,
) -> Result<Circuit, ModelError> {
    match map_type {
        FeatureMapType::Pauli => pauli_feature_map(
            num_features,
            config.reps,
            &config.paulis,
            config.entanglement,
        ),
        FeatureMapType::Z => z_feature_map(num_features, config.reps),
        FeatureMapType::Zz => zz_feature_map(num_features, config.reps, config.entanglement),
        FeatureMapType::Iqp => iqp_feature_map(num_features, config.reps, config.entanglement),
        FeatureMapType::Polynomial => {
            polynomial_feature_map(num_features, config.qubits_per_feature)
        }
        FeatureMapType::QaoaInspired => {
            qaoa_inspired_feature_map(num_features, config.reps, config.entanglement)
        }
        FeatureMapType::Random => random_feature_map(num_features, config.reps, config.seed),
        FeatureMapType::DataReuploading => {
            data_reuploading_feature_map(num_features, config.reps, config.entanglement)
        }
    }
}

fn check_features(num_features: usize) -> Result<(), ModelError> {
    if num_features == 0 {
        return Err(ModelError::InvalidConfiguration(
            "feature maps require at least one feature".to_string(),
        ));
    }
    Ok(())
}

/// Basis change so a phase block implemented in Z acts in the basis of the
/// given Pauli character.
fn basis_change(circuit: &mut Circuit, pauli: char, qubit: usize, undo: bool) {
    match pauli {
        'Z' => {}
        'X' => {
            circuit.h(qubit);
        }
        'Y' => {
            let angle = if undo {
                ParamExpr::scaled(-0.5, ParamExpr::Pi)
            } else {
                ParamExpr::scaled(0.5, ParamExpr::Pi)
            };
            circuit.rx(angle, qubit);
        }
        _ => unreachable!("validated pauli character"),
    }
}

/// The Pauli feature map [1].
///
/// Per repetition: a Hadamard layer, then one phase block per Pauli string.
/// Weight-1 strings rotate every qubit by `2·x_i`; weight-2 strings apply
/// `2·(π − x_i)(π − x_j)` across the entanglement pattern, conjugated by a
/// CX so the phase acts on the pair parity. An `I` position contributes no
/// gate (a two-character string with one identity degenerates to a weight-1
/// phase on the remaining qubit). Strings longer than two characters, or
/// containing characters outside {I, X, Y, Z}, are rejected.
pub fn pauli_feature_map(
    num_features: usize,
    reps: usize,
    paulis: &[String],
    entanglement: Entanglement,
) -> Result<Circuit, ModelError> {
    check_features(num_features)?;
    for pauli in paulis {
        let ok_len = pauli.len() == 1 || pauli.len() == 2;
        let ok_chars = pauli.chars().all(|c| matches!(c, 'I' | 'X' | 'Y' | 'Z'));
        if !ok_len || !ok_chars {
            return Err(ModelError::InvalidConfiguration(format!(
                "unsupported Pauli string: {:?}",
                pauli
            )));
        }
    }

    let mut circuit = Circuit::new("pauli", num_features, num_features);
    for rep in 0..reps {
        for i in 0..num_features {
            circuit.h(i);
        }
        for pauli in paulis {
            let chars: Vec<char> = pauli.chars().collect();
            match chars.as_slice() {
                // Identity contributes only global phase: no gates.
                ['I'] => {}
                [c] => {
                    for i in 0..num_features {
                        basis_change(&mut circuit, *c, i, false);
                        circuit.p(ParamExpr::scaled(2.0, ParamExpr::feature(i)), i);
                        basis_change(&mut circuit, *c, i, true);
                    }
                }
                [c0, c1] => {
                    for (i, j) in entanglement_pattern(num_features, entanglement, rep) {
                        if i == j {
                            continue;
                        }
                        match (*c0 != 'I', *c1 != 'I') {
                            (false, false) => {}
                            // One identity position: the block degenerates to
                            // a weight-1 phase on the remaining qubit.
                            (true, false) => {
                                basis_change(&mut circuit, *c0, i, false);
                                circuit.p(ParamExpr::scaled(2.0, ParamExpr::feature(i)), i);
                                basis_change(&mut circuit, *c0, i, true);
                            }
                            (false, true) => {
                                basis_change(&mut circuit, *c1, j, false);
                                circuit.p(ParamExpr::scaled(2.0, ParamExpr::feature(j)), j);
                                basis_change(&mut circuit, *c1, j, true);
                            }
                            (true, true) => {
                                basis_change(&mut circuit, *c0, i, false);
                                basis_change(&mut circuit, *c1, j, false);
                                circuit.cx(i, j);
                                circuit.p(
                                    ParamExpr::scaled(
                                        2.0,
                                        ParamExpr::product(
                                            ParamExpr::pi_minus_feature(i),
                                            ParamExpr::pi_minus_feature(j),
                                        ),
                                    ),
                                    j,
                                );
                                circuit.cx(i, j);
                                basis_change(&mut circuit, *c1, j, true);
                                basis_change(&mut circuit, *c0, i, true);
                            }
                        }
                    }
                }
                _ => unreachable!("validated string length"),
            }
        }
    }
    Ok(circuit)
}

/// The Z feature map: first-order Pauli encoding with no entanglement.
pub fn z_feature_map(num_features: usize, reps: usize) -> Result<Circuit, ModelError> {
    pauli_feature_map(
        num_features,
        reps,
        &["Z".to_string()],
        Entanglement::Linear,
    )
}

/// The ZZ feature map: second-order Pauli encoding [1].
pub fn zz_feature_map(
    num_features: usize,
    reps: usize,
    entanglement: Entanglement,
) -> Result<Circuit, ModelError> {
    pauli_feature_map(
        num_features,
        reps,
        &["Z".to_string(), "ZZ".to_string()],
        entanglement,
    )
}

/// The instantaneous quantum polynomial feature map [2].
pub fn iqp_feature_map(
    num_features: usize,
    reps: usize,
    entanglement: Entanglement,
) -> Result<Circuit, ModelError> {
    check_features(num_features)?;
    let mut circuit = Circuit::new("iqp", num_features, num_features);

    for rep in 0..reps {
        for i in 0..num_features {
            circuit.h(i);
        }
        for i in 0..num_features {
            circuit.rz(ParamExpr::scaled(2.0, ParamExpr::feature(i)), i);
        }
        for (i, j) in entanglement_pattern(num_features, entanglement, rep) {
            if i == j {
                continue;
            }
            circuit.rzz(
                ParamExpr::scaled(
                    2.0,
                    ParamExpr::product(ParamExpr::feature(i), ParamExpr::feature(j)),
                ),
                i,
                j,
            );
        }
        for i in 0..num_features {
            circuit.h(i);
        }
    }
    Ok(circuit)
}

/// The polynomial feature map of [3], section II.C.
///
/// Applies `Ry(x_k)` to each of the feature's qubits; the arcsin of the raw
/// data is offloaded to preprocessing (see `preprocessing::arcsin_transform`).
pub fn polynomial_feature_map(
    num_features: usize,
    qubits_per_feature: usize,
) -> Result<Circuit, ModelError> {
    check_features(num_features)?;
    if qubits_per_feature == 0 {
        return Err(ModelError::InvalidConfiguration(
            "qubits_per_feature must be at least 1".to_string(),
        ));
    }

    let num_qubits = num_features * qubits_per_feature;
    let mut circuit = Circuit::new("polynomial", num_qubits, num_features);
    for k in 0..num_features {
        for i in 0..qubits_per_feature {
            circuit.ry(ParamExpr::feature(k), k * qubits_per_feature + i);
        }
    }
    Ok(circuit)
}

/// The QAOA-inspired feature map [4]: alternating mixer and problem layers
/// over `num_features / 2` qubits, two parameters per qubit.
pub fn qaoa_inspired_feature_map(
    num_features: usize,
    reps: usize,
    entanglement: Entanglement,
) -> Result<Circuit, ModelError> {
    if num_features < 2 {
        return Err(ModelError::InvalidConfiguration(
            "qaoa-inspired feature map requires at least two features".to_string(),
        ));
    }

    let num_qubits = num_features / 2;
    let mut circuit = Circuit::new("qaoa_inspired", num_qubits, num_qubits * 2);

    for i in 0..num_qubits {
        circuit.h(i);
    }
    for rep in 0..reps {
        // Mixer Hamiltonian
        for i in 0..num_qubits {
            circuit.rx(ParamExpr::scaled(2.0, ParamExpr::feature(i)), i);
        }
        // Problem Hamiltonian
        for i in 0..num_qubits {
            circuit.rz(
                ParamExpr::scaled(2.0, ParamExpr::feature(num_qubits + i)),
                i,
            );
        }
        let pattern = entanglement_pattern(num_qubits, entanglement, rep);
        for &(i, j) in pattern.iter().filter(|(i, j)| i != j) {
            circuit.rzz(
                ParamExpr::product(ParamExpr::feature(i), ParamExpr::feature(j)),
                i,
                j,
            );
        }
        for &(i, j) in pattern.iter().filter(|(i, j)| i != j) {
            circuit.rzz(
                ParamExpr::product(
                    ParamExpr::feature(num_qubits + i),
                    ParamExpr::feature(num_qubits + j),
                ),
                i,
                j,
            );
        }
    }
    Ok(circuit)
}

/// The random feature map: encodes the input with randomly placed Hadamards,
/// single-qubit rotations, and CNOTs between ring neighbors. The same seed
/// always produces the same circuit; each feature index is consumed exactly
/// `reps` times as a rotation angle.
pub fn random_feature_map(
    num_features: usize,
    reps: usize,
    seed: Option<u64>,
) -> Result<Circuit, ModelError> {
    check_features(num_features)?;
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let mut circuit = Circuit::new("random", num_features, num_features);

    // A shuffled bag with each feature index repeated `reps` times.
    let mut bag: Vec<usize> = (0..reps).flat_map(|_| 0..num_features).collect();
    bag.shuffle(&mut rng);

    for _ in 0..reps {
        for i in 0..num_features {
            if rng.gen::<f64>() < 0.5 {
                circuit.h(i);
            }
        }

        for i in 0..num_features {
            let p = bag.pop().expect("bag sized as reps * num_features");
            let angle = ParamExpr::scaled(2.0, ParamExpr::feature(p));
            match rng.gen_range(0..3) {
                0 => circuit.rx(angle, i),
                1 => circuit.ry(angle, i),
                _ => circuit.rz(angle, i),
            };
        }

        if num_features >= 2 {
            for i in 0..num_features {
                if rng.gen::<f64>() < 0.5 {
                    let (a, b) = (i, (i + 1) % num_features);
                    if rng.gen::<f64>() < 0.5 {
                        circuit.cx(a, b);
                    } else {
                        circuit.cx(b, a);
                    }
                }
            }
        }

        circuit.barrier();
    }
    Ok(circuit)
}

/// The data re-uploading feature map [5]: the full input vector is rotated
/// in three times per repetition (Rx, Ry, Rz), each upload followed by an
/// entangling CX layer.
pub fn data_reuploading_feature_map(
    num_features: usize,
    reps: usize,
    entanglement: Entanglement,
) -> Result<Circuit, ModelError> {
    check_features(num_features)?;
    let mut circuit = Circuit::new("data_reuploading", num_features, num_features);

    for i in 0..num_features {
        circuit.h(i);
    }
    for rep in 0..reps {
        let pattern: Vec<(usize, usize)> =
            entanglement_pattern(num_features, entanglement, rep)
                .into_iter()
                .filter(|(i, j)| i != j)
                .collect();
        for axis in 0..3 {
            for i in 0..num_features {
                let angle = ParamExpr::feature(i);
                match axis {
                    0 => circuit.rx(angle, i),
                    1 => circuit.ry(angle, i),
                    _ => circuit.rz(angle, i),
                };
            }
            for &(i, j) in &pattern {
                circuit.cx(i, j);
            }
            circuit.barrier();
        }
    }
    Ok(circuit)
}
