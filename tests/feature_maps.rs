//! Integration tests for the feature-map constructors.

use qboost::entanglement::Entanglement;
use qboost::feature_maps::{
    build_feature_map, data_reuploading_feature_map, iqp_feature_map, polynomial_feature_map,
    qaoa_inspired_feature_map, random_feature_map, zz_feature_map, FeatureMapConfig,
    FeatureMapType,
};
use qboost::{Gate, ModelError};

// ---------------------------------------------------------------------------
// Structure and parameter counts
// ---------------------------------------------------------------------------

#[test]
fn iqp_layer_structure() {
    let reps = 2;
    let f = 4;
    let c = iqp_feature_map(f, reps, Entanglement::Linear).unwrap();
    let h = c.gates().iter().filter(|g| matches!(g, Gate::H { .. })).count();
    let rz = c.gates().iter().filter(|g| matches!(g, Gate::Rz { .. })).count();
    let rzz = c.gates().iter().filter(|g| matches!(g, Gate::Rzz { .. })).count();
    // Per rep: H sandwich (2*f), one Rz per qubit, one Rzz per linear pair.
    assert_eq!(h, 2 * f * reps);
    assert_eq!(rz, f * reps);
    assert_eq!(rzz, (f - 1) * reps);
    assert_eq!(c.num_parameters(), f);
}

#[test]
fn polynomial_map_allocates_qubits_per_feature() {
    let c = polynomial_feature_map(3, 2).unwrap();
    assert_eq!(c.num_qubits(), 6);
    assert_eq!(c.num_parameters(), 3);
    let ry = c.gates().iter().filter(|g| matches!(g, Gate::Ry { .. })).count();
    assert_eq!(ry, 6);
}

#[test]
fn qaoa_map_requires_two_features() {
    assert!(matches!(
        qaoa_inspired_feature_map(1, 1, Entanglement::Linear),
        Err(ModelError::InvalidConfiguration(_))
    ));
}

#[test]
fn data_reuploading_uploads_three_axes_per_rep() {
    let c = data_reuploading_feature_map(3, 2, Entanglement::Linear).unwrap();
    let barriers = c.gates().iter().filter(|g| matches!(g, Gate::Barrier)).count();
    assert_eq!(barriers, 6);
    let rx = c.gates().iter().filter(|g| matches!(g, Gate::Rx { .. })).count();
    assert_eq!(rx, 6);
    assert_eq!(c.num_parameters(), 3);
}

#[test]
fn zz_map_uses_requested_entanglement() {
    let full = zz_feature_map(4, 1, Entanglement::Full).unwrap();
    let linear = zz_feature_map(4, 1, Entanglement::Linear).unwrap();
    let count = |c: &qboost::Circuit| {
        c.gates()
            .iter()
            .filter(|g| matches!(g, Gate::Cx { .. }))
            .count()
    };
    // 6 pairs vs 3 pairs, two CX per pair.
    assert_eq!(count(&full), 12);
    assert_eq!(count(&linear), 6);
}

// ---------------------------------------------------------------------------
// Pauli identity positions
// ---------------------------------------------------------------------------

#[test]
fn identity_position_degenerates_to_single_qubit_phase() {
    use qboost::feature_maps::pauli_feature_map;
    // "IZ" over the single linear pair (0, 1) acts only on qubit 1, with no
    // entangler.
    let c = pauli_feature_map(2, 1, &["IZ".to_string()], Entanglement::Linear).unwrap();
    let cx = c.gates().iter().filter(|g| matches!(g, Gate::Cx { .. })).count();
    assert_eq!(cx, 0);
    let phases: Vec<usize> = c
        .gates()
        .iter()
        .filter_map(|g| match g {
            Gate::P { qubit, .. } => Some(*qubit),
            _ => None,
        })
        .collect();
    assert_eq!(phases, vec![1]);
}

#[test]
fn all_identity_string_adds_no_gates_beyond_hadamards() {
    use qboost::feature_maps::pauli_feature_map;
    let c = pauli_feature_map(2, 1, &["II".to_string()], Entanglement::Linear).unwrap();
    assert!(c.gates().iter().all(|g| matches!(g, Gate::H { .. })));
    let single = pauli_feature_map(2, 1, &["I".to_string()], Entanglement::Linear).unwrap();
    assert!(single.gates().iter().all(|g| matches!(g, Gate::H { .. })));
}

// ---------------------------------------------------------------------------
// Random map determinism
// ---------------------------------------------------------------------------

#[test]
fn random_map_is_reproducible_for_a_seed() {
    let a = random_feature_map(4, 2, Some(99)).unwrap();
    let b = random_feature_map(4, 2, Some(99)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn random_map_varies_across_seeds() {
    let a = random_feature_map(6, 3, Some(1)).unwrap();
    let b = random_feature_map(6, 3, Some(2)).unwrap();
    assert_ne!(a.gates(), b.gates());
}

// ---------------------------------------------------------------------------
// Factory and config
// ---------------------------------------------------------------------------

#[test]
fn factory_builds_every_map_type() {
    let config = FeatureMapConfig {
        seed: Some(7),
        ..FeatureMapConfig::default()
    };
    for map_type in [
        FeatureMapType::Pauli,
        FeatureMapType::Z,
        FeatureMapType::Zz,
        FeatureMapType::Iqp,
        FeatureMapType::Polynomial,
        FeatureMapType::QaoaInspired,
        FeatureMapType::Random,
        FeatureMapType::DataReuploading,
    ] {
        let circuit = build_feature_map(map_type, 4, &config).unwrap();
        assert!(circuit.num_qubits() >= 1);
        assert!(!circuit.gates().is_empty());
    }
}

#[test]
fn map_type_tags_parse() {
    assert_eq!(
        "data_reuploading".parse::<FeatureMapType>().unwrap(),
        FeatureMapType::DataReuploading
    );
    assert_eq!(
        "QAOA".parse::<FeatureMapType>().unwrap(),
        FeatureMapType::QaoaInspired
    );
    assert!("teleport".parse::<FeatureMapType>().is_err());
}

#[test]
fn config_round_trips_through_serde() {
    let config = FeatureMapConfig {
        reps: 3,
        entanglement: Entanglement::Sca,
        seed: Some(11),
        ..FeatureMapConfig::default()
    };
    let json = serde_json::to_string(&config).unwrap();
    let back: FeatureMapConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.reps, 3);
    assert_eq!(back.entanglement, Entanglement::Sca);
    assert_eq!(back.seed, Some(11));
}
