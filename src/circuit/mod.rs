//! Lightweight parameterized-circuit description.
//!
//! A `Circuit` is an ordered gate list over a fixed qubit register, with
//! angles given as `ParamExpr` trees over feature indices. It is a data
//! description consumed by an external overlap/fidelity engine; this crate
//! does not simulate it.

pub mod parameter;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

pub use parameter::ParamExpr;

/// A single gate application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gate {
    H { qubit: usize },
    Rx { theta: ParamExpr, qubit: usize },
    Ry { theta: ParamExpr, qubit: usize },
    Rz { theta: ParamExpr, qubit: usize },
    /// Phase gate.
    P { theta: ParamExpr, qubit: usize },
    Cx { control: usize, target: usize },
    /// Two-qubit ZZ rotation.
    Rzz { theta: ParamExpr, qubit_a: usize, qubit_b: usize },
    /// Layer separator; no quantum semantics.
    Barrier,
}

/// An immutable-once-built parameterized circuit: a named gate sequence
/// over `num_qubits` qubits with `num_parameters` free parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    name: String,
    num_qubits: usize,
    num_parameters: usize,
    gates: Vec<Gate>,
}

impl Circuit {
    pub fn new(name: impl Into<String>, num_qubits: usize, num_parameters: usize) -> Self {
        Circuit {
            name: name.into(),
            num_qubits,
            num_parameters,
            gates: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of free parameters a binding vector must supply.
    pub fn num_parameters(&self) -> usize {
        self.num_parameters
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    #[inline]
    fn check_qubit(&self, qubit: usize) {
        assert!(
            qubit < self.num_qubits,
            "qubit {} out of range for {}-qubit circuit",
            qubit,
            self.num_qubits
        );
    }

    pub fn h(&mut self, qubit: usize) -> &mut Self {
        self.check_qubit(qubit);
        self.gates.push(Gate::H { qubit });
        self
    }

    pub fn rx(&mut self, theta: ParamExpr, qubit: usize) -> &mut Self {
        self.check_qubit(qubit);
        self.gates.push(Gate::Rx { theta, qubit });
        self
    }

    pub fn ry(&mut self, theta: ParamExpr, qubit: usize) -> &mut Self {
        self.check_qubit(qubit);
        self.gates.push(Gate::Ry { theta, qubit });
        self
    }

    pub fn rz(&mut self, theta: ParamExpr, qubit: usize) -> &mut Self {
        self.check_qubit(qubit);
        self.gates.push(Gate::Rz { theta, qubit });
        self
    }

    pub fn p(&mut self, theta: ParamExpr, qubit: usize) -> &mut Self {
        self.check_qubit(qubit);
        self.gates.push(Gate::P { theta, qubit });
        self
    }

    pub fn cx(&mut self, control: usize, target: usize) -> &mut Self {
        self.check_qubit(control);
        self.check_qubit(target);
        assert!(control != target, "cx control and target must differ");
        self.gates.push(Gate::Cx { control, target });
        self
    }

    pub fn rzz(&mut self, theta: ParamExpr, qubit_a: usize, qubit_b: usize) -> &mut Self {
        self.check_qubit(qubit_a);
        self.check_qubit(qubit_b);
        assert!(qubit_a != qubit_b, "rzz qubits must differ");
        self.gates.push(Gate::Rzz { theta, qubit_a, qubit_b });
        self
    }

    pub fn barrier(&mut self) -> &mut Self {
        self.gates.push(Gate::Barrier);
        self
    }

    /// Bind a parameter vector, producing a circuit whose angles are all
    /// concrete constants.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if `params` does not hold exactly `num_parameters`
    /// values.
    pub fn bind(&self, params: &[f64]) -> Result<Circuit, ModelError> {
        if params.len() != self.num_parameters {
            return Err(ModelError::shape(
                format!("{} parameters", self.num_parameters),
                format!("{} parameters", params.len()),
            ));
        }
        let gates = self
            .gates
            .iter()
            .map(|g| match g {
                Gate::Rx { theta, qubit } => Gate::Rx { theta: theta.bind(params), qubit: *qubit },
                Gate::Ry { theta, qubit } => Gate::Ry { theta: theta.bind(params), qubit: *qubit },
                Gate::Rz { theta, qubit } => Gate::Rz { theta: theta.bind(params), qubit: *qubit },
                Gate::P { theta, qubit } => Gate::P { theta: theta.bind(params), qubit: *qubit },
                Gate::Rzz { theta, qubit_a, qubit_b } => Gate::Rzz {
                    theta: theta.bind(params),
                    qubit_a: *qubit_a,
                    qubit_b: *qubit_b,
                },
                other => other.clone(),
            })
            .collect();
        Ok(Circuit {
            name: self.name.clone(),
            num_qubits: self.num_qubits,
            num_parameters: 0,
            gates,
        })
    }
}
