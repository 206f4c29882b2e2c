//! Trainable parameters and parameter groups.
//!
//! Every [`Parameter`] carries a [`ParamId`] drawn from a process-wide counter
//! when it is created. Optimizer state (momentum buffers, slow weights, ...) is
//! keyed by that id, so it follows the parameter itself rather than its value,
//! its name or its position inside a group.

use scirs2_core::ndarray::Array2;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_PARAM_ID: AtomicU64 = AtomicU64::new(0);

/// Stable identity of a [`Parameter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(u64);

impl ParamId {
    fn next() -> Self {
        Self(NEXT_PARAM_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value of the id.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// A trainable tensor together with its (optional) gradient.
///
/// `Parameter` is deliberately not `Clone`: two values with the same id would
/// share optimizer state.
#[derive(Debug)]
pub struct Parameter {
    id: ParamId,
    name: String,
    /// Current (fast) value.
    pub data: Array2<f64>,
    /// Gradient written by the loss closure, if any.
    pub grad: Option<Array2<f64>>,
}

impl Parameter {
    /// Create a new parameter with a fresh identity and no gradient.
    pub fn new(name: impl Into<String>, data: Array2<f64>) -> Self {
        Self {
            id: ParamId::next(),
            name: name.into(),
            data,
            grad: None,
        }
    }

    /// Identity of this parameter.
    pub fn id(&self) -> ParamId {
        self.id
    }

    /// Human-readable name, used in error messages and logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shape of the parameter as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Store a gradient for the next optimizer step.
    pub fn set_grad(&mut self, grad: Array2<f64>) {
        self.grad = Some(grad);
    }

    /// Drop the stored gradient.
    pub fn zero_grad(&mut self) {
        self.grad = None;
    }
}

/// A set of parameters sharing optimizer hyperparameters.
#[derive(Debug, Default)]
pub struct ParamGroup {
    /// Parameters in this group.
    pub params: Vec<Parameter>,
    /// Learning rate override; filled with the optimizer default on registration.
    pub lr: Option<f64>,
}

impl ParamGroup {
    /// Create a group that uses the optimizer's default learning rate.
    pub fn new(params: Vec<Parameter>) -> Self {
        Self { params, lr: None }
    }

    /// Set a group-specific learning rate.
    pub fn with_lr(mut self, lr: f64) -> Self {
        self.lr = Some(lr);
        self
    }

    /// Number of parameters in the group.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the group holds no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Look up a parameter of this group by id.
    pub fn get(&self, id: ParamId) -> Option<&Parameter> {
        self.params.iter().find(|p| p.id() == id)
    }
}

/// Find a parameter by id across all groups.
pub fn find_parameter(groups: &[ParamGroup], id: ParamId) -> Option<&Parameter> {
    groups.iter().find_map(|group| group.get(id))
}

/// Mutable variant of [`find_parameter`].
pub fn find_parameter_mut(groups: &mut [ParamGroup], id: ParamId) -> Option<&mut Parameter> {
    groups
        .iter_mut()
        .flat_map(|group| group.params.iter_mut())
        .find(|p| p.id() == id)
}
