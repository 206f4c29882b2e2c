//! Common optimizer utilities and traits.

use crate::error::ensure_same_shape;
use crate::param::{ParamGroup, ParamId};
use crate::TrainResult;
use scirs2_core::ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Loss/gradient closure handed to [`Optimizer::step`].
///
/// The closure re-evaluates the objective, writes `Parameter::grad` for every
/// parameter it differentiates and returns the loss.
pub type Closure<'a> = &'a mut dyn FnMut(&mut [ParamGroup]) -> TrainResult<f64>;

/// Compute the global L2 norm of all gradients.
///
/// # Arguments
/// * `gradients` - Gradients for all parameters
///
/// # Returns
/// The L2 norm of all gradients combined
pub fn compute_gradient_norm(gradients: &HashMap<ParamId, Array2<f64>>) -> f64 {
    let mut total_norm_sq = 0.0;

    for grad in gradients.values() {
        for &g in grad.iter() {
            total_norm_sq += g * g;
        }
    }

    total_norm_sq.sqrt()
}

/// Gradient clipping mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GradClipMode {
    /// Clip by value (element-wise).
    Value,
    /// Clip by global L2 norm.
    Norm,
}

/// Configuration for the base optimizers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Default learning rate, copied into groups that do not set their own.
    pub learning_rate: f64,
    /// Momentum (for SGD).
    pub momentum: f64,
    /// Beta1 (for Adam).
    pub beta1: f64,
    /// Beta2 (for Adam).
    pub beta2: f64,
    /// Epsilon for numerical stability.
    pub epsilon: f64,
    /// Gradient clipping threshold (None = no clipping).
    pub grad_clip: Option<f64>,
    /// Gradient clipping mode.
    pub grad_clip_mode: GradClipMode,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.001,
            momentum: 0.9,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
            grad_clip: None,
            grad_clip_mode: GradClipMode::Value,
        }
    }
}

/// Trait for optimizers.
///
/// Parameters live inside the optimizer's groups; callers reach them through
/// [`param_groups`](Optimizer::param_groups) and
/// [`param_groups_mut`](Optimizer::param_groups_mut).
pub trait Optimizer {
    /// Perform one update.
    ///
    /// When a closure is given it is called first and its loss is returned;
    /// otherwise the gradients already stored on the parameters are used and
    /// `None` is returned.
    fn step(&mut self, closure: Option<Closure<'_>>) -> TrainResult<Option<f64>>;

    /// Parameter groups managed by this optimizer.
    fn param_groups(&self) -> &[ParamGroup];

    /// Mutable access to the parameter groups (e.g. for schedulers).
    fn param_groups_mut(&mut self) -> &mut [ParamGroup];

    /// Register an additional parameter group.
    fn add_param_group(&mut self, group: ParamGroup);

    /// Zero all gradients.
    fn zero_grad(&mut self) {
        for group in self.param_groups_mut() {
            for param in &mut group.params {
                param.zero_grad();
            }
        }
    }

    /// Get current learning rate.
    fn get_lr(&self) -> f64;

    /// Set learning rate on every group.
    fn set_lr(&mut self, lr: f64);
}

/// Fill in group defaults before a group is handed to an optimizer.
pub(crate) fn register_group(mut group: ParamGroup, default_lr: f64) -> ParamGroup {
    group.lr.get_or_insert(default_lr);
    group
}

/// Run the closure, if any, over the groups.
pub(crate) fn evaluate_closure(
    groups: &mut [ParamGroup],
    closure: Option<Closure<'_>>,
) -> TrainResult<Option<f64>> {
    match closure {
        Some(f) => f(groups).map(Some),
        None => Ok(None),
    }
}

/// Collect the gradients of all parameters that have one, checking shapes.
pub(crate) fn collect_gradients(
    groups: &[ParamGroup],
) -> TrainResult<HashMap<ParamId, Array2<f64>>> {
    let mut gradients = HashMap::new();
    for group in groups {
        for param in &group.params {
            if let Some(grad) = &param.grad {
                ensure_same_shape(param.name(), param.shape(), grad.dim())?;
                gradients.insert(param.id(), grad.clone());
            }
        }
    }
    Ok(gradients)
}

/// Apply gradient clipping if configured.
pub(crate) fn clip_gradients(
    config: &OptimizerConfig,
    gradients: &mut HashMap<ParamId, Array2<f64>>,
) {
    if let Some(clip_value) = config.grad_clip {
        match config.grad_clip_mode {
            GradClipMode::Value => {
                for grad in gradients.values_mut() {
                    grad.mapv_inplace(|g| g.max(-clip_value).min(clip_value));
                }
            }
            GradClipMode::Norm => {
                let total_norm = compute_gradient_norm(gradients);
                if total_norm > clip_value {
                    let scale = clip_value / total_norm;
                    for grad in gradients.values_mut() {
                        grad.mapv_inplace(|g| g * scale);
                    }
                }
            }
        }
    }
}
