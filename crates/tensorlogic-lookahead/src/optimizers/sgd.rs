//! SGD optimizer with momentum.

use super::common::{
    clip_gradients, collect_gradients, evaluate_closure, register_group, Closure, Optimizer,
    OptimizerConfig,
};
use crate::param::{ParamGroup, ParamId};
use crate::TrainResult;
use scirs2_core::ndarray::{Array, Array2};
use std::collections::HashMap;

/// SGD optimizer with momentum.
#[derive(Debug)]
pub struct SgdOptimizer {
    config: OptimizerConfig,
    param_groups: Vec<ParamGroup>,
    /// Momentum buffers for each parameter.
    velocity: HashMap<ParamId, Array2<f64>>,
}

impl SgdOptimizer {
    /// Create a new SGD optimizer over the given parameter groups.
    pub fn new(config: OptimizerConfig, param_groups: Vec<ParamGroup>) -> Self {
        let default_lr = config.learning_rate;
        Self {
            config,
            param_groups: param_groups
                .into_iter()
                .map(|group| register_group(group, default_lr))
                .collect(),
            velocity: HashMap::new(),
        }
    }

    /// Optimizer configuration.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }
}

impl Optimizer for SgdOptimizer {
    fn step(&mut self, closure: Option<Closure<'_>>) -> TrainResult<Option<f64>> {
        let loss = evaluate_closure(&mut self.param_groups, closure)?;

        let mut gradients = collect_gradients(&self.param_groups)?;
        clip_gradients(&self.config, &mut gradients);

        let momentum = self.config.momentum;
        for group in &mut self.param_groups {
            let lr = group.lr.unwrap_or(self.config.learning_rate);
            for param in &mut group.params {
                let Some(grad) = gradients.get(&param.id()) else {
                    continue;
                };

                let velocity = self
                    .velocity
                    .entry(param.id())
                    .or_insert_with(|| Array::zeros(param.data.raw_dim()));

                // v = momentum * v + lr * grad
                velocity.mapv_inplace(|v| momentum * v);
                velocity.scaled_add(lr, grad);

                // param = param - v
                param.data -= &*velocity;
            }
        }

        Ok(loss)
    }

    fn param_groups(&self) -> &[ParamGroup] {
        &self.param_groups
    }

    fn param_groups_mut(&mut self) -> &mut [ParamGroup] {
        &mut self.param_groups
    }

    fn add_param_group(&mut self, group: ParamGroup) {
        self.param_groups
            .push(register_group(group, self.config.learning_rate));
    }

    fn get_lr(&self) -> f64 {
        self.param_groups
            .first()
            .and_then(|group| group.lr)
            .unwrap_or(self.config.learning_rate)
    }

    fn set_lr(&mut self, lr: f64) {
        self.config.learning_rate = lr;
        for group in &mut self.param_groups {
            group.lr = Some(lr);
        }
    }
}
