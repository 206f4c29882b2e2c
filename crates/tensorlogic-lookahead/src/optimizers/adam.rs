//! Adam optimizer (Adaptive Moment Estimation).
//!
//! Adam combines the benefits of AdaGrad and RMSProp by maintaining both
//! first-order (momentum) and second-order moment estimates of gradients.
//!
//! Reference: Kingma & Ba, "Adam: A Method for Stochastic Optimization", ICLR 2015

use super::common::{
    clip_gradients, collect_gradients, evaluate_closure, register_group, Closure, Optimizer,
    OptimizerConfig,
};
use crate::param::{ParamGroup, ParamId};
use crate::TrainResult;
use scirs2_core::ndarray::{Array, Array2};
use std::collections::HashMap;

/// Adam optimizer.
#[derive(Debug)]
pub struct AdamOptimizer {
    config: OptimizerConfig,
    param_groups: Vec<ParamGroup>,
    /// First moment estimates (exponential moving average of gradients).
    m: HashMap<ParamId, Array2<f64>>,
    /// Second moment estimates (exponential moving average of squared gradients).
    v: HashMap<ParamId, Array2<f64>>,
    /// Timestep counter.
    t: usize,
}

impl AdamOptimizer {
    /// Create a new Adam optimizer over the given parameter groups.
    pub fn new(config: OptimizerConfig, param_groups: Vec<ParamGroup>) -> Self {
        let default_lr = config.learning_rate;
        Self {
            config,
            param_groups: param_groups
                .into_iter()
                .map(|group| register_group(group, default_lr))
                .collect(),
            m: HashMap::new(),
            v: HashMap::new(),
            t: 0,
        }
    }

    /// Number of updates performed so far.
    pub fn timestep(&self) -> usize {
        self.t
    }
}

impl Optimizer for AdamOptimizer {
    fn step(&mut self, closure: Option<Closure<'_>>) -> TrainResult<Option<f64>> {
        let loss = evaluate_closure(&mut self.param_groups, closure)?;

        let mut gradients = collect_gradients(&self.param_groups)?;
        clip_gradients(&self.config, &mut gradients);

        self.t += 1;
        let beta1 = self.config.beta1;
        let beta2 = self.config.beta2;
        let eps = self.config.epsilon;
        let bias_correction =
            (1.0 - beta2.powi(self.t as i32)).sqrt() / (1.0 - beta1.powi(self.t as i32));

        for group in &mut self.param_groups {
            let lr_t = group.lr.unwrap_or(self.config.learning_rate) * bias_correction;
            for param in &mut group.params {
                let Some(grad) = gradients.get(&param.id()) else {
                    continue;
                };
                let m = self
                    .m
                    .entry(param.id())
                    .or_insert_with(|| Array::zeros(param.data.raw_dim()));
                let v = self
                    .v
                    .entry(param.id())
                    .or_insert_with(|| Array::zeros(param.data.raw_dim()));

                *m = &*m * beta1 + &(grad * (1.0 - beta1));
                let grad_squared = grad.mapv(|g| g * g);
                *v = &*v * beta2 + &(grad_squared * (1.0 - beta2));

                let update = m.mapv(|m_val| m_val * lr_t) / &v.mapv(|v_val| v_val.sqrt() + eps);
                param.data -= &update;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param::Parameter;
    use scirs2_core::ndarray::array;

    #[test]
    fn test_adam_optimizer() {
        let config = OptimizerConfig {
            learning_rate: 0.001,
            ..Default::default()
        };
        let mut w = Parameter::new("w", array![[1.0, 2.0], [3.0, 4.0]]);
        w.set_grad(array![[0.1, 0.2], [0.3, 0.4]]);
        let mut optimizer = AdamOptimizer::new(config, vec![ParamGroup::new(vec![w])]);

        optimizer.step(None).unwrap();
        assert_eq!(optimizer.timestep(), 1);

        let w = &optimizer.param_groups()[0].params[0].data;
        assert!(w[[0, 0]] < 1.0);
        assert!(w[[1, 1]] < 4.0);
    }

    #[test]
    fn test_adam_first_step_magnitude() {
        // With bias correction the first update has magnitude ~lr per element.
        let config = OptimizerConfig {
            learning_rate: 0.01,
            ..Default::default()
        };
        let mut w = Parameter::new("w", array![[0.0]]);
        w.set_grad(array![[5.0]]);
        let mut optimizer = AdamOptimizer::new(config, vec![ParamGroup::new(vec![w])]);
        optimizer.step(None).unwrap();
        let value = optimizer.param_groups()[0].params[0].data[[0, 0]];
        assert!((value + 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_adam_closure() {
        let config = OptimizerConfig {
            learning_rate: 0.1,
            ..Default::default()
        };
        let w = Parameter::new("w", array![[3.0]]);
        let mut optimizer = AdamOptimizer::new(config, vec![ParamGroup::new(vec![w])]);
        let mut closure = |groups: &mut [ParamGroup]| -> TrainResult<f64> {
            let p = &mut groups[0].params[0];
            let x = p.data[[0, 0]];
            p.set_grad(array![[2.0 * x]]);
            Ok(x * x)
        };
        let mut last_loss = f64::INFINITY;
        for _ in 0..20 {
            let loss = optimizer.step(Some(&mut closure)).unwrap().unwrap();
            assert!(loss <= last_loss + 1e-9);
            last_loss = loss;
        }
        assert!(optimizer.param_groups()[0].params[0].data[[0, 0]] < 3.0);
    }
}
