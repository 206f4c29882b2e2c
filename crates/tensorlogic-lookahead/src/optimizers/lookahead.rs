//! Lookahead optimizer (wrapper that uses slow and fast weights).
//!
//! Lookahead maintains two sets of weights: fast weights updated by an inner optimizer,
//! and slow weights that are periodically updated as an exponential moving average.
//!
//! Reference: Zhang et al., "Lookahead Optimizer: k steps forward, 1 step back", NeurIPS 2019

use super::common::{Closure, Optimizer};
use super::slow_state::SlowStateTable;
use crate::error::ensure_same_shape;
use crate::param::{ParamGroup, ParamId, Parameter};
use crate::{TrainError, TrainResult};
use scirs2_core::ndarray::{Array, Array2};
use serde::{Deserialize, Serialize};

/// Configuration for [`LookaheadOptimizer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookaheadConfig {
    /// Interpolation coefficient (fraction of the slow→fast distance moved per sync).
    pub alpha: f64,
    /// Automatic synchronization period; `None` means synchronize only on demand.
    pub auto_k: Option<usize>,
}

impl Default for LookaheadConfig {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            auto_k: None,
        }
    }
}

impl LookaheadConfig {
    /// Set the interpolation coefficient.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Synchronize automatically every `k` steps.
    pub fn with_auto_k(mut self, k: usize) -> Self {
        self.auto_k = Some(k);
        self
    }

    /// Check that `alpha` lies in (0, 1] and that `auto_k`, if set, is positive.
    ///
    /// [`LookaheadOptimizer`] never calls this itself.
    pub fn validate(&self) -> TrainResult<()> {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(TrainError::InvalidParameter(format!(
                "alpha must be in (0, 1], got {}",
                self.alpha
            )));
        }
        if self.auto_k == Some(0) {
            return Err(TrainError::InvalidParameter(
                "auto_k must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> TrainResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| TrainError::ConfigError(format!("Invalid lookahead config: {}", e)))
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> TrainResult<String> {
        serde_json::to_string(self)
            .map_err(|e| TrainError::ConfigError(format!("Failed to serialize config: {}", e)))
    }
}

/// Lookahead optimizer (wrapper that uses slow and fast weights).
///
/// The wrapper owns the inner optimizer and keeps one slow weight per parameter,
/// keyed by [`ParamId`]. Slow weights are seeded from the parameters when the
/// wrapper is built. Synchronization
///
/// ```text
/// slow <- slow + alpha * (fast - slow)
/// fast <- slow
/// ```
///
/// runs on every `auto_k`-th call to [`step`](Optimizer::step) (calls counted
/// from 1), or whenever [`lookahead_step`](Self::lookahead_step) is called.
/// With `auto_k = None` the wrapper never synchronizes on its own.
///
/// Neither `alpha` nor `auto_k` is validated; use [`LookaheadConfig::validate`]
/// for an early check.
#[derive(Debug)]
pub struct LookaheadOptimizer<O: Optimizer> {
    /// Inner optimizer for fast weights.
    inner_optimizer: O,
    /// Slow weights (maintained separately).
    slow_state: SlowStateTable,
    /// Interpolation coefficient (typically 0.5).
    alpha: f64,
    /// Number of inner optimizer steps between automatic synchronizations.
    auto_k: Option<usize>,
    /// Steps taken in automatic mode.
    step_counter: usize,
    /// Synchronizations performed so far.
    sync_count: usize,
}

impl<O: Optimizer> LookaheadOptimizer<O> {
    /// Create a new Lookahead optimizer and seed the slow weights.
    ///
    /// # Arguments
    /// * `inner_optimizer` - The inner optimizer (e.g., Adam, SGD)
    /// * `alpha` - Interpolation coefficient for slow weight update (typically 0.5)
    /// * `auto_k` - Steps between automatic synchronizations, or `None` for manual mode
    pub fn new(inner_optimizer: O, alpha: f64, auto_k: Option<usize>) -> Self {
        let mut optimizer = Self {
            inner_optimizer,
            slow_state: SlowStateTable::new(),
            alpha,
            auto_k,
            step_counter: 0,
            sync_count: 0,
        };
        optimizer.reset_lookahead();
        optimizer
    }

    /// Create a Lookahead optimizer from a [`LookaheadConfig`].
    pub fn with_config(inner_optimizer: O, config: LookaheadConfig) -> Self {
        Self::new(inner_optimizer, config.alpha, config.auto_k)
    }

    /// Create a Lookahead optimizer with `alpha = 0.5` in manual mode.
    pub fn with_defaults(inner_optimizer: O) -> Self {
        Self::with_config(inner_optimizer, LookaheadConfig::default())
    }

    /// Overwrite every slow weight with a copy of its current fast weight.
    ///
    /// Any previous slow trajectory is discarded.
    pub fn reset_lookahead(&mut self) {
        let mut count = 0;
        for group in self.inner_optimizer.param_groups() {
            for fast in &group.params {
                self.slow_state.insert(fast.id(), fast.data.clone());
                count += 1;
            }
        }
        tracing::debug!(params = count, "lookahead slow weights reset");
    }

    /// Priming step: restart every slow weight from zero and interpolate once.
    ///
    /// Since the slow weight starts at zero this leaves both slow and fast
    /// weights at `alpha * fast`. Uses the configured `alpha` unless one is
    /// given. Never called by [`step`](Optimizer::step).
    pub fn init_lookahead_step(&mut self, alpha: Option<f64>) -> TrainResult<()> {
        let alpha = alpha.unwrap_or(self.alpha);
        let mut count = 0;
        for group in self.inner_optimizer.param_groups_mut() {
            for fast in &mut group.params {
                let slow = self
                    .slow_state
                    .insert(fast.id(), Array::zeros(fast.data.raw_dim()));
                interpolate(fast, slow, alpha)?;
                count += 1;
            }
        }
        tracing::debug!(alpha, params = count, "lookahead priming step");
        Ok(())
    }

    /// Synchronize slow and fast weights using the configured `alpha`.
    ///
    /// Parameters seen for the first time get a slow weight equal to their
    /// current value before interpolating.
    pub fn lookahead_step(&mut self) -> TrainResult<()> {
        let alpha = self.alpha;
        let mut count = 0;
        for group in self.inner_optimizer.param_groups_mut() {
            for fast in &mut group.params {
                let slow = self
                    .slow_state
                    .get_or_insert_with(fast.id(), || fast.data.clone());
                interpolate(fast, slow, alpha)?;
                count += 1;
            }
        }
        self.sync_count += 1;
        tracing::debug!(
            sync = self.sync_count,
            step = self.step_counter,
            alpha,
            params = count,
            "lookahead synchronization"
        );
        Ok(())
    }

    /// Interpolation coefficient.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Change the interpolation coefficient.
    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    /// Automatic synchronization period.
    pub fn auto_k(&self) -> Option<usize> {
        self.auto_k
    }

    /// Switch between automatic (`Some(k)`) and manual (`None`) mode.
    ///
    /// The step counter is kept.
    pub fn set_auto_k(&mut self, auto_k: Option<usize>) {
        self.auto_k = auto_k;
    }

    /// Number of steps counted in automatic mode.
    pub fn step_counter(&self) -> usize {
        self.step_counter
    }

    /// Number of synchronizations performed, automatic or manual.
    pub fn sync_count(&self) -> usize {
        self.sync_count
    }

    /// Slow weight of a parameter, if one exists.
    pub fn slow_weights(&self, id: ParamId) -> Option<&Array2<f64>> {
        self.slow_state.get(id)
    }

    /// Number of parameters with a slow weight.
    pub fn num_slow_weights(&self) -> usize {
        self.slow_state.len()
    }

    /// The full slow-weight table.
    pub fn slow_state(&self) -> &SlowStateTable {
        &self.slow_state
    }

    /// The wrapped optimizer.
    pub fn inner(&self) -> &O {
        &self.inner_optimizer
    }

    /// The wrapped optimizer, mutably.
    pub fn inner_mut(&mut self) -> &mut O {
        &mut self.inner_optimizer
    }

    /// Unwrap, returning the inner optimizer and dropping the slow weights.
    pub fn into_inner(self) -> O {
        self.inner_optimizer
    }
}

/// `slow <- slow + alpha * (fast - slow)`, then `fast <- slow`.
fn interpolate(fast: &mut Parameter, slow: &mut Array2<f64>, alpha: f64) -> TrainResult<()> {
    ensure_same_shape(fast.name(), fast.shape(), slow.dim())?;
    let diff = &fast.data - &*slow;
    slow.scaled_add(alpha, &diff);
    fast.data.assign(slow);
    Ok(())
}

impl<O: Optimizer> Optimizer for LookaheadOptimizer<O> {
    fn step(&mut self, closure: Option<Closure<'_>>) -> TrainResult<Option<f64>> {
        let loss = self.inner_optimizer.step(closure)?;

        if let Some(k) = self.auto_k {
            let next = self.step_counter + 1;
            let phase = next.checked_rem(k).ok_or_else(|| {
                TrainError::InvalidParameter("auto_k must be at least 1".to_string())
            })?;
            if phase == 0 {
                self.lookahead_step()?;
            }
            self.step_counter = next;
        }

        tracing::trace!(step = self.step_counter, loss = ?loss, "lookahead step");
        Ok(loss)
    }

    fn param_groups(&self) -> &[ParamGroup] {
        self.inner_optimizer.param_groups()
    }

    fn param_groups_mut(&mut self) -> &mut [ParamGroup] {
        self.inner_optimizer.param_groups_mut()
    }

    fn add_param_group(&mut self, group: ParamGroup) {
        self.inner_optimizer.add_param_group(group);
    }

    fn zero_grad(&mut self) {
        self.inner_optimizer.zero_grad();
    }

    fn get_lr(&self) -> f64 {
        self.inner_optimizer.get_lr()
    }

    fn set_lr(&mut self, lr: f64) {
        self.inner_optimizer.set_lr(lr);
    }
}

#[cfg(test)]
mod tests {
    use super::super::adam::AdamOptimizer;
    use super::super::common::OptimizerConfig;
    use super::super::sgd::SgdOptimizer;
    use super::*;
    use scirs2_core::ndarray::array;

    /// Base optimizer that leaves parameters alone and reports a fixed loss.
    #[derive(Debug)]
    struct ConstantOptimizer {
        param_groups: Vec<ParamGroup>,
        steps: usize,
        fail: bool,
    }

    impl ConstantOptimizer {
        fn new(params: Vec<Parameter>) -> Self {
            Self {
                param_groups: vec![ParamGroup::new(params)],
                steps: 0,
                fail: false,
            }
        }
    }

    impl Optimizer for ConstantOptimizer {
        fn step(&mut self, _closure: Option<Closure<'_>>) -> TrainResult<Option<f64>> {
            if self.fail {
                return Err(TrainError::OptimizerError("diverged".to_string()));
            }
            self.steps += 1;
            Ok(Some(1.5))
        }

        fn param_groups(&self) -> &[ParamGroup] {
            &self.param_groups
        }

        fn param_groups_mut(&mut self) -> &mut [ParamGroup] {
            &mut self.param_groups
        }

        fn add_param_group(&mut self, group: ParamGroup) {
            self.param_groups.push(group);
        }

        fn get_lr(&self) -> f64 {
            0.0
        }

        fn set_lr(&mut self, _lr: f64) {}
    }

    fn plain_sgd(lr: f64, params: Vec<Parameter>) -> SgdOptimizer {
        let config = OptimizerConfig {
            learning_rate: lr,
            momentum: 0.0,
            ..Default::default()
        };
        SgdOptimizer::new(config, vec![ParamGroup::new(params)])
    }

    fn fast_value<O: Optimizer>(optimizer: &O) -> f64 {
        optimizer.param_groups()[0].params[0].data[[0, 0]]
    }

    #[test]
    fn test_construction_seeds_slow_weights() {
        let w = Parameter::new("w", array![[1.0, 2.0], [3.0, 4.0]]);
        let b = Parameter::new("b", array![[0.5]]);
        let (w_id, b_id) = (w.id(), b.id());
        let optimizer = LookaheadOptimizer::new(ConstantOptimizer::new(vec![w, b]), 0.5, None);

        assert_eq!(optimizer.num_slow_weights(), 2);
        for group in optimizer.param_groups() {
            for p in &group.params {
                assert_eq!(optimizer.slow_weights(p.id()).unwrap(), &p.data);
            }
        }
        assert!(optimizer.slow_weights(w_id).is_some());
        assert!(optimizer.slow_weights(b_id).is_some());
        assert_eq!(optimizer.step_counter(), 0);
        assert_eq!(optimizer.sync_count(), 0);
    }

    #[test]
    fn test_lookahead_step_interpolates() {
        let w = Parameter::new("w", array![[1.0, -2.0]]);
        let id = w.id();
        let mut optimizer = LookaheadOptimizer::new(ConstantOptimizer::new(vec![w]), 0.3, None);
        optimizer.param_groups_mut()[0].params[0].data = array![[3.0, 2.0]];

        optimizer.lookahead_step().unwrap();

        // s0 + alpha * (f - s0)
        let expected = array![[1.0 + 0.3 * 2.0, -2.0 + 0.3 * 4.0]];
        let fast = &optimizer.param_groups()[0].params[0].data;
        let slow = optimizer.slow_weights(id).unwrap();
        for (a, b) in fast.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
        assert_eq!(fast, slow);
        assert_eq!(optimizer.sync_count(), 1);
    }

    #[test]
    fn test_alpha_one_is_full_replacement_and_fixed_point() {
        let w = Parameter::new("w", array![[1.0]]);
        let id = w.id();
        let mut optimizer = LookaheadOptimizer::new(ConstantOptimizer::new(vec![w]), 1.0, None);
        optimizer.param_groups_mut()[0].params[0].data = array![[4.0]];

        optimizer.lookahead_step().unwrap();
        assert_eq!(fast_value(&optimizer), 4.0);
        assert_eq!(optimizer.slow_weights(id).unwrap()[[0, 0]], 4.0);

        optimizer.lookahead_step().unwrap();
        optimizer.lookahead_step().unwrap();
        assert_eq!(fast_value(&optimizer), 4.0);
        assert_eq!(optimizer.slow_weights(id).unwrap()[[0, 0]], 4.0);
    }

    #[test]
    fn test_small_alpha_changes_little() {
        let w = Parameter::new("w", array![[0.0]]);
        let mut optimizer = LookaheadOptimizer::new(ConstantOptimizer::new(vec![w]), 1e-9, None);
        optimizer.param_groups_mut()[0].params[0].data = array![[1.0]];
        optimizer.lookahead_step().unwrap();
        assert!(fast_value(&optimizer).abs() < 1e-8);
    }

    #[test]
    fn test_auto_k_cadence() {
        let w = Parameter::new("w", array![[1.0]]);
        let mut optimizer =
            LookaheadOptimizer::new(ConstantOptimizer::new(vec![w]), 0.5, Some(3));

        let mut syncs = Vec::new();
        for _ in 0..5 {
            let loss = optimizer.step(None).unwrap();
            assert_eq!(loss, Some(1.5));
            syncs.push(optimizer.sync_count());
        }
        assert_eq!(syncs, vec![0, 0, 1, 1, 1]);
        assert_eq!(optimizer.step_counter(), 5);
        assert_eq!(optimizer.inner().steps, 5);
    }

    #[test]
    fn test_auto_k_one_syncs_every_step() {
        let w = Parameter::new("w", array![[1.0]]);
        let mut optimizer =
            LookaheadOptimizer::new(ConstantOptimizer::new(vec![w]), 0.5, Some(1));
        optimizer.step(None).unwrap();
        assert_eq!(optimizer.step_counter(), 1);
        assert_eq!(optimizer.sync_count(), 1);
        optimizer.step(None).unwrap();
        assert_eq!(optimizer.sync_count(), 2);
    }

    #[test]
    fn test_manual_mode_never_syncs() {
        let w = Parameter::new("w", array![[10.0]]);
        let id = w.id();
        let mut optimizer = LookaheadOptimizer::new(plain_sgd(1.0, vec![w]), 0.5, None);

        for _ in 0..7 {
            optimizer.param_groups_mut()[0].params[0].set_grad(array![[1.0]]);
            optimizer.step(None).unwrap();
        }

        assert_eq!(optimizer.step_counter(), 0);
        assert_eq!(optimizer.sync_count(), 0);
        assert_eq!(fast_value(&optimizer), 3.0);
        assert_eq!(optimizer.slow_weights(id).unwrap()[[0, 0]], 10.0);
    }

    #[test]
    fn test_reset_discards_trajectory() {
        let w = Parameter::new("w", array![[10.0]]);
        let id = w.id();
        let mut optimizer = LookaheadOptimizer::new(plain_sgd(1.0, vec![w]), 0.5, None);

        for _ in 0..3 {
            optimizer.param_groups_mut()[0].params[0].set_grad(array![[2.0]]);
            optimizer.step(None).unwrap();
            optimizer.lookahead_step().unwrap();
        }
        optimizer.param_groups_mut()[0].params[0].set_grad(array![[2.0]]);
        optimizer.step(None).unwrap();
        let fast = fast_value(&optimizer);
        assert_ne!(optimizer.slow_weights(id).unwrap()[[0, 0]], fast);

        optimizer.reset_lookahead();
        assert_eq!(optimizer.slow_weights(id).unwrap()[[0, 0]], fast);
        assert_eq!(optimizer.num_slow_weights(), 1);
    }

    #[test]
    fn test_scalar_scenario() {
        let p = Parameter::new("p", array![[10.0]]);
        let id = p.id();
        let mut optimizer = LookaheadOptimizer::new(plain_sgd(1.0, vec![p]), 0.5, None);
        assert_eq!(optimizer.slow_weights(id).unwrap()[[0, 0]], 10.0);

        // Base step: 10 -> 8, then sync: slow = 10 + 0.5 * (8 - 10) = 9.
        optimizer.param_groups_mut()[0].params[0].set_grad(array![[2.0]]);
        optimizer.step(None).unwrap();
        assert_eq!(fast_value(&optimizer), 8.0);
        optimizer.lookahead_step().unwrap();
        assert_eq!(fast_value(&optimizer), 9.0);
        assert_eq!(optimizer.slow_weights(id).unwrap()[[0, 0]], 9.0);

        // Base step: 9 -> 7, then sync: slow = 9 + 0.5 * (7 - 9) = 8.
        optimizer.param_groups_mut()[0].params[0].set_grad(array![[2.0]]);
        optimizer.step(None).unwrap();
        assert_eq!(fast_value(&optimizer), 7.0);
        optimizer.lookahead_step().unwrap();
        assert_eq!(fast_value(&optimizer), 8.0);
        assert_eq!(optimizer.slow_weights(id).unwrap()[[0, 0]], 8.0);
    }

    #[test]
    fn test_init_lookahead_step_scales_toward_zero() {
        let w = Parameter::new("w", array![[2.0, -4.0]]);
        let id = w.id();
        let mut optimizer = LookaheadOptimizer::new(ConstantOptimizer::new(vec![w]), 0.5, None);

        optimizer.init_lookahead_step(None).unwrap();
        assert_eq!(optimizer.param_groups()[0].params[0].data, array![[1.0, -2.0]]);
        assert_eq!(optimizer.slow_weights(id).unwrap(), &array![[1.0, -2.0]]);

        // Override alpha for this call only.
        optimizer.init_lookahead_step(Some(0.25)).unwrap();
        assert_eq!(optimizer.param_groups()[0].params[0].data, array![[0.25, -0.5]]);
        assert_eq!(optimizer.alpha(), 0.5);
        assert_eq!(optimizer.sync_count(), 0);
    }

    #[test]
    fn test_added_group_gets_lazy_slow_weights() {
        let w = Parameter::new("w", array![[1.0]]);
        let mut optimizer = LookaheadOptimizer::new(ConstantOptimizer::new(vec![w]), 0.5, None);

        let late = Parameter::new("late", array![[6.0]]);
        let late_id = late.id();
        optimizer.add_param_group(ParamGroup::new(vec![late]));
        assert!(optimizer.slow_weights(late_id).is_none());

        optimizer.lookahead_step().unwrap();
        // Slow starts as a copy of fast, so the first sync leaves it unchanged.
        assert_eq!(optimizer.slow_weights(late_id).unwrap()[[0, 0]], 6.0);
        assert_eq!(optimizer.param_groups()[1].params[0].data[[0, 0]], 6.0);
        assert_eq!(optimizer.num_slow_weights(), 2);
    }

    #[test]
    fn test_shape_mismatch_propagates() {
        let w = Parameter::new("w", array![[1.0, 2.0]]);
        let mut optimizer = LookaheadOptimizer::new(ConstantOptimizer::new(vec![w]), 0.5, None);
        optimizer.param_groups_mut()[0].params[0].data = array![[1.0], [2.0]];

        let err = optimizer.lookahead_step().unwrap_err();
        assert!(matches!(
            err,
            TrainError::ShapeMismatch {
                expected: (2, 1),
                found: (1, 2),
                ..
            }
        ));
        assert_eq!(optimizer.sync_count(), 0);
    }

    #[test]
    fn test_base_error_propagates_without_counting() {
        let w = Parameter::new("w", array![[1.0]]);
        let mut base = ConstantOptimizer::new(vec![w]);
        base.fail = true;
        let mut optimizer = LookaheadOptimizer::new(base, 0.5, Some(1));

        assert!(matches!(
            optimizer.step(None),
            Err(TrainError::OptimizerError(_))
        ));
        assert_eq!(optimizer.step_counter(), 0);
        assert_eq!(optimizer.sync_count(), 0);
    }

    #[test]
    fn test_zero_auto_k_is_reported_by_step() {
        let w = Parameter::new("w", array![[1.0]]);
        let mut optimizer =
            LookaheadOptimizer::new(ConstantOptimizer::new(vec![w]), 0.5, Some(0));
        assert!(matches!(
            optimizer.step(None),
            Err(TrainError::InvalidParameter(_))
        ));
        assert_eq!(optimizer.inner().steps, 1);
    }

    #[test]
    fn test_switching_to_manual_mode() {
        let w = Parameter::new("w", array![[1.0]]);
        let mut optimizer =
            LookaheadOptimizer::new(ConstantOptimizer::new(vec![w]), 0.5, Some(2));
        optimizer.step(None).unwrap();
        optimizer.set_auto_k(None);
        for _ in 0..4 {
            optimizer.step(None).unwrap();
        }
        assert_eq!(optimizer.step_counter(), 1);
        assert_eq!(optimizer.sync_count(), 0);
        assert_eq!(optimizer.auto_k(), None);
    }

    #[test]
    fn test_lr_delegation() {
        let w = Parameter::new("w", array![[1.0, 2.0]]);
        let inner = AdamOptimizer::new(
            OptimizerConfig {
                learning_rate: 0.01,
                ..Default::default()
            },
            vec![ParamGroup::new(vec![w])],
        );
        let mut optimizer = LookaheadOptimizer::with_config(
            inner,
            LookaheadConfig::default().with_auto_k(5),
        );
        assert_eq!(optimizer.get_lr(), 0.01);
        optimizer.set_lr(0.02);
        assert_eq!(optimizer.get_lr(), 0.02);
        assert_eq!(optimizer.inner().param_groups()[0].lr, Some(0.02));

        for _ in 0..10 {
            optimizer.param_groups_mut()[0].params[0].set_grad(array![[0.1, 0.1]]);
            optimizer.step(None).unwrap();
        }
        let w = &optimizer.param_groups()[0].params[0].data;
        assert!(w[[0, 0]] < 1.0);
        assert!(w[[0, 1]] < 2.0);
        assert_eq!(optimizer.sync_count(), 2);
    }

    #[test]
    fn test_closure_passthrough() {
        let w = Parameter::new("w", array![[2.0]]);
        let mut optimizer = LookaheadOptimizer::with_defaults(plain_sgd(0.25, vec![w]));
        let mut calls = 0;
        let mut closure = |groups: &mut [ParamGroup]| -> TrainResult<f64> {
            calls += 1;
            let p = &mut groups[0].params[0];
            let x = p.data[[0, 0]];
            p.set_grad(array![[2.0 * x]]);
            Ok(x * x)
        };
        let loss = optimizer.step(Some(&mut closure)).unwrap();
        assert_eq!(loss, Some(4.0));
        assert_eq!(calls, 1);
        assert_eq!(fast_value(&optimizer), 1.0);
    }

    #[test]
    fn test_config_validation_and_json() {
        assert!(LookaheadConfig::default().validate().is_ok());
        assert!(LookaheadConfig::default().with_alpha(0.0).validate().is_err());
        assert!(LookaheadConfig::default().with_alpha(1.5).validate().is_err());
        assert!(LookaheadConfig::default().with_auto_k(0).validate().is_err());

        let config = LookaheadConfig::default().with_alpha(0.8).with_auto_k(6);
        let json = config.to_json().unwrap();
        assert_eq!(LookaheadConfig::from_json(&json).unwrap(), config);
        assert!(matches!(
            LookaheadConfig::from_json("{\"alpha\": \"high\"}"),
            Err(TrainError::ConfigError(_))
        ));
    }
}
