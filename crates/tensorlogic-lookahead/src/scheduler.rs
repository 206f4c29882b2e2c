//! Learning rate schedulers.
//!
//! Schedulers write through [`Optimizer::set_lr`], so they work the same on a
//! bare optimizer and on a [`LookaheadOptimizer`](crate::LookaheadOptimizer)
//! wrapping it.

use crate::Optimizer;

/// Trait for learning rate schedulers.
pub trait LrScheduler {
    /// Update learning rate based on current step/epoch.
    fn step(&mut self, optimizer: &mut dyn Optimizer);

    /// Get current learning rate.
    fn get_lr(&self) -> f64;
}

/// Step-based learning rate scheduler.
/// Decreases learning rate by a factor every `step_size` epochs.
#[derive(Debug, Clone)]
pub struct StepLrScheduler {
    /// Initial learning rate.
    pub initial_lr: f64,
    /// Step size (epochs).
    pub step_size: usize,
    /// Multiplicative factor of learning rate decay.
    pub gamma: f64,
    current_epoch: usize,
    current_lr: f64,
}

impl StepLrScheduler {
    /// Create a new step LR scheduler.
    pub fn new(initial_lr: f64, step_size: usize, gamma: f64) -> Self {
        Self {
            initial_lr,
            step_size,
            gamma,
            current_epoch: 0,
            current_lr: initial_lr,
        }
    }
}

impl LrScheduler for StepLrScheduler {
    fn step(&mut self, optimizer: &mut dyn Optimizer) {
        self.current_epoch += 1;

        if self.step_size > 0 && self.current_epoch % self.step_size == 0 {
            self.current_lr *= self.gamma;
            optimizer.set_lr(self.current_lr);
        }
    }

    fn get_lr(&self) -> f64 {
        self.current_lr
    }
}

/// Exponential learning rate scheduler.
/// Decays the learning rate by gamma every epoch.
#[derive(Debug, Clone)]
pub struct ExponentialLrScheduler {
    /// Initial learning rate.
    pub initial_lr: f64,
    /// Multiplicative factor of learning rate decay.
    pub gamma: f64,
    current_epoch: usize,
    current_lr: f64,
}

impl ExponentialLrScheduler {
    /// Create a new exponential LR scheduler.
    pub fn new(initial_lr: f64, gamma: f64) -> Self {
        Self {
            initial_lr,
            gamma,
            current_epoch: 0,
            current_lr: initial_lr,
        }
    }
}

impl LrScheduler for ExponentialLrScheduler {
    fn step(&mut self, optimizer: &mut dyn Optimizer) {
        self.current_epoch += 1;
        self.current_lr = self.initial_lr * self.gamma.powi(self.current_epoch as i32);
        optimizer.set_lr(self.current_lr);
    }

    fn get_lr(&self) -> f64 {
        self.current_lr
    }
}
