//! Optimizers for training neural networks.
//!
//! # Available Optimizers
//!
//! ## Base Optimizers
//! - [`SgdOptimizer`]: Stochastic Gradient Descent with momentum
//! - [`AdamOptimizer`]: Adaptive Moment Estimation
//!
//! ## Meta-Optimizers (Wrappers)
//! - [`LookaheadOptimizer`]: Maintains slow and fast weights
//!
//! # Common Types
//! - [`Optimizer`]: Core trait that all optimizers implement
//! - [`OptimizerConfig`]: Configuration for optimizer parameters
//! - [`GradClipMode`]: Gradient clipping modes (by value or by norm)
//! - [`SlowStateTable`]: Slow-weight storage keyed by parameter identity

pub mod adam;
pub mod common;
pub mod lookahead;
pub mod sgd;
pub mod slow_state;

// Re-export common types
pub use common::{compute_gradient_norm, Closure, GradClipMode, Optimizer, OptimizerConfig};

// Re-export all optimizers
pub use adam::AdamOptimizer;
pub use lookahead::{LookaheadConfig, LookaheadOptimizer};
pub use sgd::SgdOptimizer;
pub use slow_state::SlowStateTable;
