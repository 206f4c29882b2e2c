//! Lookahead weight averaging for tensorlogic optimizers.
//!
//! **Version**: 0.1.0-alpha.2 | **Status**: Production Ready
//!
//! This crate provides:
//! - [`LookaheadOptimizer`], a meta-optimizer that keeps slow weights next to
//!   the fast weights of any [`Optimizer`] and periodically pulls them together
//! - Base optimizers ([`SgdOptimizer`], [`AdamOptimizer`]) working on
//!   [`ParamGroup`]s of identity-tracked [`Parameter`]s
//! - Learning rate schedulers that drive an optimizer through its parameter groups
//! - Structured logging setup (feature `structured-logging`)
//!
//! # Example
//!
//! ```
//! use scirs2_core::ndarray::array;
//! use tensorlogic_lookahead::{
//!     LookaheadOptimizer, Optimizer, OptimizerConfig, ParamGroup, Parameter, SgdOptimizer,
//! };
//!
//! let w = Parameter::new("w", array![[1.0, 2.0]]);
//! let sgd = SgdOptimizer::new(OptimizerConfig::default(), vec![ParamGroup::new(vec![w])]);
//! let mut optimizer = LookaheadOptimizer::new(sgd, 0.5, Some(5));
//!
//! for _ in 0..10 {
//!     optimizer.param_groups_mut()[0].params[0].set_grad(array![[0.1, 0.1]]);
//!     optimizer.step(None)?;
//! }
//! assert_eq!(optimizer.sync_count(), 2);
//! # Ok::<(), tensorlogic_lookahead::TrainError>(())
//! ```

mod error;
mod optimizers;
mod param;
mod scheduler;

#[cfg(feature = "structured-logging")]
pub mod structured_logging;

pub use error::{TrainError, TrainResult};
pub use optimizers::{
    compute_gradient_norm, AdamOptimizer, Closure, GradClipMode, LookaheadConfig,
    LookaheadOptimizer, Optimizer, OptimizerConfig, SgdOptimizer, SlowStateTable,
};
pub use param::{find_parameter, find_parameter_mut, ParamGroup, ParamId, Parameter};
pub use scheduler::{ExponentialLrScheduler, LrScheduler, StepLrScheduler};
