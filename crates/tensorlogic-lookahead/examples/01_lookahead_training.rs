//! Lookahead on top of SGD for a small linear regression.
//!
//! This example demonstrates:
//! - Wrapping an optimizer with automatic synchronization every k steps
//! - Passing a loss/gradient closure through `step`
//! - Driving the wrapped optimizer with a learning rate scheduler
//! - Manual synchronization and reset in manual mode

use scirs2_core::ndarray::{Array2, Axis};
use tensorlogic_lookahead::{
    LookaheadConfig, LookaheadOptimizer, LrScheduler, Optimizer, OptimizerConfig, ParamGroup,
    Parameter, SgdOptimizer, StepLrScheduler, TrainResult,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Lookahead Training Example ===\n");

    // y = 2*x1 - 3*x2 + 0.5
    let inputs = Array2::from_shape_fn((64, 2), |(i, j)| ((i * (j + 1)) as f64 * 0.37).sin());
    let targets = Array2::from_shape_fn((64, 1), |(i, _)| {
        2.0 * inputs[[i, 0]] - 3.0 * inputs[[i, 1]] + 0.5
    });

    let weights = Parameter::new("weights", Array2::zeros((2, 1)));
    let bias = Parameter::new("bias", Array2::zeros((1, 1)));
    let sgd = SgdOptimizer::new(
        OptimizerConfig {
            learning_rate: 0.1,
            momentum: 0.9,
            ..Default::default()
        },
        vec![ParamGroup::new(vec![weights, bias])],
    );

    let config = LookaheadConfig::default().with_alpha(0.5).with_auto_k(5);
    config.validate()?;
    println!("Config: {}", config.to_json()?);
    let mut optimizer = LookaheadOptimizer::with_config(sgd, config);
    let mut scheduler = StepLrScheduler::new(0.1, 50, 0.5);

    let mut closure = |groups: &mut [ParamGroup]| -> TrainResult<f64> {
        let n = inputs.nrows() as f64;
        let w = groups[0].params[0].data.clone();
        let b = groups[0].params[1].data[[0, 0]];
        let residual = inputs.dot(&w).mapv(|v| v + b) - &targets;
        let loss = residual.mapv(|r| r * r).sum() / n;

        let grad_w = inputs.t().dot(&residual).mapv(|g| 2.0 * g / n);
        let grad_b = residual.sum_axis(Axis(0)).insert_axis(Axis(1)) * (2.0 / n);
        groups[0].params[0].set_grad(grad_w);
        groups[0].params[1].set_grad(grad_b);
        Ok(loss)
    };

    for step in 1..=200 {
        let loss = optimizer.step(Some(&mut closure))?.unwrap_or(f64::NAN);
        scheduler.step(&mut optimizer);
        if step % 40 == 0 {
            println!(
                "Step {:3}: loss = {:.6}, lr = {:.4}, syncs = {}",
                step,
                loss,
                optimizer.get_lr(),
                optimizer.sync_count()
            );
        }
    }

    let params = &optimizer.param_groups()[0].params;
    println!(
        "\nLearned: w1 = {:.3}, w2 = {:.3}, b = {:.3}",
        params[0].data[[0, 0]],
        params[0].data[[1, 0]],
        params[1].data[[0, 0]]
    );

    // Manual mode: the caller decides when to synchronize.
    optimizer.set_auto_k(None);
    for _ in 0..10 {
        optimizer.step(Some(&mut closure))?;
    }
    optimizer.lookahead_step()?;
    optimizer.reset_lookahead();
    println!(
        "Manual sync done; {} slow weights re-seeded from the fast weights",
        optimizer.num_slow_weights()
    );

    Ok(())
}
