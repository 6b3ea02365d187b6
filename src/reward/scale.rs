use super::distance::abs_diff;
use super::distance::absolute_distance;
use super::distance::log_absolute_distance;
use super::distance::mod_abs_diff;
use crate::Cell;
use crate::Reward;

/// reward functions map (predicted output, target output, base) to a
/// scalar that is 1.0 exactly when the sequences are equal, 0.0 when
/// the prediction is empty, and negative when the prediction overshoots
/// the target in length. asymmetric; argument order matters.
pub type RewardFn = fn(&[Cell], &[Cell], Cell) -> Reward;

pub fn absolute_distance_reward(pred: &[Cell], target: &[Cell], base: Cell) -> Reward {
    let unit = base as f64 * target.len().max(1) as f64;
    let dist = absolute_distance(pred, target, base, abs_diff) as f64;
    (unit - dist) / unit
}

pub fn absolute_mod_distance_reward(pred: &[Cell], target: &[Cell], base: Cell) -> Reward {
    let unit = base as f64 * target.len().max(1) as f64;
    let dist = absolute_distance(pred, target, base, mod_abs_diff) as f64;
    (unit - dist) / unit
}

pub fn absolute_log_distance_reward(pred: &[Cell], target: &[Cell], base: Cell) -> Reward {
    1.0 - log_absolute_distance(pred, target, base)
}
