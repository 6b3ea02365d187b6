use super::record::Reason;
use super::record::Scored;
use crate::reward::absolute_distance_reward;
use crate::reward::scale::RewardFn;
use crate::tape::Machine;
use crate::task::Case;
use crate::task::IoType;
use crate::task::Task;
use crate::Reward;
use std::time::Duration;

fn clipped_linear(x: f64, x0: f64, y0: f64, slope: f64, range: (f64, f64)) -> f64 {
    (slope * (x - x0) + y0).clamp(range.0, range.1)
}

/// runs every test case of one task against candidate programs and
/// folds the per-case rewards into a single normalized total.
///
/// the total for a perfect solver at the maximum allowed length is
/// exactly 1.0: per case, the reward function contributes 1.0 for an
/// exact match, plus a correctness bonus, plus a code-length bonus,
/// and the sum is divided by the precomputed best.
pub struct Scorer {
    cases: Vec<Case>,
    machine: Machine,
    task_name: &'static str,
    base: crate::Cell,
    max_code_length: usize,
    min_code_length: usize,
    correct_bonus: Reward,
    length_bonus: Reward,
    failure_reward: Reward,
    time_penalty: f64,
    reward_fn: RewardFn,
    input_type: IoType,
    output_type: IoType,
    best_reward: Reward,
    good_reward: Reward,
}

impl Scorer {
    /// when code simplification is off, the length bonus is flat, so
    /// reward scaling matches the simplifying configuration.
    pub fn new(
        task: Box<dyn Task>,
        max_code_length: usize,
        do_code_simplification: bool,
        require_correct_syntax: bool,
    ) -> Self {
        let min_code_length = if do_code_simplification {
            0
        } else {
            max_code_length
        };
        let time_penalty = if max_code_length > min_code_length {
            1.0 / (max_code_length - min_code_length) as f64
        } else {
            0.0
        };
        let cases = task.cases();
        let machine = Machine::new(task.base())
            .timeout(Some(Duration::from_secs_f64(crate::CASE_TIMEOUT_SECS)))
            .steps(Some(crate::MAX_EXECUTION_STEPS))
            .strict(require_correct_syntax);
        let reward_fn: RewardFn = absolute_distance_reward;
        let mut best_reward = 0.0;
        for case in &cases {
            best_reward += reward_fn(&case.output, &case.output, task.base());
            best_reward += crate::CORRECT_BONUS;
            best_reward += crate::LENGTH_BONUS;
        }
        log::info!("known best reward: {:.4}", best_reward);
        Self {
            cases,
            machine,
            task_name: task.name(),
            base: task.base(),
            max_code_length,
            min_code_length,
            correct_bonus: crate::CORRECT_BONUS,
            length_bonus: crate::LENGTH_BONUS,
            failure_reward: crate::FAILURE_REWARD,
            time_penalty,
            reward_fn,
            input_type: task.input_type(),
            output_type: task.output_type(),
            best_reward,
            good_reward: 0.75 * best_reward,
        }
    }

    pub fn task_name(&self) -> &'static str {
        self.task_name
    }
    pub fn max_code_length(&self) -> usize {
        self.max_code_length
    }
    pub fn best_reward(&self) -> Reward {
        self.best_reward
    }
    pub fn good_reward(&self) -> Reward {
        self.good_reward
    }

    pub fn score(&self, code: &str) -> Scored {
        let mut total = 0.0;
        let mut outputs = Vec::new();
        let mut reason = Reason::Correct;
        for case in &self.cases {
            let evaluation = self.machine.run(code, &case.input);
            if !evaluation.success() {
                total = self.failure_reward;
                outputs.clear();
                reason = Reason::from(evaluation.status);
                break;
            }
            total += (self.reward_fn)(&evaluation.output, &case.output, self.base);
            if evaluation.output == case.output {
                total += self.correct_bonus;
                // optimize for length only once any solution is found;
                // subtracting reward interferes with the main objective
                if self.min_code_length == self.max_code_length {
                    total += self.length_bonus;
                } else {
                    total += self.length_bonus
                        * clipped_linear(
                            code.chars().count() as f64,
                            self.min_code_length as f64,
                            1.0,
                            -self.time_penalty,
                            (0.0, 1.0),
                        );
                }
            } else if reason == Reason::Correct {
                reason = Reason::Wrong;
            }
            outputs.push(evaluation.output);
        }
        let mut episode_rewards = vec![0.0; code.chars().count().saturating_sub(1)];
        episode_rewards.push(total / self.best_reward);
        Scored {
            episode_rewards,
            inputs: self.cases.iter().map(|c| c.input.clone()).collect(),
            expected: self.cases.iter().map(|c| c.output.clone()).collect(),
            outputs,
            reason,
            input_type: self.input_type,
            output_type: self.output_type,
        }
    }
}
