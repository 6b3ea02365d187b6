use super::distance::abs_diff;
use super::distance::absolute_distance;
use crate::Cell;
use crate::Reward;

/// reward managers administer reward across an episode of repeated
/// proposals against one fixed target. calls are stateful: trying the
/// same junk twice must not pay twice.

/// rewards the net change in distance since the previous proposal,
/// scaled so one full token of distance is worth 1.0. episode total is
/// bounded above by 0.
pub struct DeltaRewardManager {
    target: Vec<Cell>,
    base: Cell,
    last: f64,
}

impl DeltaRewardManager {
    pub fn new(target: &[Cell], base: Cell) -> Self {
        Self {
            target: target.to_vec(),
            base,
            last: 0.0,
        }
    }

    fn distance(&self, seq: &[Cell]) -> f64 {
        absolute_distance(seq, &self.target, self.base, abs_diff) as f64
    }

    pub fn reward(&mut self, seq: &[Cell]) -> Reward {
        let diff = self.distance(seq);
        let reward = (self.last - diff) / self.base as f64;
        self.last = diff;
        reward
    }
}

/// rewards only new episode-minimum distances, so the episode total is
/// monotone in progress. a one-time -1.0 penalty applies while the
/// proposal is longer than the target and is repaid on recovery.
pub struct FloorRewardManager {
    target: Vec<Cell>,
    base: Cell,
    floor: f64,
    penalized: bool,
}

impl FloorRewardManager {
    pub fn new(target: &[Cell], base: Cell) -> Self {
        let floor = absolute_distance(&[], target, base, abs_diff) as f64;
        Self {
            target: target.to_vec(),
            base,
            floor,
            penalized: false,
        }
    }

    fn distance(&self, seq: &[Cell]) -> f64 {
        absolute_distance(seq, &self.target, self.base, abs_diff) as f64
    }

    pub fn reward(&mut self, seq: &[Cell]) -> Reward {
        if seq.len() > self.target.len() {
            return if self.penalized {
                0.0
            } else {
                self.penalized = true;
                -1.0
            };
        }
        let diff = self.distance(seq);
        let mut reward = if diff < self.floor {
            let earned = (self.floor - diff) / self.base as f64;
            self.floor = diff;
            earned
        } else {
            0.0
        };
        if self.penalized {
            reward += 1.0;
            self.penalized = false;
        }
        reward
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_tracks_net_change() {
        let mut manager = DeltaRewardManager::new(&[1, 2, 3, 4], 5);
        assert_eq!(-3.0, manager.reward(&[1]));
        assert_eq!(0.0, manager.reward(&[1]));
        assert_eq!(4.0 / 5.0, manager.reward(&[1, 3]));
        assert_eq!(-4.0 / 5.0, manager.reward(&[1]));
        assert_eq!(3.0, manager.reward(&[1, 2, 3, 4]));
        assert_eq!(-1.0, manager.reward(&[1, 2, 3]));
        assert_eq!(0.0, manager.reward(&[1, 2, 3, 4, 3]));
        assert_eq!(-1.0, manager.reward(&[1, 2, 3, 4, 3, 2]));
        assert_eq!(2.0, manager.reward(&[1, 2, 3, 4]));
        assert_eq!(0.0, manager.reward(&[1, 2, 3, 4]));
    }

    #[test]
    fn floor_pays_only_new_minima() {
        let mut manager = FloorRewardManager::new(&[1, 2, 3, 4], 5);
        assert_eq!(1.0, manager.reward(&[1]));
        assert_eq!(0.0, manager.reward(&[1]));
        assert_eq!(4.0 / 5.0, manager.reward(&[1, 3]));
        assert_eq!(0.0, manager.reward(&[1]));
        assert_eq!(1.0 / 5.0, manager.reward(&[1, 2]));
        assert_eq!(0.0, manager.reward(&[0, 1]));
        assert_eq!(0.0, manager.reward(&[]));
        assert_eq!(0.0, manager.reward(&[1, 2]));
        assert_eq!(2.0, manager.reward(&[1, 2, 3, 4]));
        assert_eq!(0.0, manager.reward(&[1, 2, 3]));
        assert_eq!(-1.0, manager.reward(&[1, 2, 3, 4, 3]));
        assert_eq!(0.0, manager.reward(&[1, 2, 3, 4, 3, 2]));
        assert_eq!(1.0, manager.reward(&[1, 2, 3, 4]));
        assert_eq!(0.0, manager.reward(&[1, 2, 3, 4]));
    }

    #[test]
    fn floor_repays_the_length_penalty() {
        let mut manager = FloorRewardManager::new(&[1, 2, 3, 4], 5);
        assert_eq!(1.0, manager.reward(&[1]));
        assert_eq!(-1.0, manager.reward(&[1, 0, 0, 0, 0, 0]));
        assert_eq!(0.0, manager.reward(&[1, 2, 3, 4, 0, 0]));
        assert_eq!(0.0, manager.reward(&[1, 2, 3, 4, 0]));
        assert_eq!(1.0, manager.reward(&[]));
        assert_eq!(0.0, manager.reward(&[]));
        assert_eq!(0.0, manager.reward(&[1]));
        assert_eq!(1.0, manager.reward(&[1, 2]));
        assert_eq!(-1.0, manager.reward(&[1, 2, 3, 4, 0, 0]));
        assert_eq!(0.0, manager.reward(&[1, 1, 1, 1, 1]));
        assert_eq!(1.0 + 2.0, manager.reward(&[1, 2, 3, 4]));
    }
}
