use super::op::Op;

/// jump table for bracket pairs, built in one left-to-right scan.
/// matched braces map to each other; unmatched braces map to
/// themselves so a jump through them is a no-op.
pub struct Braces {
    jumps: Vec<usize>,
    correct: bool,
}

impl From<&str> for Braces {
    fn from(code: &str) -> Self {
        let mut jumps = (0..code.chars().count()).collect::<Vec<usize>>();
        let mut stack = Vec::new();
        let mut correct = true;
        for (i, c) in code.chars().enumerate() {
            match Op::decode(c) {
                Some(Op::Open) => stack.push(i),
                Some(Op::Close) => match stack.pop() {
                    Some(open) => {
                        jumps[open] = i;
                        jumps[i] = open;
                    }
                    None => correct = false,
                },
                _ => continue,
            }
        }
        if !stack.is_empty() {
            correct = false;
        }
        Self { jumps, correct }
    }
}

impl Braces {
    pub fn jump(&self, from: usize) -> usize {
        self.jumps[from]
    }
    pub fn correct(&self) -> bool {
        self.correct
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matched_pairs_are_mutual() {
        let braces = Braces::from("+[->[+]<]+");
        assert!(braces.correct());
        assert_eq!(8, braces.jump(1));
        assert_eq!(1, braces.jump(8));
        assert_eq!(6, braces.jump(4));
        assert_eq!(4, braces.jump(6));
    }

    #[test]
    fn unmatched_braces_self_map() {
        let braces = Braces::from("]+[");
        assert!(!braces.correct());
        assert_eq!(0, braces.jump(0));
        assert_eq!(2, braces.jump(2));
    }

    #[test]
    fn mixed_unmatched_still_pairs_the_rest() {
        let braces = Braces::from("[[]");
        assert!(!braces.correct());
        assert_eq!(2, braces.jump(1));
        assert_eq!(1, braces.jump(2));
        assert_eq!(0, braces.jump(0));
    }
}
