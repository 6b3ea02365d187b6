use super::op::Op;

/// the learner-side namespace. same instructions as [`Op`] plus an
/// end-of-sequence marker at integer 0, which shifts every op code up
/// by one. kept as a separate type so the two numberings can never be
/// confused in conversions.
#[derive(Debug, Clone, Copy, Hash, Ord, PartialOrd, PartialEq, Eq)]
pub enum Token {
    Eos,
    Op(Op),
}

impl Token {
    pub const COUNT: usize = 9;

    pub fn decode(c: char) -> Option<Self> {
        match c {
            '_' => Some(Self::Eos),
            c => Op::decode(c).map(Self::Op),
        }
    }

    /// decode a learner emission up to (not including) the first EOS.
    pub fn program(tokens: &[u8]) -> String {
        tokens
            .iter()
            .map(|&t| Self::from(t))
            .take_while(|t| *t != Self::Eos)
            .map(|t| char::from(t))
            .collect()
    }
}

/// u8 bijection, EOS at 0
impl From<Token> for u8 {
    fn from(token: Token) -> Self {
        match token {
            Token::Eos => 0,
            Token::Op(op) => u8::from(op) + 1,
        }
    }
}
impl From<u8> for Token {
    fn from(value: u8) -> Self {
        match value {
            0 => Token::Eos,
            i @ 1..=8 => Token::Op(Op::from(i - 1)),
            _ => unreachable!("invalid token encoding"),
        }
    }
}

impl From<Op> for Token {
    fn from(op: Op) -> Self {
        Token::Op(op)
    }
}

impl From<Token> for char {
    fn from(token: Token) -> Self {
        match token {
            Token::Eos => '_',
            Token::Op(op) => char::from(op),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_u8() {
        assert!((0..9).all(|i| i == u8::from(Token::from(i))));
    }

    #[test]
    fn offset_from_op() {
        assert!(Op::all()
            .iter()
            .all(|&op| u8::from(Token::from(op)) == u8::from(op) + 1));
    }

    #[test]
    fn truncates_at_eos() {
        // _ = 0, > = 1, + = 3, . = 7
        assert_eq!("+>", Token::program(&[3, 1, 0, 7, 7]));
        assert_eq!("", Token::program(&[0, 3, 3]));
        assert_eq!("+++", Token::program(&[3, 3, 3]));
    }
}
