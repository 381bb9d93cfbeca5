use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Negate,
    BitNot,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Not => "!".fmt(f),
            UnaryOp::Negate => "-".fmt(f),
            UnaryOp::BitNot => "~".fmt(f),
        }
    }
}

impl fmt::Debug for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
