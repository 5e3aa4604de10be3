use std::fmt;

use phf::phf_map;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token {
    Number(f64),
    Operator(Operator),
    LeftParen,
    RightParen,
    Function(Function),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Operator(op) => write!(f, "{}", op.sym),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
            Token::Function(func) => f.write_str(func.name()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

impl Assoc {
    pub fn is_left(&self) -> bool {
        self == &Assoc::Left
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Operator {
    pub sym: char,
    pub op: BinOp,
    pub prec: u8,
    pub assoc: Assoc,
}

impl Operator {
    pub fn from_symbol(sym: char) -> Option<Operator> {
        OPERATOR_TABLE.get(&sym).copied()
    }

    pub fn is_symbol(c: char) -> bool {
        OPERATOR_TABLE.contains_key(&c)
    }

    /// Whether `self`, sitting on the operator stack, has to be emitted before
    /// `incoming` is pushed.
    pub fn pops_before(&self, incoming: &Operator) -> bool {
        if incoming.assoc.is_left() {
            self.prec >= incoming.prec
        } else {
            self.prec > incoming.prec
        }
    }
}

pub static OPERATOR_TABLE: phf::Map<char, Operator> = phf_map! {
    '+' => Operator {
        sym: '+',
        op: BinOp::Add,
        prec: 1,
        assoc: Assoc::Left,
    },
    '-' => Operator {
        sym: '-',
        op: BinOp::Sub,
        prec: 1,
        assoc: Assoc::Left,
    },
    '*' => Operator {
        sym: '*',
        op: BinOp::Mul,
        prec: 2,
        assoc: Assoc::Left,
    },
    '/' => Operator {
        sym: '/',
        op: BinOp::Div,
        prec: 2,
        assoc: Assoc::Left,
    },
    '^' => Operator {
        sym: '^',
        op: BinOp::Pow,
        prec: 3,
        assoc: Assoc::Right,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Function {
    Sqrt,
}

impl Function {
    pub fn from_name(name: &str) -> Option<Function> {
        match name {
            "sqrt" => Some(Function::Sqrt),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Function::Sqrt => "sqrt",
        }
    }
}
