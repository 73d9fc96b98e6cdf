//! Abstract syntax tree for the robot DSL.
//!
//! The tree is closed: every construct the front end can lower has exactly
//! one variant here. Forms the grammar accepts but the translator does not
//! support are kept as [`Stmt::Unsupported`] / [`Expr::Unsupported`] so the
//! emitter can put a marker at the exact site instead of failing the unit.

use serde::Serialize;

/// One translated source file: exactly one class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unit {
    pub name: String,
    pub decorators: Vec<Expr>,
    pub body: Vec<Stmt>,
}

impl Unit {
    pub fn new(name: impl Into<String>, decorators: Vec<Expr>, body: Vec<Stmt>) -> Self {
        Self {
            name: name.into(),
            decorators,
            body,
        }
    }

    /// Iterate over the routines defined directly in the class body.
    pub fn routines(&self) -> impl Iterator<Item = &Routine> {
        self.body.iter().filter_map(|stmt| match stmt {
            Stmt::Routine(routine) => Some(routine),
            _ => None,
        })
    }

    /// First routine with the given name.
    pub fn routine(&self, name: &str) -> Option<&Routine> {
        self.routines().find(|r| r.name == name)
    }
}

/// A `def` inside the class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Routine {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
}

impl Routine {
    pub fn new(name: impl Into<String>, params: Vec<String>, body: Vec<Stmt>) -> Self {
        Self {
            name: name.into(),
            params,
            body,
        }
    }

    /// The implicit receiver (first parameter), if any.
    pub fn receiver(&self) -> Option<&str> {
        self.params.first().map(String::as_str)
    }

    /// Parameters after the receiver.
    pub fn value_params(&self) -> &[String] {
        self.params.get(1..).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "stmt", rename_all = "snake_case")]
pub enum Stmt {
    Routine(Routine),

    Assign {
        target: Expr,
        value: Expr,
    },

    AugAssign {
        target: Expr,
        op: BinaryOp,
        value: Expr,
    },

    Expr {
        expr: Expr,
    },

    /// `elif` arrives here as a single nested `If` in `orelse`.
    If {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },

    While {
        test: Expr,
        body: Vec<Stmt>,
    },

    Return {
        value: Option<Expr>,
    },

    Break,
    Continue,

    Unsupported {
        kind: String,
        line: usize,
    },
}

impl Stmt {
    pub fn assign(target: Expr, value: Expr) -> Self {
        Stmt::Assign { target, value }
    }

    pub fn expr(expr: Expr) -> Self {
        Stmt::Expr { expr }
    }

    pub fn if_stmt(test: Expr, body: Vec<Stmt>, orelse: Vec<Stmt>) -> Self {
        Stmt::If { test, body, orelse }
    }

    pub fn while_loop(test: Expr, body: Vec<Stmt>) -> Self {
        Stmt::While { test, body }
    }

    pub fn unsupported(kind: impl Into<String>, line: usize) -> Self {
        Stmt::Unsupported {
            kind: kind.into(),
            line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "expr", rename_all = "snake_case")]
pub enum Expr {
    Literal {
        value: Literal,
    },

    Name {
        id: String,
    },

    Attribute {
        object: Box<Expr>,
        attr: String,
    },

    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },

    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
        keywords: Vec<(String, Expr)>,
    },

    Unsupported {
        kind: String,
    },
}

impl Expr {
    pub fn name(id: impl Into<String>) -> Self {
        Expr::Name { id: id.into() }
    }

    pub fn string(s: impl Into<String>) -> Self {
        Expr::Literal {
            value: Literal::Str(s.into()),
        }
    }

    pub fn int(text: impl Into<String>) -> Self {
        Expr::Literal {
            value: Literal::Int(text.into()),
        }
    }

    pub fn float(text: impl Into<String>) -> Self {
        Expr::Literal {
            value: Literal::Float(text.into()),
        }
    }

    pub fn bool(b: bool) -> Self {
        Expr::Literal {
            value: Literal::Bool(b),
        }
    }

    pub fn none() -> Self {
        Expr::Literal {
            value: Literal::None,
        }
    }

    pub fn attr(object: Expr, attr: impl Into<String>) -> Self {
        Expr::Attribute {
            object: Box::new(object),
            attr: attr.into(),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn call(func: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            func: Box::new(func),
            args,
            keywords: Vec::new(),
        }
    }

    pub fn unsupported(kind: impl Into<String>) -> Self {
        Expr::Unsupported { kind: kind.into() }
    }

    /// The identifier, if this is a bare name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Expr::Name { id } => Some(id),
            _ => None,
        }
    }

    /// `receiver.attr` → `attr`, for the given receiver name.
    pub fn receiver_field(&self, receiver: Option<&str>) -> Option<&str> {
        match (self, receiver) {
            (Expr::Attribute { object, attr }, Some(recv)) if object.as_name() == Some(recv) => {
                Some(attr)
            }
            _ => None,
        }
    }

    /// `a.b.c` for pure name/attribute chains.
    pub fn dotted_name(&self) -> Option<String> {
        match self {
            Expr::Name { id } => Some(id.clone()),
            Expr::Attribute { object, attr } => {
                object.dotted_name().map(|root| format!("{}.{}", root, attr))
            }
            _ => None,
        }
    }

    /// Text of the literal at `index` among the positional arguments of a call.
    ///
    /// Strings yield their value, numbers their source spelling. Anything
    /// else (including a missing argument) yields `None`.
    pub fn literal_arg(&self, index: usize) -> Option<String> {
        let Expr::Call { args, .. } = self else {
            return None;
        };
        match args.get(index)? {
            Expr::Literal {
                value: Literal::Str(s),
            } => Some(s.clone()),
            Expr::Literal {
                value: Literal::Int(n) | Literal::Float(n),
            } => Some(n.clone()),
            _ => None,
        }
    }
}

/// Numbers keep their source spelling; Java accepts the same forms.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Literal {
    Int(String),
    Float(String),
    Str(String),
    Bool(bool),
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    Neg,
    Pos,
    Not,
    Invert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    MatMul,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    LShift,
    RShift,

    // Comparison
    Lt,
    Gt,
    LtE,
    GtE,
    Eq,
    NotEq,
    In,
    NotIn,
    Is,
    IsNot,

    // Logical
    And,
    Or,
}

impl BinaryOp {
    /// Operator from its surface spelling (binary, comparison, boolean).
    pub fn from_token(token: &str) -> Option<Self> {
        let op = match token {
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "//" => BinaryOp::FloorDiv,
            "%" => BinaryOp::Mod,
            "**" => BinaryOp::Pow,
            "@" => BinaryOp::MatMul,
            "&" => BinaryOp::BitAnd,
            "|" => BinaryOp::BitOr,
            "^" => BinaryOp::BitXor,
            "<<" => BinaryOp::LShift,
            ">>" => BinaryOp::RShift,
            "<" => BinaryOp::Lt,
            ">" => BinaryOp::Gt,
            "<=" => BinaryOp::LtE,
            ">=" => BinaryOp::GtE,
            "==" => BinaryOp::Eq,
            "!=" | "<>" => BinaryOp::NotEq,
            "in" => BinaryOp::In,
            "not in" => BinaryOp::NotIn,
            "is" => BinaryOp::Is,
            "is not" => BinaryOp::IsNot,
            "and" => BinaryOp::And,
            "or" => BinaryOp::Or,
            _ => return None,
        };
        Some(op)
    }

    /// Operator from an augmented-assignment token (`+=` → `Add`).
    pub fn from_augmented(token: &str) -> Option<Self> {
        token.strip_suffix('=').and_then(Self::from_token)
    }
}
