use std::fmt;

use crate::ast::{
    Aggregation, BinaryOp, InstantSelector, PositionRange, RangeSelector, Subquery, UnaryOp,
};

/// Functions whose result is a scalar rather than an instant vector.
const SCALAR_FUNCTIONS: [&str; 3] = ["pi", "scalar", "time"];

/// Type of the value an expression evaluates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Scalar,
    Vector,
    Matrix,
    String,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueType::Scalar => "scalar",
            ValueType::Vector => "vector",
            ValueType::Matrix => "matrix",
            ValueType::String => "string",
        })
    }
}

/// Abstract Syntax Tree node of a PromQL expression.
///
/// The set of variants is closed: every operation in this crate matches on
/// all of them, so adding a variant is a compile error until each of them
/// handles it. Each node exclusively owns its children.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Instant vector selector
    ///
    /// # Example
    /// ```text
    /// up{job="prometheus"}
    /// ```
    InstantSelector(InstantSelector),

    /// Range vector selector
    ///
    /// # Example
    /// ```text
    /// up[5m]
    /// ```
    RangeSelector(RangeSelector),

    /// Subquery
    ///
    /// # Example
    /// ```text
    /// rate(up[5m])[1h:1m]
    /// ```
    Subquery(Subquery),

    /// Aggregation
    ///
    /// # Example
    /// ```text
    /// sum by (job) (up)
    /// ```
    Aggregation(Aggregation),

    /// Binary operation (arithmetic, comparison, set)
    BinaryOp(BinaryOp),

    /// Function call
    ///
    /// # Example
    /// ```text
    /// histogram_quantile(0.9, rate(latency_bucket[5m]))
    /// ```
    Call(Call),

    /// Parenthesized expression
    Paren(Paren),

    /// Signed expression (`-up`)
    Unary(Unary),

    /// Number literal
    NumberLiteral(NumberLiteral),

    /// String literal
    StringLiteral(StringLiteral),

    /// Expression whose value does not change across evaluation steps
    StepInvariant(StepInvariant),
}

impl Expr {
    /// Human-readable name of the node's variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::InstantSelector(_) => "instant selector",
            Expr::RangeSelector(_) => "range selector",
            Expr::Subquery(_) => "subquery",
            Expr::Aggregation(_) => "aggregation",
            Expr::BinaryOp(_) => "binary operation",
            Expr::Call(_) => "call",
            Expr::Paren(_) => "parenthesis",
            Expr::Unary(_) => "unary",
            Expr::NumberLiteral(_) => "number literal",
            Expr::StringLiteral(_) => "string literal",
            Expr::StepInvariant(_) => "step invariant",
        }
    }

    /// Type of the value the expression evaluates to.
    ///
    /// This is a fixed tag per variant; argument types are not checked.
    pub fn value_type(&self) -> ValueType {
        match self {
            Expr::InstantSelector(_) | Expr::Aggregation(_) => ValueType::Vector,
            Expr::RangeSelector(_) | Expr::Subquery(_) => ValueType::Matrix,
            Expr::NumberLiteral(_) => ValueType::Scalar,
            Expr::StringLiteral(_) => ValueType::String,
            Expr::Paren(Paren { expr, .. })
            | Expr::Unary(Unary { expr, .. })
            | Expr::StepInvariant(StepInvariant { expr, .. }) => expr.value_type(),
            Expr::BinaryOp(b) => {
                if b.lhs.value_type() == ValueType::Scalar
                    && b.rhs.value_type() == ValueType::Scalar
                {
                    ValueType::Scalar
                } else {
                    ValueType::Vector
                }
            }
            Expr::Call(c) if SCALAR_FUNCTIONS.contains(&c.func.as_str()) => ValueType::Scalar,
            Expr::Call(_) => ValueType::Vector,
        }
    }

    pub fn position_range(&self) -> PositionRange {
        match self {
            Expr::InstantSelector(e) => e.pos,
            Expr::RangeSelector(e) => e.pos,
            Expr::Subquery(e) => e.pos,
            Expr::Aggregation(e) => e.pos,
            Expr::BinaryOp(e) => e.pos,
            Expr::Call(e) => e.pos,
            Expr::Paren(e) => e.pos,
            Expr::Unary(e) => e.pos,
            Expr::NumberLiteral(e) => e.pos,
            Expr::StringLiteral(e) => e.pos,
            Expr::StepInvariant(e) => e.pos,
        }
    }
}

macro_rules! impl_from_node {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Expr {
                fn from(node: $variant) -> Self {
                    Expr::$variant(node)
                }
            }
        )*
    };
}

impl_from_node!(
    InstantSelector,
    RangeSelector,
    Subquery,
    Aggregation,
    BinaryOp,
    Call,
    Paren,
    Unary,
    NumberLiteral,
    StringLiteral,
    StepInvariant,
);

/// Function call with its arguments in call order.
///
/// The function name is not looked up, so custom functions (`xincrease`)
/// are carried like built-in ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub func: String,
    pub args: Vec<Expr>,
    pub pos: PositionRange,
}

impl Call {
    pub fn new(func: impl Into<String>, args: Vec<Expr>) -> Self {
        Call {
            func: func.into(),
            args,
            pos: PositionRange::default(),
        }
    }
}

/// Parenthesized expression. Grouping only, with no effect on the value.
#[derive(Debug, Clone, PartialEq)]
pub struct Paren {
    pub expr: Box<Expr>,
    pub pos: PositionRange,
}

impl Paren {
    pub fn new(expr: impl Into<Expr>) -> Self {
        Paren {
            expr: Box::new(expr.into()),
            pos: PositionRange::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub op: UnaryOp,
    pub expr: Box<Expr>,
    pub pos: PositionRange,
}

impl Unary {
    pub fn new(op: UnaryOp, expr: impl Into<Expr>) -> Self {
        Unary {
            op,
            expr: Box::new(expr.into()),
            pos: PositionRange::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberLiteral {
    pub value: f64,
    pub pos: PositionRange,
}

impl NumberLiteral {
    pub fn new(value: f64) -> Self {
        NumberLiteral {
            value,
            pos: PositionRange::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: String,
    pub pos: PositionRange,
}

impl StringLiteral {
    pub fn new(value: impl Into<String>) -> Self {
        StringLiteral {
            value: value.into(),
            pos: PositionRange::default(),
        }
    }
}

/// Wrapper marking an expression as constant over the evaluation steps.
/// It renders as the wrapped expression.
#[derive(Debug, Clone, PartialEq)]
pub struct StepInvariant {
    pub expr: Box<Expr>,
    pub pos: PositionRange,
}

impl StepInvariant {
    pub fn new(expr: impl Into<Expr>) -> Self {
        StepInvariant {
            expr: Box::new(expr.into()),
            pos: PositionRange::default(),
        }
    }
}
