//! Structural copies of expression trees.
//!
//! [`deep_copy`] rebuilds a tree node by node, so the copy shares no storage
//! with the original and either can be mutated without affecting the other.
//! Unlike a plain `clone`, it checks the field invariants of each node on the
//! way and refuses to copy a malformed tree.

use crate::ast::{
    Aggregation, BinaryOp, Call, Expr, InstantSelector, NumberLiteral, Paren, RangeSelector,
    StepInvariant, StringLiteral, Subquery, Unary,
};
use crate::error::AstResult;

/// Copies the tree rooted at `expr`.
///
/// Fails with [`AstError::MalformedNode`](crate::error::AstError::MalformedNode)
/// when a node breaks its variant's invariants, e.g. a `quantile` aggregation
/// without its parameter or a selector with neither metric name nor matchers.
pub fn deep_copy(expr: &Expr) -> AstResult<Expr> {
    let copy = match expr {
        Expr::InstantSelector(s) => {
            s.validate()?;
            Expr::InstantSelector(copy_selector(s))
        }

        Expr::RangeSelector(r) => {
            let selector = r.instant_selector()?;
            Expr::RangeSelector(RangeSelector {
                selector: Box::new(Expr::InstantSelector(copy_selector(selector))),
                range: r.range.clone(),
                pos: r.pos,
            })
        }

        Expr::Subquery(s) => Expr::Subquery(Subquery {
            expr: copy_boxed(&s.expr)?,
            range: s.range,
            step: s.step,
            offset: s.offset,
            at: s.at,
            pos: s.pos,
        }),

        Expr::Aggregation(a) => {
            a.validate()?;
            let param = match &a.param {
                Some(param) => Some(copy_boxed(param)?),
                None => None,
            };
            Expr::Aggregation(Aggregation {
                op: a.op,
                expr: copy_boxed(&a.expr)?,
                param,
                grouping: a.grouping.clone(),
                pos: a.pos,
            })
        }

        Expr::BinaryOp(b) => Expr::BinaryOp(BinaryOp {
            op: b.op,
            lhs: copy_boxed(&b.lhs)?,
            rhs: copy_boxed(&b.rhs)?,
            matching: b.matching.clone(),
            return_bool: b.return_bool,
            pos: b.pos,
        }),

        Expr::Call(c) => Expr::Call(Call {
            func: c.func.clone(),
            args: c.args.iter().map(deep_copy).collect::<AstResult<Vec<_>>>()?,
            pos: c.pos,
        }),

        Expr::Paren(p) => Expr::Paren(Paren {
            expr: copy_boxed(&p.expr)?,
            pos: p.pos,
        }),

        Expr::Unary(u) => Expr::Unary(Unary {
            op: u.op,
            expr: copy_boxed(&u.expr)?,
            pos: u.pos,
        }),

        Expr::NumberLiteral(n) => Expr::NumberLiteral(NumberLiteral {
            value: n.value,
            pos: n.pos,
        }),

        Expr::StringLiteral(s) => Expr::StringLiteral(StringLiteral {
            value: s.value.clone(),
            pos: s.pos,
        }),

        Expr::StepInvariant(s) => Expr::StepInvariant(StepInvariant {
            expr: copy_boxed(&s.expr)?,
            pos: s.pos,
        }),
    };
    Ok(copy)
}

/// Copies an optional tree; `None` copies to `None`.
pub fn deep_copy_opt(expr: Option<&Expr>) -> AstResult<Option<Expr>> {
    expr.map(deep_copy).transpose()
}

fn copy_boxed(expr: &Expr) -> AstResult<Box<Expr>> {
    deep_copy(expr).map(Box::new)
}

fn copy_selector(selector: &InstantSelector) -> InstantSelector {
    InstantSelector {
        name: selector.name.clone(),
        matchers: selector.matchers.clone(),
        offset: selector.offset,
        at: selector.at,
        pos: selector.pos,
    }
}
