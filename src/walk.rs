//! Depth-first traversal of expression trees.
//!
//! [`children`] lists the direct children of a node in the order they are
//! written in query text. [`walk`] drives a [`Visitor`] over a tree in
//! pre-order, reporting the end of every subtree it descended into, and stops
//! at the first error a visitor returns.
//!
//! # Examples
//!
//! ```
//! use promql_ast::builder::{rate, sum};
//! use promql_ast::ast::{Expr, InstantSelector};
//! use promql_ast::walk::inspect;
//!
//! let expr: Expr = sum(rate(InstantSelector::new("foo").range_variable("$__rate_interval"))).into();
//!
//! let mut kinds = Vec::new();
//! inspect(&expr, |node, path| {
//!     kinds.push((path.len(), node.kind()));
//!     Ok::<(), ()>(())
//! })
//! .unwrap();
//!
//! assert_eq!(kinds[0], (0, "aggregation"));
//! assert_eq!(kinds[3], (3, "instant selector"));
//! ```

use crate::ast::Expr;

/// What to do after a visitor has seen a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Descend into the node's children, then call [`Visitor::leave`]
    Continue,
    /// Skip the node's children and its `leave` call
    Skip,
}

/// Callbacks for [`walk`].
///
/// `visit` is called when a node is entered, with the chain of ancestors from
/// the root in `path`. When it returns [`Walk::Continue`], every child is
/// walked and then `leave` marks the end of the node's subtree. Any error
/// aborts the whole walk and is returned from [`walk`] as is.
pub trait Visitor<'a> {
    type Error;

    fn visit(&mut self, node: &'a Expr, path: &[&'a Expr]) -> Result<Walk, Self::Error>;

    fn leave(&mut self, _node: &'a Expr) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Direct children of a node, in query-text order.
///
/// An aggregation yields its inner expression before its parameter, whatever
/// order the two are written in.
pub fn children(expr: &Expr) -> Vec<&Expr> {
    match expr {
        Expr::InstantSelector(_) | Expr::NumberLiteral(_) | Expr::StringLiteral(_) => Vec::new(),
        Expr::RangeSelector(r) => vec![&*r.selector],
        Expr::Subquery(s) => vec![&*s.expr],
        Expr::Aggregation(a) => match &a.param {
            Some(param) => vec![&*a.expr, &**param],
            None => vec![&*a.expr],
        },
        Expr::BinaryOp(b) => vec![&*b.lhs, &*b.rhs],
        Expr::Call(c) => c.args.iter().collect(),
        Expr::Paren(p) => vec![&*p.expr],
        Expr::Unary(u) => vec![&*u.expr],
        Expr::StepInvariant(s) => vec![&*s.expr],
    }
}

/// Mutable counterpart of [`children`], in the same order.
pub fn children_mut(expr: &mut Expr) -> Vec<&mut Expr> {
    match expr {
        Expr::InstantSelector(_) | Expr::NumberLiteral(_) | Expr::StringLiteral(_) => Vec::new(),
        Expr::RangeSelector(r) => vec![&mut *r.selector],
        Expr::Subquery(s) => vec![&mut *s.expr],
        Expr::Aggregation(a) => match &mut a.param {
            Some(param) => vec![&mut *a.expr, &mut **param],
            None => vec![&mut *a.expr],
        },
        Expr::BinaryOp(b) => vec![&mut *b.lhs, &mut *b.rhs],
        Expr::Call(c) => c.args.iter_mut().collect(),
        Expr::Paren(p) => vec![&mut *p.expr],
        Expr::Unary(u) => vec![&mut *u.expr],
        Expr::StepInvariant(s) => vec![&mut *s.expr],
    }
}

/// Walks the tree rooted at `node` depth-first, starting with an empty path.
pub fn walk<'a, V>(visitor: &mut V, node: &'a Expr) -> Result<(), V::Error>
where
    V: Visitor<'a> + ?Sized,
{
    let mut path = Vec::new();
    walk_with_path(visitor, node, &mut path)
}

/// Walks the tree rooted at `node` with `path` as the ancestors of `node`.
///
/// `path` is restored to its original contents before returning.
pub fn walk_with_path<'a, V>(
    visitor: &mut V,
    node: &'a Expr,
    path: &mut Vec<&'a Expr>,
) -> Result<(), V::Error>
where
    V: Visitor<'a> + ?Sized,
{
    let next = visitor
        .visit(node, path)
        .inspect_err(|_| tracing::trace!(kind = node.kind(), depth = path.len(), "walk aborted"))?;
    if next == Walk::Skip {
        tracing::trace!(kind = node.kind(), depth = path.len(), "subtree skipped");
        return Ok(());
    }

    path.push(node);
    let mut result = Ok(());
    for child in children(node) {
        result = walk_with_path(visitor, child, path);
        if result.is_err() {
            break;
        }
    }
    path.pop();
    result?;

    visitor
        .leave(node)
        .inspect_err(|_| tracing::trace!(kind = node.kind(), depth = path.len(), "walk aborted"))
}

struct Inspector<F>(F);

impl<'a, F, E> Visitor<'a> for Inspector<F>
where
    F: FnMut(&'a Expr, &[&'a Expr]) -> Result<(), E>,
{
    type Error = E;

    fn visit(&mut self, node: &'a Expr, path: &[&'a Expr]) -> Result<Walk, E> {
        (self.0)(node, path)?;
        Ok(Walk::Continue)
    }
}

/// Calls `f` on every node in depth-first pre-order, with its ancestors.
///
/// The first error returned by `f` stops the walk and is returned.
pub fn inspect<'a, F, E>(node: &'a Expr, f: F) -> Result<(), E>
where
    F: FnMut(&'a Expr, &[&'a Expr]) -> Result<(), E>,
{
    walk(&mut Inspector(f), node)
}

/// Applies `f` to every node bottom-up: children first, then the node itself.
///
/// `f` may replace the node it is given; the replacement's children are not
/// visited again.
pub fn rewrite<F, E>(expr: &mut Expr, f: &mut F) -> Result<(), E>
where
    F: FnMut(&mut Expr) -> Result<(), E>,
{
    for child in children_mut(expr) {
        rewrite(child, f)?;
    }
    f(expr)
}
